use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::models::ApiResponse;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        err.sql_err()
            .and_then(AppError::from_sql_err)
            .unwrap_or(AppError::DatabaseError(err))
    }
}

impl AppError {
    /// 唯一约束冲突归为 Conflict，其余约束错误仍按数据库错误处理
    fn from_sql_err(sql_err: SqlErr) -> Option<Self> {
        match sql_err {
            SqlErr::UniqueConstraintViolation(detail) => {
                log::warn!("Unique constraint violation: {detail}");
                Some(AppError::Conflict(
                    "Duplicate entry: record already exists".to_string(),
                ))
            }
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                ApiResponse::failure(msg.clone(), None)
            }
            AppError::Conflict(msg) => {
                log::warn!("Conflict: {msg}");
                ApiResponse::failure(msg.clone(), None)
            }
            AppError::NotFound(msg) => ApiResponse::failure(msg.clone(), None),
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                ApiResponse::failure("Database error".to_string(), Some(err.to_string()))
            }
            AppError::ConfigError(msg) => {
                log::error!("Config error: {msg}");
                ApiResponse::failure("Internal server error".to_string(), Some(msg.clone()))
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn validation_and_conflict_are_bad_request() {
        let (status, body) = render(AppError::ValidationError("Missing name".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Missing name");
        assert!(body.get("error").is_none());

        let (status, _) = render(AppError::Conflict("dup".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn not_found_is_404() {
        let (status, body) = render(AppError::NotFound("Donor not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Donor not found");
    }

    #[actix_web::test]
    async fn database_error_surfaces_backend_text() {
        let err = AppError::from(DbErr::Custom("relation \"donors\" does not exist".into()));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("relation \"donors\" does not exist")
        );
    }

    #[actix_web::test]
    async fn config_error_is_internal() {
        let (status, body) = render(AppError::ConfigError("bad toml".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["error"], "bad toml");
    }

    #[test]
    fn unique_violation_is_conflict() {
        let err = AppError::from_sql_err(SqlErr::UniqueConstraintViolation(
            "duplicate key value violates unique constraint \"donors_email_key\"".into(),
        ));
        assert!(matches!(err, Some(AppError::Conflict(msg)) if msg.contains("already exists")));

        let err = AppError::from_sql_err(SqlErr::ForeignKeyConstraintViolation("fk".into()));
        assert!(err.is_none());
    }

    #[test]
    fn unclassified_db_error_stays_database_error() {
        let err = AppError::from(DbErr::RecordNotInserted);
        assert!(matches!(err, AppError::DatabaseError(DbErr::RecordNotInserted)));
    }
}
