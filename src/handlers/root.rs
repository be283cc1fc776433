use actix_web::{HttpResponse, Result, web};
use sea_orm::DatabaseConnection;

use crate::models::{ApiResponse, HealthStatus};

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service is running", body = String))
)]
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Blood donor gateway is running")
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = HealthStatus),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn health(db: web::Data<DatabaseConnection>) -> Result<HttpResponse> {
    match db.ping().await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(HealthStatus {
            database: "up".to_string(),
        }))),
        Err(e) => {
            log::error!("Database health check failed: {e}");
            Ok(HttpResponse::ServiceUnavailable().json(ApiResponse {
                success: false,
                data: Some(HealthStatus {
                    database: "down".to_string(),
                }),
                message: Some("Database unreachable".to_string()),
                count: None,
                error: Some(e.to_string()),
            }))
        }
    }
}

pub fn root_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(liveness))
        .route("/health", web::get().to(health));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn liveness_returns_text() {
        let app = test::init_service(App::new().configure(root_config)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert_eq!(body, "Blood donor gateway is running");
    }

    #[actix_web::test]
    async fn health_reports_unreachable_database() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(DatabaseConnection::Disconnected))
                .configure(root_config),
        )
        .await;
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["data"]["database"], "down");
    }
}
