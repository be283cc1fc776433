use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::{Map, Value};

use crate::entities::ActivityType;
use crate::models::*;
use crate::services::UserActivityService;

#[utoipa::path(
    post,
    path = "/users",
    tag = "user",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity recorded", body = CreatedActivityResponse),
        (status = 400, description = "Missing fields or duplicate entry"),
        (status = 500, description = "Database error")
    )
)]
pub async fn create_activity(
    user_service: web::Data<UserActivityService>,
    request: web::Json<CreateActivityRequest>,
) -> Result<HttpResponse> {
    match user_service.record_activity(request.into_inner()).await {
        Ok(created) => {
            let message = match created.activity_type {
                ActivityType::Register => "User registered successfully",
                ActivityType::Login => "Login recorded successfully",
            };
            Ok(HttpResponse::Created().json(ApiResponse::success_with_message(created, message)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "user",
    responses(
        (status = 200, description = "All activity records, newest first", body = [UserActivityResponse]),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_activities(user_service: web::Data<UserActivityService>) -> Result<HttpResponse> {
    match user_service.list_activities().await {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::list(rows))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "user",
    params(("id" = i64, Path, description = "Row id")),
    responses(
        (status = 200, description = "Activity record", body = UserActivityResponse),
        (status = 404, description = "No such row")
    )
)]
pub async fn get_activity(
    user_service: web::Data<UserActivityService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match user_service.get_activity(path.into_inner()).await {
        Ok(row) => Ok(HttpResponse::Ok().json(ApiResponse::success(row))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/activities/{user_id}",
    tag = "user",
    params(("user_id" = String, Path, description = "Business-level user id")),
    responses(
        (status = 200, description = "Activities for the user, newest first (possibly empty)", body = [UserActivityResponse])
    )
)]
pub async fn list_user_activities(
    user_service: web::Data<UserActivityService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match user_service.list_for_user(&path.into_inner()).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::list(rows))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "user",
    params(("id" = i64, Path, description = "Row id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated record", body = UserActivityResponse),
        (status = 400, description = "No allowed field supplied"),
        (status = 404, description = "No such row")
    )
)]
pub async fn update_user(
    user_service: web::Data<UserActivityService>,
    path: web::Path<i64>,
    payload: web::Json<Map<String, Value>>,
) -> Result<HttpResponse> {
    match user_service
        .update_user(path.into_inner(), payload.into_inner())
        .await
    {
        Ok(row) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            row,
            "User updated successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "user",
    params(("id" = i64, Path, description = "Row id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "No such row")
    )
)]
pub async fn delete_user(
    user_service: web::Data<UserActivityService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match user_service.delete_user(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("User deleted successfully"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::post().to(create_activity))
            .route("", web::get().to(list_activities))
            .route("/activities/{user_id}", web::get().to(list_user_activities))
            .route("/{id}", web::get().to(get_activity))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
