use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::{Map, Value};

use crate::models::*;
use crate::services::DonorService;

#[utoipa::path(
    get,
    path = "/donors",
    tag = "donor",
    responses(
        (status = 200, description = "All donors, newest first", body = [DonorResponse]),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_donors(donor_service: web::Data<DonorService>) -> Result<HttpResponse> {
    match donor_service.list_donors().await {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::list(rows))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/donors/search",
    tag = "donor",
    params(
        ("bloodType" = Option<String>, Query, description = "Exact blood type, e.g. O+"),
        ("district" = Option<String>, Query, description = "Exact district name")
    ),
    responses(
        (status = 200, description = "Donors matching every supplied filter", body = [DonorResponse])
    )
)]
pub async fn search_donors(
    donor_service: web::Data<DonorService>,
    query: web::Query<DonorSearchQuery>,
) -> Result<HttpResponse> {
    match donor_service.search_donors(&query).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::list(rows))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/donors/{id}",
    tag = "donor",
    params(("id" = i64, Path, description = "Donor id")),
    responses(
        (status = 200, description = "Donor", body = DonorResponse),
        (status = 404, description = "No such donor")
    )
)]
pub async fn get_donor(
    donor_service: web::Data<DonorService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match donor_service.get_donor(path.into_inner()).await {
        Ok(donor) => Ok(HttpResponse::Ok().json(ApiResponse::success(donor))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/donors",
    tag = "donor",
    request_body = CreateDonorRequest,
    responses(
        (status = 201, description = "Donor registered", body = CreatedDonorResponse),
        (status = 400, description = "Missing fields or duplicate email"),
        (status = 500, description = "Database error")
    )
)]
pub async fn create_donor(
    donor_service: web::Data<DonorService>,
    request: web::Json<CreateDonorRequest>,
) -> Result<HttpResponse> {
    match donor_service.register_donor(request.into_inner()).await {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            created,
            "Donor registered successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/donors/{id}",
    tag = "donor",
    params(("id" = i64, Path, description = "Donor id")),
    request_body = UpdateDonorRequest,
    responses(
        (status = 200, description = "Updated donor", body = DonorResponse),
        (status = 400, description = "No allowed field supplied or bad value"),
        (status = 404, description = "No such donor")
    )
)]
pub async fn update_donor(
    donor_service: web::Data<DonorService>,
    path: web::Path<i64>,
    payload: web::Json<Map<String, Value>>,
) -> Result<HttpResponse> {
    match donor_service
        .update_donor(path.into_inner(), payload.into_inner())
        .await
    {
        Ok(donor) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            donor,
            "Donor updated successfully",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/donors/{id}",
    tag = "donor",
    params(("id" = i64, Path, description = "Donor id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "No such donor")
    )
)]
pub async fn delete_donor(
    donor_service: web::Data<DonorService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match donor_service.delete_donor(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Donor deleted successfully"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn donor_config(cfg: &mut web::ServiceConfig) {
    // /search 必须先于 /{id} 注册
    cfg.service(
        web::scope("/donors")
            .route("", web::get().to(list_donors))
            .route("", web::post().to(create_donor))
            .route("/search", web::get().to(search_donors))
            .route("/{id}", web::get().to(get_donor))
            .route("/{id}", web::put().to(update_donor))
            .route("/{id}", web::delete().to(delete_donor)),
    );
}
