use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::ActivityType;
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root::liveness,
        handlers::root::health,
        handlers::user::create_activity,
        handlers::user::list_activities,
        handlers::user::get_activity,
        handlers::user::list_user_activities,
        handlers::user::update_user,
        handlers::user::delete_user,
        handlers::donor::list_donors,
        handlers::donor::search_donors,
        handlers::donor::get_donor,
        handlers::donor::create_donor,
        handlers::donor::update_donor,
        handlers::donor::delete_donor,
    ),
    components(
        schemas(
            ActivityType,
            CreateActivityRequest,
            CreatedActivityResponse,
            UserActivityResponse,
            UpdateUserRequest,
            CreateDonorRequest,
            CreatedDonorResponse,
            DonorResponse,
            UpdateDonorRequest,
            DonorSearchQuery,
            HealthStatus,
        )
    ),
    tags(
        (name = "health", description = "Liveness and database probe"),
        (name = "user", description = "User login/registration activity API"),
        (name = "donor", description = "Blood donor registry API"),
    ),
    info(
        title = "Blood Donor Gateway API",
        version = "1.0.0",
        description = "CRUD gateway for user activity records and blood donors"
    ),
    servers(
        (url = "/", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/health",
            "/users",
            "/users/{id}",
            "/users/activities/{user_id}",
            "/donors",
            "/donors/{id}",
            "/donors/search",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
