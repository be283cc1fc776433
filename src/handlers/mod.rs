use actix_web::web;

use crate::error::AppError;

#[cfg(test)]
macro_rules! test_app {
    ($db:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(
                    $crate::services::UserActivityService::new(std::sync::Arc::clone(&$db)),
                ))
                .app_data(actix_web::web::Data::new(
                    $crate::services::DonorService::new(std::sync::Arc::clone(&$db)),
                ))
                .configure($crate::handlers::configure_routes),
        )
        .await
    };
}

pub mod donor;
pub mod root;
pub mod user;

pub use donor::donor_config;
pub use root::root_config;
pub use user::user_config;

/// 请求体、路径参数解析失败统一返回 400 信封
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid JSON body: {err}")).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid path parameter: {err}")).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid query string: {err}")).into()
    }));
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(extractor_config)
        .configure(root_config)
        .configure(user_config)
        .configure(donor_config);
}
