use actix_web::{App, HttpServer, middleware::Logger, web};
use env_logger::{Env, Target};
use std::io::Write; // env_logger 自定义格式
use chrono::Local;  // 日志时间戳
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;

use blood_donor_backend::{
    config::Config,
    database::{create_pool, migrate_when_ready},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
};

const MIGRATION_RETRY_SECS: u64 = 10;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration");
    log::info!("Environment: {:?}", config.environment);

    // 数据库不可用时继续启动，请求各自失败；就绪后再执行迁移
    let pool = match create_pool(&config.database, config.environment) {
        Ok(pool) => {
            actix_web::rt::spawn(migrate_when_ready(
                pool.clone(),
                Duration::from_secs(MIGRATION_RETRY_SECS),
            ));
            pool
        }
        Err(e) => {
            log::error!("Failed to create database pool: {e}");
            Arc::new(DatabaseConnection::Disconnected)
        }
    };

    let user_service = UserActivityService::new(pool.clone());
    let donor_service = DonorService::new(pool.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::from(pool.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(donor_service.clone()))
            .configure(swagger_config)
            .configure(handlers::configure_routes)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
