use std::sync::Arc;
use std::time::Duration;

use crate::config::{DatabaseConfig, Environment};
use crate::error::{AppError, AppResult};
use migration::{Migrator, MigratorTrait};
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::PgPoolOptions;

pub type DbPool = Arc<DatabaseConnection>;

/// 惰性建池：连接在首次使用时才建立，数据库不可用不阻止启动
pub fn create_pool(config: &DatabaseConfig, environment: Environment) -> AppResult<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(&config.connection_url(environment))
        .map_err(|e| AppError::ConfigError(format!("Invalid database url: {e}")))?;

    Ok(Arc::new(SqlxPostgresConnector::from_sqlx_postgres_pool(pool)))
}

pub async fn check_connection(pool: &DatabaseConnection) -> AppResult<()> {
    pool.ping().await?;
    Ok(())
}

pub async fn run_migrations(pool: &DatabaseConnection) -> AppResult<()> {
    Migrator::up(pool, None).await?;
    Ok(())
}

/// 等待数据库可用后执行迁移；启动时数据库未就绪则按间隔重试
pub async fn migrate_when_ready(pool: DbPool, retry_interval: Duration) {
    loop {
        match check_connection(&pool).await {
            Ok(()) => {
                log::info!("Connected to database");
                if let Err(e) = run_migrations(&pool).await {
                    log::error!("Failed to run database migrations: {e}");
                }
                return;
            }
            Err(e) => {
                log::warn!(
                    "Database not reachable, retrying in {}s: {e}",
                    retry_interval.as_secs()
                );
                tokio::time::sleep(retry_interval).await;
            }
        }
    }
}

/// 测试辅助：把 mock 数据库包装成连接池
#[cfg(test)]
pub(crate) fn mock_pool(mock: sea_orm::MockDatabase) -> DbPool {
    Arc::new(mock.into_connection())
}

/// 测试辅助：取出 mock 连接记录的全部语句
#[cfg(test)]
pub(crate) fn transaction_log(pool: &DatabaseConnection) -> Vec<sea_orm::Transaction> {
    // `get_mocker_mutex` is crate-private in sea-orm; drain via a second handle to the same mock
    match pool {
        DatabaseConnection::MockDatabaseConnection(conn) => {
            DatabaseConnection::MockDatabaseConnection(Arc::clone(conn)).into_transaction_log()
        }
        _ => panic!("Not mock connection"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pool_creation_does_not_need_a_reachable_database() {
        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..DatabaseConfig::default()
        };
        assert!(create_pool(&config, Environment::Development).is_ok());
    }

    #[tokio::test]
    async fn malformed_url_is_a_config_error() {
        let config = DatabaseConfig {
            url: Some("not a database url".to_string()),
            ..DatabaseConfig::default()
        };
        assert!(matches!(
            create_pool(&config, Environment::Development),
            Err(AppError::ConfigError(_))
        ));
    }
}
