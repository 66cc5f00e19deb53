use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use crate::config::Config;

/// The database handle carried by the environment.
///
/// `MySqlPool` is `Arc`-backed, so cloning it shares the same pool.
pub type Db = MySqlPool;

pub async fn connect(config: &Config) -> anyhow::Result<Db> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url())
        .await?;

    tracing::info!(
        host = %config.db_host,
        database = %config.db_name,
        max_connections = config.db_max_connections,
        "Database connection pool established"
    );
    Ok(pool)
}

/// Liveness probe: one round trip on a pooled connection.
pub async fn ping(pool: &Db) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
