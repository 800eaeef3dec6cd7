//! Shared `PostgreSQL` connection pooling for the Diesel adapters.

use crate::config::StoreConfig;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool type shared by project and task adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool from store configuration.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened
/// within the configured timeout.
pub fn build_pool(config: &StoreConfig) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    let pool = Pool::builder()
        .max_size(config.pool_max_size)
        .connection_timeout(config.pool_timeout)
        .build(manager)?;
    tracing::info!(
        max_size = config.pool_max_size,
        "PostgreSQL connection pool ready"
    );
    Ok(pool)
}
