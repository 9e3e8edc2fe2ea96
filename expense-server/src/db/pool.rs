//! PostgreSQL pool for the expenses table

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default cap on pooled connections, shared by every request.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// How long a request waits for a free connection before the driver errors.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect a bounded pool to `database_url`.
///
/// Acquire timeouts surface as ordinary `sqlx::Error`s, so a saturated pool
/// reaches clients as a 500 with the driver text.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}
