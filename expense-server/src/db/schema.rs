//! Schema bootstrap for the expenses table
//!
//! Idempotent `CREATE TABLE IF NOT EXISTS`; there is no versioned migration
//! history.

use sqlx::PgPool;

/// Table definition applied at startup.
pub const CREATE_EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id BIGSERIAL PRIMARY KEY,
    title TEXT,
    amount FLOAT8,
    note TEXT,
    tags TEXT[]
)
"#;

/// Ensure the expenses table exists.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_EXPENSES_TABLE).execute(pool).await?;
    tracing::info!("Expenses table ready");
    Ok(())
}
