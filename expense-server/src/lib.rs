//! expense-server: HTTP service for recording expenses
//!
//! Create, fetch and update expense records stored in PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod state;
pub mod tracing_setup;

pub use config::{ServerArgs, StorageBackend};
pub use error::{Result, ServerError};
pub use models::Expense;
pub use state::AppState;

use db::{create_pool, schema, MemoryExpenseRepo, PgExpenseRepo};

/// Connect storage and serve until shutdown.
pub async fn serve(args: ServerArgs) -> Result<()> {
    let config = args.server_config()?;

    let state = match args.storage()? {
        StorageBackend::Postgres {
            url,
            max_connections,
        } => {
            let pool = create_pool(&url, max_connections).await?;
            tracing::info!(max_connections, "Connected to PostgreSQL");
            schema::ensure_schema(&pool).await?;
            AppState::new(PgExpenseRepo::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; expenses are lost on exit");
            AppState::new(MemoryExpenseRepo::new())
        }
    };

    http::run_server(state, config).await
}
