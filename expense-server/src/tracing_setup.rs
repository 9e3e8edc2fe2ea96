//! Tracing setup for expense-server
//!
//! Usage:
//!   expense-server --debug ...                  # Debug logging to console
//!   RUST_LOG=expense_server=debug expense-server  # Fine-grained log control

use tracing_subscriber::EnvFilter;

/// Initialize console tracing. RUST_LOG takes precedence over `debug`.
pub fn init_tracing(debug: bool) -> anyhow::Result<()> {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
