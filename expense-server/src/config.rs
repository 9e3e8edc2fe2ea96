//! Command-line and environment configuration
//!
//! Every flag can also come from the environment (and from a `.env` file,
//! loaded by the binary before parsing).

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;
use crate::http::ServerConfig;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set; pass --database-url or use --in-memory")]
    MissingDatabaseUrl,

    #[error("invalid bind address '{addr}'")]
    InvalidBindAddr { addr: String },
}

/// Server command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "expense-server", version, about = "Record and query expenses over HTTP")]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 2565)]
    pub port: u16,

    /// Bind address
    #[arg(short, long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    pub bind: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout: u64,

    /// Keep expenses in process memory instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,

    /// Debug logging (unless RUST_LOG is set)
    #[arg(long)]
    pub debug: bool,
}

/// Where expenses are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { url: String, max_connections: u32 },
    Memory,
}

impl ServerArgs {
    /// Resolve the storage backend. `--in-memory` wins over a database URL.
    pub fn storage(&self) -> Result<StorageBackend, ConfigError> {
        if self.in_memory {
            return Ok(StorageBackend::Memory);
        }

        match &self.database_url {
            Some(url) if !url.trim().is_empty() => Ok(StorageBackend::Postgres {
                url: url.clone(),
                max_connections: self.max_connections,
            }),
            _ => Err(ConfigError::MissingDatabaseUrl),
        }
    }

    /// HTTP server settings.
    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        let ip: IpAddr = self
            .bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr {
                addr: self.bind.clone(),
            })?;

        Ok(ServerConfig {
            bind_addr: SocketAddr::new(ip, self.port),
            request_timeout: Duration::from_secs(self.request_timeout),
        })
    }
}
