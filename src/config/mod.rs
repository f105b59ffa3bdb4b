//! Server configuration.
//!
//! Built by `main` from command-line flags and environment variables; the
//! library itself never reads the environment.

use anyhow::{Context, Result};
use std::net::SocketAddr;

use crate::consts::{DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_PORT, default_max_workers};
use crate::engine::concurrent::OutputOrder;

/// Everything needed to bind and run the sorting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on concurrently running sort tasks.
    pub max_workers: usize,
    pub order: OutputOrder,
    /// Request body cap in bytes. `None` means unlimited.
    pub max_body_bytes: Option<usize>,
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_workers: default_max_workers(),
            order: OutputOrder::default(),
            max_body_bytes: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Parse `host:port` into a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .with_context(|| format!("invalid bind address: {}", raw))
    }
}
