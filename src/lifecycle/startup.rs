//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize the upstream client and HTTP server from a validated config
//! - Start the metrics exporter when enabled
//! - Bind the listener last, once everything else is ready
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{AppConfig, ConfigError};
use crate::employees::ClientInitError;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Errors that stop the facade from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("upstream client error: {0}")]
    Client(#[from] ClientInitError),

    #[error("metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start every subsystem and serve until `shutdown` is triggered.
pub async fn run(config: AppConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        // validated earlier, so the parse only fails on a config built in code
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        metrics::init_metrics(addr)?;
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
