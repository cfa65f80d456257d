//! Employee API facade.
//!
//! Serves a local REST API for employee records and answers every call by
//! delegating to a remote dummy-employee HTTP API.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │               EMPLOYEE FACADE                │
//!   Client Request      │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ────────────────────┼─▶│   http   │──▶│ handlers │──▶│ employee │──┼──▶ Upstream
//!                       │  │  server  │   │          │   │  client  │  │    employee
//!   Client Response     │  └──────────┘   └──────────┘   └────┬─────┘  │    API
//!   ◀───────────────────┼──── response.rs (error kind → status)◀┘       │
//!                       │                                              │
//!                       │  config · observability · lifecycle          │
//!                       └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use employee_facade::config::{read_config, validate_config, ConfigError};
use employee_facade::lifecycle::{startup, Shutdown, StartupError};
use employee_facade::observability::logging;

#[derive(Parser)]
#[command(name = "employee-facade")]
#[command(about = "REST facade over the dummy employee API", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply without one.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(long)]
    bind: Option<String>,

    /// Override `upstream.base_url`.
    #[arg(long)]
    upstream_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "employee-facade failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let mut config = read_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(url) = cli.upstream_url {
        config.upstream.base_url = url;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability);

    tracing::info!("employee-facade v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
