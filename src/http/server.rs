//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, metrics)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::employees::{ClientInitError, EmployeeClient};
use crate::http::{handlers, request};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<EmployeeClient>,
}

impl AppState {
    pub fn new(client: EmployeeClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// HTTP server for the employee facade.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, ClientInitError> {
        let client = EmployeeClient::new(&config.upstream)?;
        let router = build_router(&config, AppState::new(client));
        Ok(Self { router, config })
    }

    /// Run the server until `shutdown` fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &AppConfig, state: AppState) -> Router {
    Router::new()
        .route(
            "/api/employees",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route("/api/employees/search/", get(handlers::empty_search))
        .route("/api/employees/search/{query}", get(handlers::search_employees))
        .route("/api/employees/highest-salary", get(handlers::highest_salary))
        .route(
            "/api/employees/top-ten-highest-earning-names",
            get(handlers::top_ten_names),
        )
        .route(
            "/api/employees/",
            get(handlers::empty_id).delete(handlers::empty_id),
        )
        .route(
            "/api/employees/{id}",
            get(handlers::get_employee).delete(handlers::delete_employee),
        )
        .route("/health", get(handlers::health))
        .route_layer(middleware::from_fn(metrics::track_requests))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(request::set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(request::make_request_span))
                .layer(request::propagate_request_id_layer())
                .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
}
