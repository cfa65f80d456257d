//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the employee client produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span
//! - Metrics are recorded even when no exporter is installed

pub mod logging;
pub mod metrics;
