//! Employee API facade library.

pub mod config;
pub mod employees;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use employees::{EmployeeClient, EmployeeError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
