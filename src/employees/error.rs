//! Error kinds surfaced by employee operations.

use thiserror::Error;

/// Errors that can occur while serving an employee operation.
#[derive(Debug, Error)]
pub enum EmployeeError {
    /// Upstream rejected the call with a too-many-requests response.
    #[error("Too Many Requests: Please try again later. {base_url} allows 1 request per minute")]
    RateLimited { base_url: String },

    /// Upstream could not be reached (DNS, connect, timeout, broken body).
    #[error("Network issue: Please check your connection.")]
    Network,

    /// Upstream answered with a 5xx status.
    #[error("Server error: Please try again later.")]
    UpstreamServer,

    /// Any other failure while talking to upstream.
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// Upstream holds no employee with this id.
    #[error("Employee with ID {0} not found")]
    NotFound(String),

    /// Local validation rejected the input before any upstream call.
    #[error("{0}")]
    InvalidArgument(String),
}

impl EmployeeError {
    pub(crate) fn invalid(constraint: impl Into<String>) -> Self {
        Self::InvalidArgument(constraint.into())
    }
}

/// Result type for employee operations.
pub type EmployeeResult<T> = Result<T, EmployeeError>;
