//! Response handling and transformation.
//!
//! # Responsibilities
//! - Map employee error kinds to HTTP status codes
//! - Render failures as plain-text bodies
//!
//! # Design Decisions
//! - Upstream failure classes keep fixed advisory messages
//! - Not-found and bad-request bodies carry the offending id or constraint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::employees::EmployeeError;

impl EmployeeError {
    /// Status code this error surfaces as at the API boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            EmployeeError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            EmployeeError::Network => StatusCode::SERVICE_UNAVAILABLE,
            EmployeeError::UpstreamServer => StatusCode::INTERNAL_SERVER_ERROR,
            EmployeeError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EmployeeError::NotFound(_) => StatusCode::NOT_FOUND,
            EmployeeError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            EmployeeError::NotFound(_) => format!("Resource not found: {}", self),
            EmployeeError::InvalidArgument(_) => format!("Bad request: {}", self),
            _ => self.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, message = %body, "Request failed");
        } else {
            tracing::warn!(status = %status, message = %body, "Request rejected");
        }

        (status, body).into_response()
    }
}
