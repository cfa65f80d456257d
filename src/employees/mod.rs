//! Employee records subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (validate, build upstream URL, call upstream)
//!     → model.rs (unwrap {status, data} envelope)
//!     → queries.rs (optional: filter / max / top-N over the list)
//!     → result or one EmployeeError kind (error.rs)
//! ```
//!
//! # Constraints
//! - Every read is a fresh upstream call; nothing is cached
//! - A failed call never yields a partial list
//! - No operation retries on its own

pub mod client;
pub mod error;
pub mod model;
pub mod queries;

pub use client::{ClientInitError, EmployeeClient, Operation};
pub use error::{EmployeeError, EmployeeResult};
pub use model::{CreateEmployeeRequest, Employee, Envelope, NewEmployee, NumericValue};
