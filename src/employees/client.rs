//! Upstream employee API client.
//!
//! # Responsibilities
//! - Build upstream URLs from the configured base
//! - Unwrap the `{status, data}` envelope
//! - Classify every upstream failure once, where the call is made
//! - Run the derived list queries over a single fetch
//!
//! # Design Decisions
//! - No retries: a rate-limited call is surfaced to the caller as-is
//! - Local validation runs before any request is built
//! - Holds no application state, so one instance is shared by all requests

use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;
use crate::employees::error::{EmployeeError, EmployeeResult};
use crate::employees::model::{Employee, Envelope, NewEmployee};
use crate::employees::queries;
use crate::observability::metrics;

/// Upstream call kinds, used as log and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListAll,
    GetById,
    Create,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::ListAll => "list_all",
            Operation::GetById => "get_by_id",
            Operation::Create => "create",
            Operation::Delete => "delete",
        }
    }
}

/// Errors raised while constructing the client.
#[derive(Debug, Error)]
pub enum ClientInitError {
    #[error("invalid upstream base URL '{url}': {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for the upstream employee API.
#[derive(Clone)]
pub struct EmployeeClient {
    http: Client,
    base_url: Url,
}

impl EmployeeClient {
    /// Create a client for the configured upstream.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ClientInitError> {
        let base_url = Url::parse(&config.base_url).map_err(|source| ClientInitError::BaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        tracing::info!(
            base_url = %base_url,
            connect_timeout_secs = config.connect_timeout_secs,
            request_timeout_secs = config.request_timeout_secs,
            "Employee client initialized"
        );

        Ok(Self { http, base_url })
    }

    /// Base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Every employee, in upstream order.
    pub async fn list_all(&self) -> EmployeeResult<Vec<Employee>> {
        self.observe(Operation::ListAll, self.fetch_all()).await
    }

    /// Employees whose name contains `fragment`, case-insensitively.
    pub async fn search_by_name(&self, fragment: &str) -> EmployeeResult<Vec<Employee>> {
        let employees = self.list_all().await?;
        let matches = queries::filter_by_name(employees, fragment);
        tracing::debug!(fragment, matched = matches.len(), "Name search complete");
        Ok(matches)
    }

    /// Look up one employee; `None` when upstream has no such record.
    pub async fn find_by_id(&self, id: &str) -> EmployeeResult<Option<Employee>> {
        let id = require_id(id)?;
        self.observe(Operation::GetById, self.fetch_one(id)).await
    }

    /// Look up one employee, failing with `NotFound` when absent.
    pub async fn get_by_id(&self, id: &str) -> EmployeeResult<Employee> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| EmployeeError::NotFound(id.to_string()))
    }

    /// Highest salary across all employees, `0` when there are none.
    pub async fn highest_salary(&self) -> EmployeeResult<u64> {
        let employees = self.list_all().await?;
        Ok(queries::highest_salary(&employees))
    }

    /// Names of the `n` best paid employees, highest first.
    pub async fn top_n_by_earning(&self, n: usize) -> EmployeeResult<Vec<String>> {
        let employees = self.list_all().await?;
        Ok(queries::top_earning_names(employees, n))
    }

    /// Validate and create an employee upstream, returning the stored record.
    pub async fn create(&self, name: &str, salary: i64, age: i64) -> EmployeeResult<Employee> {
        let employee = NewEmployee::new(name, salary, age)?;
        self.observe(Operation::Create, self.post_create(&employee)).await
    }

    /// Delete an employee upstream, returning a confirmation message.
    pub async fn delete_by_id(&self, id: &str) -> EmployeeResult<String> {
        let id = require_id(id)?;
        self.observe(Operation::Delete, self.send_delete(id)).await
    }

    async fn fetch_all(&self) -> EmployeeResult<Vec<Employee>> {
        let op = Operation::ListAll;
        let url = self.endpoint(&["employees"])?;
        let response = self.send(op, self.http.get(url)).await?;
        let envelope: Envelope<Vec<Employee>> = self.decode(op, response).await?;
        envelope.data.ok_or_else(|| {
            tracing::error!(operation = op.as_str(), "Upstream returned no employee list");
            EmployeeError::Unexpected("upstream returned no employee list".to_string())
        })
    }

    async fn fetch_one(&self, id: &str) -> EmployeeResult<Option<Employee>> {
        let op = Operation::GetById;
        let url = self.endpoint(&["employee", id])?;
        let response = self.dispatch(op, self.http.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::warn!(id, "Upstream has no employee with this ID");
            return Ok(None);
        }
        let response = self.ensure_success(op, response)?;
        let envelope: Envelope<Employee> = self.decode(op, response).await?;
        if envelope.data.is_none() {
            tracing::warn!(id, "Upstream returned an empty employee record");
        }
        Ok(envelope.data)
    }

    async fn post_create(&self, employee: &NewEmployee) -> EmployeeResult<Employee> {
        let op = Operation::Create;
        tracing::info!(
            name = %employee.name,
            salary = employee.salary,
            age = employee.age,
            "Creating employee upstream"
        );
        let url = self.endpoint(&["create"])?;
        let response = self.send(op, self.http.post(url).json(employee)).await?;
        let envelope: Envelope<Employee> = self.decode(op, response).await?;
        envelope.data.ok_or_else(|| {
            tracing::error!(operation = op.as_str(), "Upstream did not echo the created employee");
            EmployeeError::Unexpected("upstream did not return the created employee".to_string())
        })
    }

    async fn send_delete(&self, id: &str) -> EmployeeResult<String> {
        let url = self.endpoint(&["delete", id])?;
        self.send(Operation::Delete, self.http.delete(url)).await?;
        Ok(format!("Employee with ID {} deleted successfully.", id))
    }

    fn endpoint(&self, segments: &[&str]) -> EmployeeResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                EmployeeError::Unexpected(format!("base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn observe<T>(
        &self,
        op: Operation,
        call: impl Future<Output = EmployeeResult<T>>,
    ) -> EmployeeResult<T> {
        let start = Instant::now();
        let result = call.await;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => error_kind(e),
        };
        metrics::record_upstream_call(op.as_str(), outcome, start);
        result
    }

    async fn send(&self, op: Operation, request: RequestBuilder) -> EmployeeResult<Response> {
        let response = self.dispatch(op, request).await?;
        self.ensure_success(op, response)
    }

    async fn dispatch(&self, op: Operation, request: RequestBuilder) -> EmployeeResult<Response> {
        tracing::debug!(operation = op.as_str(), "Calling upstream");
        request
            .send()
            .await
            .map_err(|e| self.classify_transport(op, e))
    }

    fn ensure_success(&self, op: Operation, response: Response) -> EmployeeResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(self.classify_status(op, status))
        }
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        op: Operation,
        response: Response,
    ) -> EmployeeResult<Envelope<T>> {
        response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| self.classify_transport(op, e))
    }

    fn classify_status(&self, op: Operation, status: StatusCode) -> EmployeeError {
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::error!(operation = op.as_str(), %status, "Too many requests to upstream");
            EmployeeError::RateLimited {
                base_url: self.base_url.to_string(),
            }
        } else if status.is_server_error() {
            tracing::error!(operation = op.as_str(), %status, "Upstream server error");
            EmployeeError::UpstreamServer
        } else {
            tracing::error!(operation = op.as_str(), %status, "Unexpected upstream status");
            EmployeeError::Unexpected(format!("upstream responded with {}", status))
        }
    }

    fn classify_transport(&self, op: Operation, error: reqwest::Error) -> EmployeeError {
        if error.is_timeout() || error.is_connect() || error.is_request() || error.is_body() {
            tracing::error!(operation = op.as_str(), error = %error, "Network issue reaching upstream");
            EmployeeError::Network
        } else {
            tracing::error!(operation = op.as_str(), error = %error, "Unexpected upstream failure");
            EmployeeError::Unexpected(error.to_string())
        }
    }
}

impl std::fmt::Debug for EmployeeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

fn require_id(id: &str) -> EmployeeResult<&str> {
    if id.trim().is_empty() {
        return Err(EmployeeError::invalid("ID cannot be empty"));
    }
    Ok(id)
}

fn error_kind(error: &EmployeeError) -> &'static str {
    match error {
        EmployeeError::RateLimited { .. } => "rate_limited",
        EmployeeError::Network => "network",
        EmployeeError::UpstreamServer => "upstream_server",
        EmployeeError::Unexpected(_) => "unexpected",
        EmployeeError::NotFound(_) => "not_found",
        EmployeeError::InvalidArgument(_) => "invalid_argument",
    }
}
