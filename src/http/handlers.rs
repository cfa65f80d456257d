//! Local employee API handlers.
//!
//! Each handler makes at most one upstream call through the shared
//! `EmployeeClient` and turns failures into responses via `EmployeeError`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::employees::{CreateEmployeeRequest, Employee, EmployeeError, EmployeeResult};
use crate::http::server::AppState;

/// Size of the top earners listing.
pub const TOP_EARNERS_LIMIT: usize = 10;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn list_employees(State(state): State<AppState>) -> EmployeeResult<Json<Vec<Employee>>> {
    tracing::info!("Fetching all employees");
    let employees = state.client.list_all().await?;
    tracing::info!(count = employees.len(), "Retrieved employees");
    Ok(Json(employees))
}

pub async fn search_employees(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> EmployeeResult<Json<Vec<Employee>>> {
    require_non_blank(&query, "Search string")?;
    tracing::info!(query = %query, "Searching employees by name");
    let employees = state.client.search_by_name(&query).await?;
    tracing::info!(count = employees.len(), "Found employees matching the search");
    Ok(Json(employees))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> EmployeeResult<Json<Employee>> {
    require_non_blank(&id, "ID")?;
    tracing::info!(id = %id, "Fetching employee by ID");
    let employee = state.client.get_by_id(&id).await?;
    Ok(Json(employee))
}

pub async fn highest_salary(State(state): State<AppState>) -> EmployeeResult<Json<u64>> {
    tracing::info!("Fetching highest salary of employees");
    let salary = state.client.highest_salary().await?;
    tracing::info!(salary, "Highest salary found");
    Ok(Json(salary))
}

pub async fn top_ten_names(State(state): State<AppState>) -> EmployeeResult<Json<Vec<String>>> {
    tracing::info!("Fetching top earning employee names");
    let names = state.client.top_n_by_earning(TOP_EARNERS_LIMIT).await?;
    tracing::info!(names = ?names, "Top earning employee names");
    Ok(Json(names))
}

/// Create an employee; a body cut off by the size limit keeps its 413.
pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::BytesRejection(rejection)) => {
            tracing::warn!(status = %rejection.status(), "Create body could not be read");
            return rejection.into_response();
        }
        Err(rejection) => {
            return EmployeeError::InvalidArgument(rejection.body_text()).into_response();
        }
    };
    create(&state, request).await.into_response()
}

async fn create(
    state: &AppState,
    request: CreateEmployeeRequest,
) -> EmployeeResult<(StatusCode, Json<Employee>)> {
    let (name, salary, age) = request.into_fields()?;
    tracing::info!(name = %name, salary, age, "Creating employee");

    let employee = state.client.create(&name, salary, age).await?;
    tracing::info!(id = ?employee.id, "Employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> EmployeeResult<String> {
    require_non_blank(&id, "ID")?;
    tracing::info!(id = %id, "Deleting employee");
    let message = state.client.delete_by_id(&id).await?;
    tracing::info!(message = %message, "Employee deleted");
    Ok(message)
}

/// `/api/employees/search/` with nothing after the slash.
pub async fn empty_search() -> EmployeeResult<()> {
    require_non_blank("", "Search string")
}

/// `/api/employees/` with nothing after the slash.
pub async fn empty_id() -> EmployeeResult<()> {
    require_non_blank("", "ID")
}

fn require_non_blank(value: &str, what: &str) -> EmployeeResult<()> {
    if value.trim().is_empty() {
        return Err(EmployeeError::InvalidArgument(format!("{} cannot be empty", what)));
    }
    Ok(())
}
