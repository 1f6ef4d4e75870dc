//! Employee directory handlers.

use axum::{extract::State, Json};
use hr_models::Employee;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser};

/// GET /api/employees
pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<Employee>>> {
    let employees = state.services.employees.list(&user).await?;
    Ok(Json(employees))
}
