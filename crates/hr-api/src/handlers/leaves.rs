//! Leave request handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use hr_models::{LeaveRequest, LeaveType};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Deserialize)]
pub struct SubmitBody {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub leave_type: Option<LeaveType>,
    #[serde(default)]
    pub reason: String,
    pub attachment: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DecisionBody {
    #[serde(default)]
    pub comment: String,
}

/// POST /api/leaves
pub async fn submit(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<SubmitBody>,
) -> ApiResult<(StatusCode, Json<LeaveRequest>)> {
    let params = hr_services::leaves::SubmitLeave {
        start_date: body.start_date,
        end_date: body.end_date,
        leave_type: body.leave_type,
        reason: body.reason,
        attachment: body.attachment,
    };
    let leave = state
        .services
        .leaves
        .submit(&user, params, Utc::now().date_naive())
        .await?;
    Ok((StatusCode::CREATED, Json(leave)))
}

/// POST /api/leaves/:id/approve
pub async fn approve(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(body): Json<DecisionBody>,
) -> ApiResult<Json<LeaveRequest>> {
    let leave = state
        .services
        .leaves
        .decide(&user, id, true, body.comment, Utc::now())
        .await?;
    Ok(Json(leave))
}

/// POST /api/leaves/:id/reject
pub async fn reject(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(body): Json<DecisionBody>,
) -> ApiResult<Json<LeaveRequest>> {
    let leave = state
        .services
        .leaves
        .decide(&user, id, false, body.comment, Utc::now())
        .await?;
    Ok(Json(leave))
}

/// GET /api/leaves/me
pub async fn mine(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<LeaveRequest>>> {
    Ok(Json(state.services.leaves.my_leaves(&user).await?))
}

/// GET /api/leaves/department
pub async fn department(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<LeaveRequest>>> {
    Ok(Json(state.services.leaves.department_leaves(&user).await?))
}
