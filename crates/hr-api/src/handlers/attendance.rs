//! PIN-gated attendance handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use hr_models::Attendance;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser};

use super::RangeQuery;

#[derive(Debug, Deserialize)]
pub struct PinBody {
    pub pin: Option<String>,
}

/// POST /api/attendance/check-in
pub async fn check_in(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<PinBody>,
) -> ApiResult<Json<Attendance>> {
    let row = state
        .services
        .attendance
        .check_in(&user, body.pin.as_deref(), Utc::now())
        .await?;
    Ok(Json(row))
}

/// POST /api/attendance/check-out
pub async fn check_out(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<PinBody>,
) -> ApiResult<Json<Attendance>> {
    let row = state
        .services
        .attendance
        .check_out(&user, body.pin.as_deref(), Utc::now())
        .await?;
    Ok(Json(row))
}

/// GET /api/attendance/me
pub async fn mine(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(range): Query<RangeQuery>,
) -> ApiResult<Json<Vec<Attendance>>> {
    let rows = state
        .services
        .attendance
        .my_attendance(
            &user,
            range.from.as_deref(),
            range.to.as_deref(),
            Utc::now().date_naive(),
        )
        .await?;
    Ok(Json(rows))
}
