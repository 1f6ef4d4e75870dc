//! Absence and discipline handlers.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use hr_core::parse_date;
use hr_models::{AbsenceWarning, DisciplineFlag, Employee};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Deserialize)]
pub struct WarningBody {
    pub employee_id: i64,
    pub date: String,
    #[serde(default)]
    pub comment: String,
}

/// GET /api/absences/yesterday
pub async fn absences_yesterday(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<Employee>>> {
    let yesterday = Utc::now().date_naive() - Duration::days(1);
    let absent = state
        .services
        .discipline
        .absent_employees(&user, yesterday)
        .await?;
    Ok(Json(absent))
}

/// POST /api/warnings
pub async fn issue_warning(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<WarningBody>,
) -> ApiResult<(StatusCode, Json<AbsenceWarning>)> {
    let date = parse_date(&body.date)?;
    let warning = state
        .services
        .discipline
        .issue_warning(&user, body.employee_id, date, body.comment, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(warning)))
}

/// GET /api/discipline/flags
pub async fn flags(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<DisciplineFlag>>> {
    let flags = state
        .services
        .discipline
        .current_flags(&user, Utc::now().date_naive())
        .await?;
    Ok(Json(flags))
}
