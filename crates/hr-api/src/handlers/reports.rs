//! Reporting handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use hr_services::reports::ReportSummary;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser};

use super::RangeQuery;

/// GET /api/reports/summary
pub async fn summary(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(range): Query<RangeQuery>,
) -> ApiResult<Json<ReportSummary>> {
    let summary = state
        .services
        .reports
        .summary(
            &user,
            range.from.as_deref(),
            range.to.as_deref(),
            Utc::now().date_naive(),
        )
        .await?;
    Ok(Json(summary))
}
