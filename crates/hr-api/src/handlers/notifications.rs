//! Notification inbox handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use hr_models::Notification;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser};

/// GET /api/notifications
pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<Notification>>> {
    Ok(Json(state.services.notifier.list(&user).await?))
}

/// POST /api/notifications/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Notification>> {
    Ok(Json(state.services.notifier.mark_read(&user, id).await?))
}
