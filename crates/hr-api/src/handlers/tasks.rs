//! Task handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use hr_models::Task;
use hr_services::tasks::CreateTask;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Deserialize)]
pub struct CreateBody {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub assigned_to: i64,
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateBody>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let params = CreateTask {
        title: body.title,
        description: body.description,
        due_date: body.due_date,
        assigned_to: body.assigned_to,
    };
    let task = state.services.tasks.create(&user, params, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks/me
pub async fn mine(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.services.tasks.my_tasks(&user).await?))
}

/// PATCH /api/tasks/:id/done
pub async fn done(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = state.services.tasks.complete(&user, id, Utc::now()).await?;
    Ok(Json(task))
}
