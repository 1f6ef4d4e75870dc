//! Document lifecycle handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use hr_models::{Document, DocumentHistory};
use hr_services::documents::{CommentDocument, UploadDocument};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::{AppState, AuthenticatedUser};

#[derive(Debug, Deserialize)]
pub struct UploadBody {
    pub title: String,
    pub doc_type_id: i64,
    pub file: String,
    pub source_department_id: Option<i64>,
    pub target_department_id: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SendBody {
    pub target_department_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub note: String,
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub is_private: bool,
}

/// POST /api/documents
pub async fn upload(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<UploadBody>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    let params = UploadDocument {
        title: body.title,
        doc_type_id: body.doc_type_id,
        file: body.file,
        source_department_id: body.source_department_id,
        target_department_id: body.target_department_id,
    };
    let document = state
        .services
        .documents
        .upload(&user, params, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/documents/me
pub async fn mine(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<Document>>> {
    Ok(Json(state.services.documents.list(&user).await?))
}

/// POST /api/documents/:id/send
pub async fn send(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(body): Json<SendBody>,
) -> ApiResult<Json<Document>> {
    let document = state
        .services
        .documents
        .send(&user, id, body.target_department_id, Utc::now())
        .await?;
    Ok(Json(document))
}

/// POST /api/documents/:id/comment
pub async fn comment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(body): Json<CommentBody>,
) -> ApiResult<(StatusCode, Json<DocumentHistory>)> {
    let params = CommentDocument {
        note: body.note,
        parent_id: body.parent_id,
        is_private: body.is_private,
    };
    let entry = state
        .services
        .documents
        .comment(&user, id, params, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /api/documents/:id/validate
pub async fn validate(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Document>> {
    let document = state
        .services
        .documents
        .validate(&user, id, Utc::now())
        .await?;
    Ok(Json(document))
}

/// POST /api/documents/:id/archive
pub async fn archive(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Document>> {
    let document = state
        .services
        .documents
        .archive(&user, id, Utc::now())
        .await?;
    Ok(Json(document))
}

/// GET /api/documents/:id/history
pub async fn history(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<DocumentHistory>>> {
    Ok(Json(state.services.documents.history(&user, id).await?))
}
