//! Identity echo endpoint.

use axum::Json;
use hr_auth::Principal;

use crate::error::ApiResult;
use crate::extractors::AuthenticatedUser;

/// GET /api/whoami
pub async fn whoami(user: AuthenticatedUser) -> ApiResult<Json<Principal>> {
    Ok(Json(user.0))
}
