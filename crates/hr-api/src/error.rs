//! HTTP error mapping.
//!
//! Every business-rule failure surfaces as structured JSON
//! `{ "detail": ..., "kind": ... }` with the status carried by the domain
//! error; storage and internal errors are logged and masked.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hr_core::HrError;
use serde::Serialize;

/// Handler error wrapping the domain taxonomy.
#[derive(Debug)]
pub struct ApiError(pub HrError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<HrError> for ApiError {
    fn from(err: HrError) -> Self {
        ApiError(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
    kind: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let detail = match &self.0 {
            HrError::Database(detail) | HrError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            detail,
            kind: self.0.kind(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let resp = ApiError(HrError::validation("bad date")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError(HrError::InvalidPin).into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = ApiError(HrError::unauthenticated("no token")).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_detail_is_masked() {
        let resp = ApiError(HrError::Database("connection refused".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
