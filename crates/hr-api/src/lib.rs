//! # hr-api
//!
//! HTTP surface of the HR backend: `axum` handlers over the business
//! services, bearer-token authentication, and the JSON error mapping.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use extractors::{AppState, AuthenticatedUser, Services};
pub use routes::router;
