//! Health endpoint.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;

/// State shared with the health route: the pool is absent when the server
/// runs on the in-memory store.
#[derive(Clone)]
pub struct HealthState {
    pub pool: Option<PgPool>,
}

#[derive(Serialize)]
pub struct HealthReport {
    status: &'static str,
    version: &'static str,
    database: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
}

/// GET /health
pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthReport>) {
    let database = match &state.pool {
        Some(pool) => match sqlx::query("SELECT 1").execute(pool).await {
            Ok(_) => "up",
            Err(e) => {
                tracing::warn!("health check database ping failed: {e}");
                "down"
            }
        },
        None => "in-memory",
    };

    let status = if database == "down" { "degraded" } else { "ok" };
    let code = if database == "down" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        code,
        Json(HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
            timestamp: chrono::Utc::now(),
        }),
    )
}
