//! HR backend server binary.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hr_api::AppState;
use hr_core::config::AppConfig;
use hr_db::{Database, PgStore};
use hr_services::{MemoryStore, Store};

mod health;

use health::HealthState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        "starting hr-server"
    );

    // Fall back to the in-memory store when the database is unreachable,
    // so the API stays usable in development.
    let (store, pool): (Arc<dyn Store>, _) = match Database::connect(&config.database).await {
        Ok(db) => {
            info!("connected to database");
            let pool = db.pool().clone();
            (Arc::new(PgStore::new(pool.clone())), Some(pool))
        }
        Err(e) => {
            tracing::warn!("database unavailable ({e}), using in-memory store");
            (Arc::new(MemoryStore::new()), None)
        }
    };

    let state = AppState::new(store, config.auth.jwt_secret.clone());
    let app = build_router(state, HealthState { pool });

    let addr = config.server_addr();
    info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hr_server=debug,hr_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

fn build_router(state: AppState, health_state: HealthState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .with_state(health_state);

    health_routes.merge(hr_api::router(state)).layer(
        ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        ),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
