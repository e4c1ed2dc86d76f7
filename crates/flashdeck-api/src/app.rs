//! Application builder: wires router, middleware and state into an Axum
//! app and serves it.

use tracing::info;

use flashdeck_core::config::AppConfig;
use flashdeck_core::error::AppError;
use flashdeck_database::{DatabasePool, Stores};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> axum::Router {
    build_router(state)
}

/// Runs the Flashdeck server over the given stores until Ctrl+C.
///
/// `db` is `None` when serving from the in-memory store.
pub async fn run_server(
    config: AppConfig,
    stores: Stores,
    db: Option<DatabasePool>,
) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let state = AppState::new(config, stores, db.clone());
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, in_memory = db.is_none(), "Flashdeck server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(db) = db {
        db.close().await;
    }

    info!("Flashdeck server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C; shutting down");
    }
    info!("Shutdown signal received");
}
