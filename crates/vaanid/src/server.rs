//! HTTP server for vaanid.

use crate::brain::Brain;
use crate::routes;
use crate::scanner::DueScanner;
use crate::store::ReminderStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use vaani_common::VaaniConfig;

/// Application state shared across handlers.
pub struct AppState {
    pub store: Arc<ReminderStore>,
    pub scanner: Arc<DueScanner>,
    pub brain: Arc<dyn Brain>,
    pub config: VaaniConfig,
}

impl AppState {
    pub fn new(
        store: Arc<ReminderStore>,
        scanner: Arc<DueScanner>,
        brain: Arc<dyn Brain>,
        config: VaaniConfig,
    ) -> Self {
        Self {
            store,
            scanner,
            brain,
            config,
        }
    }
}

/// Assemble the full router. Split out so tests can drive it in-process.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::act_routes())
        .merge(routes::reminder_routes())
        .merge(routes::static_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // The browser UI may be served from anywhere
        .layer(CorsLayer::permissive())
}

/// Run the HTTP server until ctrl-c.
pub async fn run(state: AppState) -> Result<()> {
    let port = state.config.port;
    let app = build_router(Arc::new(state));

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutting down gracefully");
}
