//! HTTP server for sibyld

use crate::routes;
use crate::service::CompletionService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub service: CompletionService,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: CompletionService) -> Self {
        Self {
            service,
            start_time: Instant::now(),
        }
    }
}

/// Build the full router for the given state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::completion_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(state: AppState, bind_addr: &str) -> Result<()> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("  Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
