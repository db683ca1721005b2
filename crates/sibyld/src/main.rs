//! Sibyl Daemon - Completion-backed decision support service
//!
//! Serves decision, analysis, and recommendation endpoints backed by an
//! external completion provider.

use anyhow::Result;
use sibyl_common::OpenAiClient;
use sibyld::config::Config;
use sibyld::server::{self, AppState};
use sibyld::service::CompletionService;
use std::sync::Arc;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Sibyl Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    let provider = config.resolved_provider();
    if provider.api_key.is_none() {
        warn!("No provider API key configured; completion calls will fail");
    }

    let client = OpenAiClient::new(provider.clone())
        .map_err(|e| anyhow::anyhow!("failed to build provider client: {}", e))?;
    let service = CompletionService::new(Arc::new(client), provider.model.clone());
    info!("Completion service ready (model: {})", provider.model);

    server::run(AppState::new(service), &config.server.bind_addr).await
}
