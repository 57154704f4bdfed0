mod analysis_client;
mod config;
mod errors;
mod models;
mod page;
mod presenter;
mod routes;
mod selection;
mod state;
mod submission;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis_client::HttpAnalysisClient;
use crate::config::Config;
use crate::page::Page;
use crate::routes::build_router;
use crate::state::AppState;
use crate::submission::SubmissionController;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scorecard v{}", env!("CARGO_PKG_VERSION"));

    let client = HttpAnalysisClient::new(
        config.analysis_service_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    info!(
        "Analysis client initialized (endpoint: {}, timeout: {}s)",
        client.endpoint(),
        config.request_timeout_secs
    );
    if let Some(dir) = &config.export_dir {
        info!("Exports will be mirrored to {}", dir.display());
    }

    let page = Arc::new(RwLock::new(Page::default()));
    let controller = SubmissionController::new(page, Arc::new(client));
    let state = AppState::new(controller, config.clone());

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
