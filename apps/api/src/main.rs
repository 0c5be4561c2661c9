mod config;
mod errors;
mod form;
mod llm_client;
mod models;
mod resume;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::resume::ocr::OcrClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::ProfileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Autofill API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize generation client
    let llm = LlmClient::from_config(&config)?;
    info!("LLM client initialized (model: {})", llm.model());

    // Initialize OCR client
    let ocr = OcrClient::from_config(&config);
    if config.ocr_api_key.is_empty() {
        warn!("OCR_API_KEY not set; resume import is disabled");
    }

    // Initialize profile store
    let profiles = ProfileStore::new(&config.profile_store_path);
    info!("Profile store at {}", profiles.path().display());

    // Build app state
    let state = AppState {
        generator: Arc::new(llm),
        ocr,
        profiles,
    };

    // The extension calls from its own origin.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
