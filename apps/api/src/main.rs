mod advice;
mod config;
mod crops;
mod db;
mod diagnosis;
mod errors;
mod flow;
mod llm_client;
mod routes;
mod schema;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::crops::pg::PgCropStore;
use crate::crops::store::{CropStore, MemoryCropStore};
use crate::db::create_pool;
use crate::flow::Advisor;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AgriAdvise API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout)?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.llm_timeout
    );

    // Crop store: PostgreSQL when configured, built-in reference data otherwise
    let crops: Arc<dyn CropStore> = match &config.database_url {
        Some(url) => Arc::new(PgCropStore::new(create_pool(url).await?)),
        None => {
            warn!("DATABASE_URL not set; serving built-in crop reference data");
            Arc::new(MemoryCropStore::with_reference_data()?)
        }
    };

    let state = AppState {
        advisor: Advisor::new(Arc::new(llm)),
        crops,
    };

    let app = build_router(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
