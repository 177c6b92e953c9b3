mod config;
mod db;
mod errors;
mod extraction;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;
mod storage;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::fetch::HttpFetcher;
use crate::llm_client::{build_provider, CompletionClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::postgres::PgStore;

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

    info!("Starting Outreach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    // One HTTP client shared by the fetcher and both providers
    let mut http = reqwest::Client::builder();
    if let Some(timeout) = config.llm_timeout {
        http = http.timeout(timeout);
    }
    let http = http.build().context("Failed to build HTTP client")?;

    let primary = build_provider(&config.primary_llm, http.clone());
    let secondary = build_provider(&config.secondary_llm, http.clone());
    info!(
        "LLM chain: primary={} ({}), secondary={} ({})",
        primary.name(),
        primary.model(),
        secondary.name(),
        secondary.model()
    );

    let state = AppState {
        fetcher: Arc::new(HttpFetcher::new(http)),
        lookup: store.clone(),
        archive: store,
        llm: CompletionClient::new(primary, secondary),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
