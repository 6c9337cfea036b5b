mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod recommendation;
mod report;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::ChatCompletionClient;
use crate::recommendation::pipeline::SubmissionPipeline;
use crate::report::{FontSet, PdfRenderer};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgSubmissionStore;

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

    info!("Starting CareerPath API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and the record store
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgSubmissionStore::new(db));

    // Initialize completion client
    let llm = ChatCompletionClient::new(config.llm_settings())
        .context("failed to build the completion client")?;
    info!(
        "Completion client initialized ({}, model: {})",
        llm.flavor(),
        llm.model()
    );

    // Fonts are required; there is no fallback face
    let fonts = FontSet::load(&config.report_font_dir)
        .await
        .context("report fonts are required")?;
    let profile = config.report_profile;
    let renderer = PdfRenderer::new(fonts, profile.section_count());
    info!("Report profile: {profile} ({} sections)", profile.section_count());

    let pipeline = SubmissionPipeline::new(store, Arc::new(llm), Arc::new(renderer), profile);

    let state = AppState {
        pipeline,
        config: config.clone(),
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
