mod applicants;
mod config;
mod db;
mod documents;
mod errors;
mod jobs;
mod models;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, DocumentStoreConfig};
use crate::db::{create_pool, init_schema};
use crate::documents::{DocumentRepository, LocalDocumentRepository, S3DocumentRepository};
use crate::routes::build_router;
use crate::screening::ScreeningEngine;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;

    // Initialize document storage
    let documents: Arc<dyn DocumentRepository> = match &config.document_store {
        DocumentStoreConfig::Local { upload_dir } => {
            tokio::fs::create_dir_all(upload_dir).await?;
            Arc::new(LocalDocumentRepository::new(upload_dir))
        }
        DocumentStoreConfig::S3 {
            bucket,
            endpoint,
            access_key_id,
            secret_access_key,
        } => Arc::new(
            S3DocumentRepository::connect(endpoint, access_key_id, secret_access_key, bucket.clone())
                .await,
        ),
    };
    info!("Document store initialized (backend: {})", documents.backend());

    // Initialize screening engine
    let engine = ScreeningEngine::new(config.thresholds.clone());
    info!("Screening thresholds: {:?}", engine.thresholds());

    // Build app state
    let state = AppState {
        db,
        documents,
        engine,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
