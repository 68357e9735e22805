use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::documents::DocumentRepository;
use crate::screening::ScreeningEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable document storage. Default: local filesystem. Swap via DOCUMENT_STORE.
    pub documents: Arc<dyn DocumentRepository>,
    /// Stateless screening engine; cloned into blocking tasks per request.
    pub engine: ScreeningEngine,
    pub config: Config,
}
