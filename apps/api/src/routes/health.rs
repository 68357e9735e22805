use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports the version plus the active storage and scoring backends, so a
/// deployment can confirm which document store and cutoffs it is running with.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let thresholds = state.engine.thresholds();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "document_store": state.documents.backend(),
        "scorer": state.engine.scorer_backend(),
        "shortlist_min_score": thresholds.shortlist_min_score,
        "allowed_extensions": state.config.allowed_extensions,
    }))
}
