use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use crate::documents::content_type_for;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /uploads/*key
///
/// Streams a stored resume back to the caller.
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let key = key.trim_start_matches('/').to_string();
    let bytes = state.documents.fetch(&key).await?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&key))], bytes))
}
