use axum::{extract::State, response::Html};

use crate::consolidate::{consolidate, load_assets};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/consolidate
///
/// Builds the self-contained page from the configured assets directory without
/// writing it to disk.
pub async fn handle_consolidate(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let assets = load_assets(&state.config.assets_dir).await?;
    Ok(Html(consolidate(&assets)?))
}
