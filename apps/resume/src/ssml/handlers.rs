//! Axum route handlers for the SSML API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::ssml::MarkupNode;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseSsmlRequest {
    pub markup: String,
}

#[derive(Debug, Serialize)]
pub struct ParseSsmlResponse {
    pub tree: MarkupNode,
    /// Text content of the whole tree with all tags removed.
    pub text: String,
}

/// POST /api/v1/ssml/parse
///
/// Parses SSML markup into a node tree. Malformed markup returns 422 with the
/// parser's error message.
pub async fn handle_parse_ssml(
    State(state): State<AppState>,
    Json(request): Json<ParseSsmlRequest>,
) -> Result<Json<ParseSsmlResponse>, AppError> {
    if request.markup.trim().is_empty() {
        return Err(AppError::Validation("markup cannot be empty".to_string()));
    }

    let parser = state.markup_parser();
    // Recursion depth follows input nesting; keep it off the async worker threads.
    let tree = tokio::task::spawn_blocking(move || parser.parse(&request.markup))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in SSML parse: {e}")))??;

    let text = tree.text_content();
    Ok(Json(ParseSsmlResponse { tree, text }))
}
