use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Service version plus the active PDF backend and SSML depth bound.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume",
        "pdf_backend": state.pdf.name(),
        "ssml_max_depth": state.config.ssml_max_depth
    }))
}
