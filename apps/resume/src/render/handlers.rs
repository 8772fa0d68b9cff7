//! Axum route handlers for the Render API. Both endpoints take the résumé YAML as the
//! raw request body.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
};
use tracing::info;

use crate::errors::AppError;
use crate::render::render_resume_yaml;
use crate::state::AppState;

fn render_page(state: &AppState, yaml: &str) -> Result<String, AppError> {
    if yaml.trim().is_empty() {
        return Err(AppError::Validation("resume YAML cannot be empty".to_string()));
    }
    Ok(render_resume_yaml(yaml, &state.stylesheet)?)
}

/// POST /api/v1/render/html
pub async fn handle_render_html(
    State(state): State<AppState>,
    yaml: String,
) -> Result<Html<String>, AppError> {
    Ok(Html(render_page(&state, &yaml)?))
}

/// POST /api/v1/render/pdf
///
/// Renders the page, then hands it to the configured document backend.
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    yaml: String,
) -> Result<Response, AppError> {
    let html = render_page(&state, &yaml)?;
    let pdf = state.pdf.render(&html).await?;
    info!("Rendered PDF via {} backend ({} bytes)", state.pdf.name(), pdf.len());

    Ok(([(header::CONTENT_TYPE, "application/pdf")], pdf).into_response())
}
