use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::consolidate::ConsolidateError;
use crate::pdf::PdfError;
use crate::render::RenderError;
use crate::ssml::SsmlError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("SSML error: {0}")]
    Ssml(#[from] SsmlError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Consolidation error: {0}")]
    Consolidate(#[from] ConsolidateError),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Ssml(e) => (StatusCode::UNPROCESSABLE_ENTITY, "SSML_ERROR", e.to_string()),
            AppError::Render(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "RENDER_ERROR",
                e.to_string(),
            ),
            AppError::Consolidate(e) => {
                tracing::error!("Consolidation error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONSOLIDATE_ERROR",
                    e.to_string(),
                )
            }
            AppError::Pdf(e) => {
                tracing::error!("PDF error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PDF_ERROR",
                    "The document renderer failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
