// Document rendering backend.
// HTML goes in, PDF bytes come out. The engine itself is external: either a local
// command (weasyprint by default) or an HTTP rendering service.

pub mod command;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::config::{Config, PdfBackend, DEFAULT_PDF_COMMAND};

pub use command::CommandPdfRenderer;
pub use http::HttpPdfRenderer;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    Command {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rendering service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Renderer returned an empty document")]
    Empty,
}

/// The document rendering backend. Carried in `AppState` as `Arc<dyn PdfRenderer>`.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> Result<Bytes, PdfError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// Builds the backend selected by `PDF_BACKEND`.
pub fn build_renderer(config: &Config) -> Arc<dyn PdfRenderer> {
    match &config.pdf_backend {
        PdfBackend::Command(command_line) => Arc::new(
            CommandPdfRenderer::from_command_line(command_line)
                .unwrap_or_else(|| CommandPdfRenderer::new(DEFAULT_PDF_COMMAND)),
        ),
        PdfBackend::Http(url) => Arc::new(HttpPdfRenderer::new(url.clone())),
    }
}
