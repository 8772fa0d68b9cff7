use std::sync::Arc;

use crate::config::Config;
use crate::pdf::PdfRenderer;
use crate::ssml::MarkupParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable document backend: local command or HTTP rendering service.
    pub pdf: Arc<dyn PdfRenderer>,
    /// Stylesheet embedded into rendered pages. Read once at startup.
    pub stylesheet: Arc<str>,
}

impl AppState {
    pub fn markup_parser(&self) -> MarkupParser {
        MarkupParser::with_max_depth(self.config.ssml_max_depth)
    }
}
