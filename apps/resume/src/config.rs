use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::ssml::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

pub const DEFAULT_PDF_COMMAND: &str = "weasyprint";

/// Which document rendering backend produces PDFs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfBackend {
    /// Local command line, invoked as `<command> <input.html> <output.pdf>`.
    Command(String),
    /// Rendering service URL receiving the HTML as the request body.
    Http(String),
}

/// Toolchain configuration loaded from environment variables (and `.env` if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub assets_dir: PathBuf,
    pub output_dir: PathBuf,
    pub pdf_backend: PdfBackend,
    pub ssml_max_depth: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let pdf_backend = match get("PDF_BACKEND", "command").to_ascii_lowercase().as_str() {
            "command" => {
                let command = get("PDF_COMMAND", DEFAULT_PDF_COMMAND);
                if command.trim().is_empty() {
                    bail!("PDF_COMMAND must not be empty");
                }
                PdfBackend::Command(command)
            }
            "http" => PdfBackend::Http(
                lookup("PDF_SERVICE_URL")
                    .context("Required environment variable 'PDF_SERVICE_URL' is not set")?,
            ),
            other => bail!("PDF_BACKEND must be 'command' or 'http', got '{other}'"),
        };

        let ssml_max_depth = get("SSML_MAX_DEPTH", &DEFAULT_MAX_DEPTH.to_string())
            .parse::<usize>()
            .context("SSML_MAX_DEPTH must be a positive integer")?;
        if ssml_max_depth == 0 {
            bail!("SSML_MAX_DEPTH must be a positive integer");
        }
        if ssml_max_depth > MAX_DEPTH_LIMIT {
            bail!("SSML_MAX_DEPTH must be at most {MAX_DEPTH_LIMIT}, got {ssml_max_depth}");
        }

        Ok(Config {
            assets_dir: PathBuf::from(get("RESUME_ASSETS_DIR", ".")),
            output_dir: PathBuf::from(get("RESUME_OUTPUT_DIR", ".")),
            pdf_backend,
            ssml_max_depth,
            port: get("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG", "info"),
        })
    }
}
