mod config;
mod consolidate;
mod errors;
mod pdf;
mod render;
mod routes;
mod ssml;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::pdf::build_renderer;
use crate::routes::build_router;
use crate::state::AppState;

const PDF_OUTPUT_FILE: &str = "resume.pdf";
const HTML_OUTPUT_FILE: &str = "resume.html";

#[derive(Debug, Parser)]
#[command(name = "resume", version, about = "Résumé build toolchain")]
struct Cli {
    /// Directory holding index.html, style.css, resume.js and resume.yml.
    #[arg(long, global = true, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Directory generated files are written to.
    #[arg(long, global = true, value_name = "DIR")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fold the template, stylesheet, script and data into one self-contained all.html.
    Consolidate,
    /// Render resume.yml to a standalone print-ready HTML page.
    Html,
    /// Render resume.yml to HTML, then to PDF through the configured backend.
    Pdf,
    /// Parse an SSML file and print its node tree as JSON.
    Ssml {
        /// SSML file to parse; `-` reads standard input.
        file: PathBuf,
    },
    /// Serve the render and SSML APIs over HTTP.
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(assets) = cli.assets {
        config.assets_dir = assets;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Consolidate => {
            let path = consolidate::run(&config.assets_dir, &config.output_dir).await?;
            info!("Open '{}' directly in a browser; no server required", path.display());
        }
        Command::Html => {
            let html = render_from_assets(&config).await?;
            let path = config.output_dir.join(HTML_OUTPUT_FILE);
            write_file(&path, html.as_bytes()).await?;
        }
        Command::Pdf => {
            let html = render_from_assets(&config).await?;
            let renderer = build_renderer(&config);
            info!("Generating PDF via {} backend...", renderer.name());
            let pdf = renderer.render(&html).await?;
            let path = config.output_dir.join(PDF_OUTPUT_FILE);
            write_file(&path, &pdf).await?;
        }
        Command::Ssml { file } => {
            let markup = if file.as_os_str() == "-" {
                tokio::task::spawn_blocking(|| std::io::read_to_string(std::io::stdin()))
                    .await
                    .context("stdin reader task failed")??
            } else {
                tokio::fs::read_to_string(&file)
                    .await
                    .with_context(|| format!("Failed to read '{}'", file.display()))?
            };
            let tree = if config.ssml_max_depth == ssml::DEFAULT_MAX_DEPTH {
                ssml::parse_markup(&markup)?
            } else {
                ssml::MarkupParser::with_max_depth(config.ssml_max_depth).parse(&markup)?
            };
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        Command::Serve => serve(config).await?,
    }

    Ok(())
}

/// Reads resume.yml and style.css from the assets directory and renders the page.
async fn render_from_assets(config: &Config) -> Result<String> {
    info!("Loading resume data...");
    let yaml = consolidate::read_asset(&config.assets_dir, consolidate::DATA_FILE).await?;
    // A missing stylesheet still renders, with the print overrides only.
    let css = match consolidate::read_asset(&config.assets_dir, consolidate::STYLE_FILE).await {
        Ok(css) => css,
        Err(e) => {
            tracing::warn!("{e}; using minimal styles");
            String::new()
        }
    };
    info!("Generating HTML...");
    Ok(render::render_resume_yaml(&yaml, &css)?)
}

async fn write_file(path: &std::path::Path, contents: &[u8]) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    info!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting resume API v{}", env!("CARGO_PKG_VERSION"));

    let pdf = build_renderer(&config);
    info!("PDF backend: {}", pdf.name());

    let stylesheet = match consolidate::read_asset(&config.assets_dir, consolidate::STYLE_FILE).await {
        Ok(css) => css,
        Err(e) => {
            tracing::warn!("{e}; rendered pages will use minimal styles");
            String::new()
        }
    };

    let state = AppState {
        config: config.clone(),
        pdf,
        stylesheet: Arc::from(stylesheet),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
