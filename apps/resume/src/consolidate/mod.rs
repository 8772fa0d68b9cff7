// Template consolidation.
// Folds index.html, style.css, resume.js and resume.yml into one self-contained all.html
// that opens straight from disk without a local server.

pub mod handlers;
pub mod script;

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::info;

pub const INDEX_FILE: &str = "index.html";
pub const STYLE_FILE: &str = "style.css";
pub const SCRIPT_FILE: &str = "resume.js";
pub const DATA_FILE: &str = "resume.yml";
pub const OUTPUT_FILE: &str = "all.html";

/// Head lines referencing these hosts are carried into the output.
const CDN_HOSTS: &[&str] = &["cdn.jsdelivr.net", "cdnjs.cloudflare.com"];

static SCRIPT_SRC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<script\s+src=["']resume\.js["']\s*>\s*</script>"#).expect("valid regex")
});

#[derive(Debug, Error)]
pub enum ConsolidateError {
    #[error("Missing files: {}", .0.join(", "))]
    MissingAssets(Vec<String>),

    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not find <{0}> tags in index.html")]
    MissingSection(&'static str),

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The four source texts.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    pub index_html: String,
    pub style_css: String,
    pub resume_js: String,
    pub resume_yml: String,
}

/// Reads the four source files from `dir`. All missing files are reported together.
pub async fn load_assets(dir: &Path) -> Result<Assets, ConsolidateError> {
    let names = [INDEX_FILE, STYLE_FILE, SCRIPT_FILE, DATA_FILE];

    let mut missing = Vec::new();
    for name in names {
        if !tokio::fs::try_exists(dir.join(name)).await.unwrap_or(false) {
            missing.push(name.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(ConsolidateError::MissingAssets(missing));
    }

    Ok(Assets {
        index_html: read_asset(dir, INDEX_FILE).await?,
        style_css: read_asset(dir, STYLE_FILE).await?,
        resume_js: read_asset(dir, SCRIPT_FILE).await?,
        resume_yml: read_asset(dir, DATA_FILE).await?,
    })
}

pub(crate) async fn read_asset(dir: &Path, name: &str) -> Result<String, ConsolidateError> {
    let path = dir.join(name);
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ConsolidateError::Read {
            path: path.clone(),
            source,
        })?;
    info!("Read {name} ({} chars)", text.chars().count());
    Ok(text)
}

/// Trimmed text between the first `<tag>` and the first `</tag>`.
pub fn extract_between<'a>(html: &'a str, tag: &'static str) -> Result<&'a str, ConsolidateError> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = html.find(&open).ok_or(ConsolidateError::MissingSection(tag))? + open.len();
    let end = html.find(&close).ok_or(ConsolidateError::MissingSection(tag))?;
    if end < start {
        return Err(ConsolidateError::MissingSection(tag));
    }
    Ok(html[start..end].trim())
}

/// Keeps meta, title and CDN lines from the head; local stylesheet and script links go.
fn head_includes(head: &str) -> String {
    head.lines()
        .map(str::trim)
        .filter(|line| {
            line.starts_with("<meta")
                || line.starts_with("<title")
                || CDN_HOSTS.iter().any(|host| line.contains(host))
        })
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the self-contained document.
pub fn consolidate(assets: &Assets) -> Result<String, ConsolidateError> {
    let body = extract_between(&assets.index_html, "body")?;
    let body = SCRIPT_SRC.replace_all(body, "");
    let head = extract_between(&assets.index_html, "head")?;
    let includes = head_includes(head);
    let script = script::embed_yaml(&assets.resume_js, &assets.resume_yml);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
{includes}

    <style>
{style}
    </style>
</head>
<body>
{body}

    <script>
{script}
    </script>
</body>
</html>
"#,
        style = assets.style_css,
    ))
}

/// Writes `html` to `dir/all.html` and returns the path.
pub async fn write_output(dir: &Path, html: &str) -> Result<PathBuf, ConsolidateError> {
    let path = dir.join(OUTPUT_FILE);
    tokio::fs::write(&path, html)
        .await
        .map_err(|source| ConsolidateError::Write {
            path: path.clone(),
            source,
        })?;
    info!("Created {} ({} bytes)", path.display(), html.len());
    Ok(path)
}

/// Load, consolidate and write in one step.
pub async fn run(assets_dir: &Path, output_dir: &Path) -> Result<PathBuf, ConsolidateError> {
    let assets = load_assets(assets_dir).await?;
    let html = consolidate(&assets)?;
    write_output(output_dir, &html).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Resume</title>
    <link rel="stylesheet" href="style.css">
    <script src="https://cdn.jsdelivr.net/npm/js-yaml@4/dist/js-yaml.min.js"></script>
</head>
<body>
    <div id="resume-container"></div>
    <script src="resume.js"></script>
</body>
</html>
"#;

    fn assets() -> Assets {
        Assets {
            index_html: INDEX.to_string(),
            style_css: "body { margin: 0; }".to_string(),
            resume_js: "loadResume();\n".to_string(),
            resume_yml: "name: Jane\n".to_string(),
        }
    }

    #[test]
    fn test_extract_between_trims() {
        assert_eq!(extract_between("<body>\n  x \n</body>", "body").unwrap(), "x");
    }

    #[test]
    fn test_extract_between_missing_tag() {
        let err = extract_between("<html></html>", "body").unwrap_err();
        assert!(matches!(err, ConsolidateError::MissingSection("body")));
    }

    #[test]
    fn test_head_includes_filters_lines() {
        let head = extract_between(INDEX, "head").unwrap();
        let includes = head_includes(head);
        assert!(includes.contains("    <meta charset=\"UTF-8\">"));
        assert!(includes.contains("    <title>Resume</title>"));
        assert!(includes.contains("cdn.jsdelivr.net"));
        assert!(!includes.contains("style.css"));
    }

    #[test]
    fn test_consolidate_inlines_everything() {
        let html = consolidate(&assets()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>\nbody { margin: 0; }\n    </style>"));
        assert!(html.contains("const YAML_DATA = `name: Jane\n`;"));
        assert!(html.contains("<div id=\"resume-container\"></div>"));
        assert!(!html.contains("src=\"resume.js\""));
        assert!(html.contains("loadResume();"));
    }

    #[test]
    fn test_consolidate_requires_head() {
        let mut a = assets();
        a.index_html = "<body></body>".to_string();
        assert!(matches!(
            consolidate(&a),
            Err(ConsolidateError::MissingSection("head"))
        ));
    }

    #[tokio::test]
    async fn test_load_assets_reports_all_missing() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(INDEX_FILE), INDEX).await.unwrap();

        let err = load_assets(dir.path()).await.unwrap_err();
        match err {
            ConsolidateError::MissingAssets(names) => {
                assert_eq!(names, vec![STYLE_FILE, SCRIPT_FILE, DATA_FILE]);
            }
            other => panic!("expected MissingAssets, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_writes_all_html() {
        let dir = tempfile::tempdir().unwrap();
        let a = assets();
        for (name, text) in [
            (INDEX_FILE, &a.index_html),
            (STYLE_FILE, &a.style_css),
            (SCRIPT_FILE, &a.resume_js),
            (DATA_FILE, &a.resume_yml),
        ] {
            tokio::fs::write(dir.path().join(name), text).await.unwrap();
        }

        let path = run(dir.path(), dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join(OUTPUT_FILE));
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.contains("YAML_DATA"));
    }
}
