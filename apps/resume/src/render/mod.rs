// Data-to-markup renderer.
// Maps the résumé YAML schema onto fixed HTML fragments, in a fixed section order, and
// wraps them in a print-ready page.

pub mod escape;
pub mod handlers;
pub mod model;
pub mod sections;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::render::escape::escape_html;
use crate::render::model::{present, Resume};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid resume YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// List items that start with `**` would be read as YAML aliases; quote them.
static BOLD_LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)(\s+- )(\*\*.+)$"#).expect("valid regex"));

/// Print overrides appended after the user stylesheet.
const PRINT_CSS: &str = r#"
body {
    background: white;
    padding: 0;
}

#resume-container {
    max-width: 100%;
    box-shadow: none;
    padding: 0.5in;
}

@page {
    margin: 0.5in;
    size: letter;
}
"#;

pub fn normalize_yaml(yaml: &str) -> String {
    BOLD_LIST_ITEM.replace_all(yaml, "$1\"$2\"").into_owned()
}

pub fn parse_resume(yaml: &str) -> Result<Resume, RenderError> {
    Ok(serde_yaml::from_str(&normalize_yaml(yaml))?)
}

/// Renders every present section in the fixed order: header, summary, education,
/// skills, work experience, research experience, certificates, publications.
pub fn render_sections(resume: &Resume) -> String {
    let mut html = sections::render_header(&resume.personal_info);

    if let Some(summary) = present(&resume.summary) {
        html.push_str(&sections::render_summary(summary));
    }
    if let Some(education) = &resume.education {
        html.push_str(&sections::render_education(education));
    }
    if let Some(skills) = resume.skills.as_ref().filter(|s| !s.is_empty()) {
        html.push_str(&sections::render_skills(skills));
    }
    if let Some(work) = &resume.work_experience {
        html.push_str(&sections::render_work_experience(work));
    }
    if let Some(research) = &resume.research_experience {
        html.push_str(&sections::render_research_experience(research));
    }
    if let Some(certificates) = &resume.certificates {
        html.push_str(&sections::render_certificates(certificates));
    }
    if let Some(publications) = &resume.publications {
        html.push_str(&sections::render_publications(publications));
    }

    html
}

/// Complete standalone page: stylesheet, print overrides, rendered sections.
pub fn render_document(resume: &Resume, css: &str) -> String {
    let title = escape_html(present(&resume.personal_info.name).unwrap_or("Resume"));
    let body = render_sections(resume);
    debug!(bytes = body.len(), "rendered resume sections");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
{css}
{PRINT_CSS}
    </style>
</head>
<body>
    <div id="resume-container">
{body}
    </div>
</body>
</html>
"#
    )
}

/// YAML text + stylesheet → HTML page.
pub fn render_resume_yaml(yaml: &str, css: &str) -> Result<String, RenderError> {
    let resume = parse_resume(yaml)?;
    Ok(render_document(&resume, css))
}
