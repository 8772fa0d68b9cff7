//! Section renderers. Each takes one YAML section and returns an HTML fragment built from
//! a fixed template. Every interpolated scalar goes through `escape_html` (or
//! `format_inline`, which escapes first).

use tracing::warn;

use super::escape::{escape_html, format_inline};
use super::model::{
    present, CertificateItem, EducationItem, ItemSection, PersonalInfo, Publications,
    ResearchItem, SkillCategory, WorkItem,
};

fn section(title: &str, body: &str) -> String {
    format!(
        "<div class=\"section\">\n<h2 class=\"section-title\">{}</h2>\n{body}</div>\n",
        escape_html(title)
    )
}

pub fn render_header(info: &PersonalInfo) -> String {
    let mut contact = Vec::new();
    if let Some(location) = present(&info.location) {
        contact.push(escape_html(location));
    }
    if let Some(email) = present(&info.email) {
        let email = escape_html(email);
        contact.push(format!("<a href=\"mailto:{email}\">{email}</a>"));
    }
    for profile in [present(&info.linkedin), present(&info.github)].into_iter().flatten() {
        let profile = escape_html(profile);
        contact.push(format!("<a href=\"https://{profile}\">{profile}</a>"));
    }

    format!(
        "<div class=\"header\">\n<h1>{}</h1>\n<div class=\"subtitle\">{}</div>\n<div class=\"contact-info\">{}</div>\n</div>\n",
        escape_html(present(&info.name).unwrap_or_default()),
        escape_html(present(&info.full_name).unwrap_or_default()),
        contact.join(" | ")
    )
}

pub fn render_summary(summary: &str) -> String {
    section(
        "Summary",
        &format!("<p class=\"summary\">{}</p>\n", format_inline(summary)),
    )
}

pub fn render_education(education: &ItemSection<EducationItem>) -> String {
    let mut body = String::new();
    for edu in &education.items {
        let campus = present(&edu.campus)
            .map(|c| format!(" - {}", escape_html(c)))
            .unwrap_or_default();
        body.push_str(&format!(
            "<div class=\"education-item\">\n<span class=\"date\">{}</span>\n<div class=\"degree\">{}</div>\n<div class=\"institution\">{}{campus}</div>\n</div>\n",
            escape_html(present(&edu.graduation_date).unwrap_or_default()),
            escape_html(present(&edu.degree).unwrap_or_default()),
            escape_html(present(&edu.institution).unwrap_or_default()),
        ));
    }
    section(education.title_or("Education"), &body)
}

/// Categories render in YAML order. Metadata keys, non-mapping values, untitled
/// categories and categories with no items are skipped.
pub fn render_skills(skills: &serde_yaml::Mapping) -> String {
    let title = skills
        .get("_title")
        .and_then(serde_yaml::Value::as_str)
        .unwrap_or("Skills");

    let mut body = String::new();
    for (key, value) in skills {
        let key = key.as_str().unwrap_or_default();
        if key.starts_with('_') || !value.is_mapping() {
            continue;
        }
        let category: SkillCategory = match serde_yaml::from_value(value.clone()) {
            Ok(category) => category,
            Err(e) => {
                warn!("Skipping skills category '{key}': {e}");
                continue;
            }
        };
        let (Some(category_title), Some(items)) = (present(&category.title), &category.items) else {
            continue;
        };
        if items.is_empty() {
            continue;
        }

        let list = items
            .iter()
            .map(|s| escape_html(s.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        body.push_str(&format!(
            "<div class=\"skills-category\">\n<strong>{}:</strong>\n<span class=\"skills-list\">{list}</span>\n</div>\n",
            escape_html(category_title)
        ));
    }
    section(title, &body)
}

pub fn render_work_experience(work: &ItemSection<WorkItem>) -> String {
    let mut body = String::new();
    for exp in &work.items {
        let responsibilities = if exp.responsibilities.is_empty() {
            String::new()
        } else {
            let items: String = exp
                .responsibilities
                .iter()
                .map(|r| format!("<li>{}</li>", format_inline(r.as_str())))
                .collect();
            format!("<ul class=\"responsibilities\">{items}</ul>\n")
        };
        body.push_str(&format!(
            "<div class=\"experience-item\">\n<div class=\"experience-header\">\n<div>\n<span class=\"job-title\">{}</span>\n<span class=\"company\"> || {}</span>\n</div>\n<div class=\"duration\">{}</div>\n</div>\n{responsibilities}</div>\n",
            escape_html(present(&exp.title).unwrap_or_default()),
            escape_html(present(&exp.company).unwrap_or_default()),
            escape_html(present(&exp.duration).unwrap_or_default()),
        ));
    }
    section(work.title_or("Work Experience"), &body)
}

pub fn render_research_experience(research: &ItemSection<ResearchItem>) -> String {
    let tech_label = escape_html(research.label_or("technical_environment", "Technical Environment"));
    let methods_label = escape_html(research.label_or("applied_methods", "Applied Methods"));

    let mut body = String::new();
    for exp in &research.items {
        let references = present(&exp.references)
            .map(|r| format!(" {}", escape_html(r)))
            .unwrap_or_default();
        let kind = present(&exp.kind)
            .map(|t| format!(" | {}", escape_html(t)))
            .unwrap_or_default();
        let description = present(&exp.description)
            .map(|d| format!("<div class=\"research-description\">{}</div>\n", escape_html(d)))
            .unwrap_or_default();
        let tech_env = present(&exp.technical_environment)
            .map(|t| {
                format!(
                    "<div class=\"applied-methods\"><em>{tech_label}:</em> {}</div>\n",
                    escape_html(t)
                )
            })
            .unwrap_or_default();
        let methods = if exp.applied_methods.is_empty() {
            String::new()
        } else {
            let list = exp
                .applied_methods
                .iter()
                .map(|m| escape_html(m.as_str()))
                .collect::<Vec<_>>()
                .join(" | ");
            format!(
                "<div class=\"applied-methods\"><em>{methods_label}:</em> <span class=\"methods-list\"> {list}</span></div>\n"
            )
        };

        body.push_str(&format!(
            "<div class=\"research-item\">\n<div class=\"research-title\">{}{references}</div>\n<div class=\"research-type\">{}{kind}</div>\n{description}{tech_env}{methods}</div>\n",
            escape_html(present(&exp.title).unwrap_or_default()),
            escape_html(present(&exp.institution).unwrap_or_default()),
        ));
    }
    section(research.title_or("Research Experience"), &body)
}

pub fn render_certificates(certificates: &ItemSection<CertificateItem>) -> String {
    let verify_label = escape_html(certificates.label_or("verification_url", "Verify at"));

    let mut body = String::new();
    for cert in &certificates.items {
        let verify = present(&cert.verification_url)
            .map(|url| {
                let url = escape_html(url);
                format!("<a href=\"{url}\" class=\"certificate-link\">{verify_label} {url}</a>\n")
            })
            .unwrap_or_default();
        body.push_str(&format!(
            "<div class=\"certificate-item\">\n<div class=\"certificate-name\">{}</div>\n<div class=\"certificate-institution\">{}</div>\n{verify}</div>\n",
            escape_html(present(&cert.name).unwrap_or_default()),
            escape_html(present(&cert.institution).unwrap_or_default()),
        ));
    }
    section(certificates.title_or("Certificates"), &body)
}

pub fn render_publications(publications: &Publications) -> String {
    let mut body = String::new();
    if let Some(note) = present(&publications.note) {
        body.push_str(&format!(
            "<div class=\"publications-note\">{}</div>\n",
            escape_html(note)
        ));
    }
    if let Some(url) = present(&publications.scholar_url) {
        let label = publications
            .labels
            .get("scholar_url")
            .map(String::as_str)
            .unwrap_or("Google Scholar Profile");
        body.push_str(&format!(
            "<a href=\"{}\" class=\"publications-link\">{}</a>\n",
            escape_html(url),
            escape_html(label)
        ));
    }
    section(
        publications.title.as_deref().unwrap_or("Publications"),
        &body,
    )
}
