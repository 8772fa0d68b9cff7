//! Résumé YAML schema.
//!
//! Every section is optional. Keys starting with `_` are metadata: `_title` overrides the
//! section heading and `_labels` overrides inline labels. Unknown keys are ignored.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

/// A YAML scalar read as text. Numbers and booleans are stringified (`2021` → `"2021"`)
/// and null becomes the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scalar(pub String);

impl Scalar {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Scalar(s)),
            Value::Number(n) => Ok(Scalar(n.to_string())),
            Value::Bool(b) => Ok(Scalar(b.to_string())),
            Value::Null => Ok(Scalar::default()),
            other => Err(D::Error::custom(format!(
                "expected a scalar value, found {other:?}"
            ))),
        }
    }
}

/// Returns the field's text when it is present and non-empty.
pub fn present(field: &Option<Scalar>) -> Option<&str> {
    field.as_ref().map(Scalar::as_str).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    pub summary: Option<Scalar>,
    pub education: Option<ItemSection<EducationItem>>,
    /// Categories in YAML order; parsed lazily because entries are free-form.
    pub skills: Option<Mapping>,
    pub work_experience: Option<ItemSection<WorkItem>>,
    pub research_experience: Option<ItemSection<ResearchItem>>,
    pub certificates: Option<ItemSection<CertificateItem>>,
    pub publications: Option<Publications>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonalInfo {
    pub name: Option<Scalar>,
    pub full_name: Option<Scalar>,
    pub location: Option<Scalar>,
    pub email: Option<Scalar>,
    pub linkedin: Option<Scalar>,
    pub github: Option<Scalar>,
}

/// A section made of a heading plus a list of uniform items.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSection<T> {
    #[serde(rename = "_title")]
    pub title: Option<String>,
    #[serde(rename = "_labels", default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> ItemSection<T> {
    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(default)
    }

    pub fn label_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.labels.get(key).map(String::as_str).unwrap_or(default)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationItem {
    pub institution: Option<Scalar>,
    pub degree: Option<Scalar>,
    pub graduation_date: Option<Scalar>,
    pub campus: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkItem {
    pub title: Option<Scalar>,
    pub company: Option<Scalar>,
    pub duration: Option<Scalar>,
    #[serde(default)]
    pub responsibilities: Vec<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResearchItem {
    pub title: Option<Scalar>,
    pub references: Option<Scalar>,
    pub institution: Option<Scalar>,
    #[serde(rename = "type")]
    pub kind: Option<Scalar>,
    pub description: Option<Scalar>,
    pub technical_environment: Option<Scalar>,
    #[serde(default)]
    pub applied_methods: Vec<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CertificateItem {
    pub name: Option<Scalar>,
    pub institution: Option<Scalar>,
    pub verification_url: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Publications {
    #[serde(rename = "_title")]
    pub title: Option<String>,
    #[serde(rename = "_labels", default)]
    pub labels: BTreeMap<String, String>,
    pub note: Option<Scalar>,
    pub scholar_url: Option<Scalar>,
}

/// One skills category: `languages: { _title: Languages, _items: [Rust, Go] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillCategory {
    #[serde(rename = "_title")]
    pub title: Option<Scalar>,
    #[serde(rename = "_items")]
    pub items: Option<Vec<Scalar>>,
}
