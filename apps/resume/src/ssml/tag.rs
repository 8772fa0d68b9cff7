//! Tag header tokenizer: the text between `<` and `>` of an opening tag.
//!
//! Tokens are split on single spaces with no quote awareness, so attribute values
//! containing spaces are not supported (`<voice name="en us">` fails on `us"`).

use super::error::SsmlError;
use super::node::Attributes;

/// Name, attributes and self-closing flag of one opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagHeader {
    pub name: String,
    pub attributes: Attributes,
    /// Trailing `/`: the tag has no body and no closing tag follows.
    pub self_closing: bool,
}

/// Tokenizes a tag header such as `prosody rate="slow"` or `break time="500ms" /`.
///
/// Duplicate attribute keys are allowed; the last occurrence wins.
pub fn parse_tag_header(header: &str) -> Result<TagHeader, SsmlError> {
    let trimmed = header.trim();
    let (body, self_closing) = match trimmed.strip_suffix('/') {
        Some(stripped) => (stripped.trim(), true),
        None => (trimmed, false),
    };

    // Runs of spaces yield empty tokens; skip them.
    let mut tokens = body.split(' ').filter(|t| !t.is_empty());

    let name = match tokens.next() {
        Some(name) => name.to_string(),
        None => {
            return Err(SsmlError::MalformedTag {
                header: header.to_string(),
            })
        }
    };

    let mut attributes = Attributes::new();
    for token in tokens {
        let (key, value) = parse_attribute(token)?;
        attributes.insert(key, value);
    }

    Ok(TagHeader {
        name,
        attributes,
        self_closing,
    })
}

/// Splits `key="value"` into `(key, value)` with surrounding quotes removed.
fn parse_attribute(token: &str) -> Result<(String, String), SsmlError> {
    let mut parts = token.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) if !key.is_empty() => {
            Ok((key.to_string(), value.trim_matches('"').to_string()))
        }
        _ => Err(SsmlError::MalformedAttribute {
            token: token.to_string(),
        }),
    }
}
