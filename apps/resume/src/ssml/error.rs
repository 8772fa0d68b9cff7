use thiserror::Error;

/// Every way a markup parse can fail. Positions are byte offsets into the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SsmlError {
    #[error("Malformed tag: '<{header}>' has no tag name")]
    MalformedTag { header: String },

    #[error("Malformed attribute '{token}': expected exactly one '='")]
    MalformedAttribute { token: String },

    #[error("Unterminated tag starting at byte {position}: no closing '>'")]
    UnterminatedTag { position: usize },

    #[error("Mismatched closing tag at byte {position}: expected '</{expected}>', found '</{found}>'")]
    MismatchedCloseTag {
        expected: String,
        found: String,
        position: usize,
    },

    #[error("Unclosed tag '<{name}>': input ended before '</{name}>'")]
    UnclosedTag { name: String },

    #[error("Nesting depth exceeds limit of {limit} at byte {position}")]
    MaxNestingDepthExceeded { limit: usize, position: usize },
}
