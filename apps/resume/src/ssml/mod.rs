// SSML markup tree parser.
// Splits a markup string into nested tag nodes. Only the generic tag/text shape is
// modelled; prosody, voice and audio semantics are left to the synthesis engine.

pub mod error;
pub mod handlers;
pub mod node;
pub mod parser;
pub mod tag;

pub use error::SsmlError;
pub use node::MarkupNode;
pub use parser::{parse_markup, MarkupParser, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
