//! Recursive tree builder.
//!
//! Each call owns one open tag (`parent`), consumes input until that tag's closing
//! tag, and hands back `(remaining, completed_parent)`. The top-level call owns the
//! synthetic root, for which running out of input is the only successful exit.

use tracing::debug;

use super::error::SsmlError;
use super::node::MarkupNode;
use super::tag::parse_tag_header;

/// Open tags allowed at once before the parser gives up.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Highest bound a parser accepts. Each open tag is one `build` frame, and this many
/// frames must fit on a 2 MiB `spawn_blocking` thread stack.
pub const MAX_DEPTH_LIMIT: usize = 512;

/// Name reported as `expected` when a closing tag appears with nothing open.
const ROOT_LABEL: &str = "#root";

/// Parses `input` with the default nesting bound and returns the root node.
pub fn parse_markup(input: &str) -> Result<MarkupNode, SsmlError> {
    MarkupParser::default().parse(input)
}

#[derive(Debug, Clone, Copy)]
pub struct MarkupParser {
    max_depth: usize,
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl MarkupParser {
    /// Bounds above `MAX_DEPTH_LIMIT` are clamped to it.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.min(MAX_DEPTH_LIMIT),
        }
    }

    /// Parses a whole document. The returned root's children are the top-level nodes.
    pub fn parse(&self, input: &str) -> Result<MarkupNode, SsmlError> {
        let (_, root) = self.build(input, input, MarkupNode::root(), 0)?;
        Ok(root)
    }

    /// Consumes `remaining` into `parent` until `parent`'s closing tag (or end of input
    /// for the root). `depth` is the number of tags currently open.
    fn build<'a>(
        &self,
        input: &'a str,
        mut remaining: &'a str,
        mut parent: MarkupNode,
        depth: usize,
    ) -> Result<(&'a str, MarkupNode), SsmlError> {
        while !remaining.is_empty() {
            let position = input.len() - remaining.len();

            let Some(after_open) = remaining.strip_prefix('<') else {
                let end = remaining.find('<').unwrap_or(remaining.len());
                parent.push_child(MarkupNode::text(&remaining[..end]));
                remaining = &remaining[end..];
                continue;
            };

            let close = after_open
                .find('>')
                .ok_or(SsmlError::UnterminatedTag { position })?;
            let header = &after_open[..close];
            remaining = &after_open[close + 1..];

            if let Some(closing_name) = header.strip_prefix('/') {
                let found = closing_name.trim();
                let expected = parent.name().unwrap_or_default();
                if !parent.is_root() && expected == found {
                    debug!(tag = found, depth, "closed tag");
                    return Ok((remaining, parent));
                }
                return Err(SsmlError::MismatchedCloseTag {
                    expected: if parent.is_root() { ROOT_LABEL } else { expected }.to_string(),
                    found: found.to_string(),
                    position,
                });
            }

            let tag = parse_tag_header(header)?;
            if tag.self_closing {
                debug!(tag = %tag.name, depth, "self-closing tag");
                parent.push_child(MarkupNode::self_closing(tag.name, tag.attributes));
                continue;
            }

            if depth >= self.max_depth {
                return Err(SsmlError::MaxNestingDepthExceeded {
                    limit: self.max_depth,
                    position,
                });
            }

            debug!(tag = %tag.name, depth = depth + 1, "opened tag");
            let open = MarkupNode::tag(tag.name, tag.attributes, Vec::new());
            let (rest, child) = self.build(input, remaining, open, depth + 1)?;
            remaining = rest;
            parent.push_child(child);
        }

        if parent.is_root() {
            return Ok((remaining, parent));
        }

        Err(SsmlError::UnclosedTag {
            name: parent.name().unwrap_or_default().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssml::node::Attributes;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn top_level(input: &str) -> Vec<MarkupNode> {
        parse_markup(input).unwrap().children().to_vec()
    }

    // ── scenarios ───────────────────────────────────────────────────────────

    #[test]
    fn test_nested_speak_prosody() {
        let nodes = top_level(r#"<speak><prosody rate="slow">Hello</prosody></speak>"#);
        assert_eq!(
            nodes,
            vec![MarkupNode::tag(
                "speak",
                Attributes::new(),
                vec![MarkupNode::tag(
                    "prosody",
                    attrs(&[("rate", "slow")]),
                    vec![MarkupNode::text("Hello")],
                )],
            )]
        );
    }

    #[test]
    fn test_single_self_closing_break() {
        let nodes = top_level(r#"<break time="500ms" />"#);
        assert_eq!(
            nodes,
            vec![MarkupNode::self_closing("break", attrs(&[("time", "500ms")]))]
        );
        assert!(nodes[0].children().is_empty());
    }

    #[test]
    fn test_missing_close_is_unclosed_tag() {
        let err = parse_markup("<speak>Hello").unwrap_err();
        assert_eq!(
            err,
            SsmlError::UnclosedTag {
                name: "speak".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_close_is_mismatch() {
        let err = parse_markup("<speak></voice>").unwrap_err();
        assert_eq!(
            err,
            SsmlError::MismatchedCloseTag {
                expected: "speak".to_string(),
                found: "voice".to_string(),
                position: 7,
            }
        );
    }

    #[test]
    fn test_unquoted_value_and_bad_token() {
        let nodes = top_level("<tag attr=value></tag>");
        assert_eq!(
            nodes,
            vec![MarkupNode::tag("tag", attrs(&[("attr", "value")]), vec![])]
        );

        let err = parse_markup("<tag badtoken>").unwrap_err();
        assert_eq!(
            err,
            SsmlError::MalformedAttribute {
                token: "badtoken".to_string()
            }
        );
    }

    // ── structure ───────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input_yields_empty_root() {
        let root = parse_markup("").unwrap();
        assert!(root.is_root());
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_plain_text_only() {
        assert_eq!(top_level("just words"), vec![MarkupNode::text("just words")]);
    }

    #[test]
    fn test_explicit_empty_tag_is_not_self_closing() {
        let nodes = top_level("<p></p>");
        assert_eq!(nodes, vec![MarkupNode::tag("p", Attributes::new(), vec![])]);
        assert_ne!(nodes[0], MarkupNode::self_closing("p", Attributes::new()));
    }

    #[test]
    fn test_document_order_and_no_text_merging() {
        let nodes = top_level(r#"<speak>one<break time="1s"/>two<emphasis>three</emphasis>four</speak>"#);
        let speak = &nodes[0];
        let kinds: Vec<String> = speak
            .children()
            .iter()
            .map(|c| match c {
                MarkupNode::Text { content } => format!("text:{content}"),
                MarkupNode::Tag { name, .. } => format!("tag:{name}"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["text:one", "tag:break", "text:two", "tag:emphasis", "text:four"]
        );
    }

    #[test]
    fn test_top_level_sibling_count() {
        let root = parse_markup("a<b></b>c<d/>").unwrap();
        assert_eq!(root.children().len(), 4);
    }

    #[test]
    fn test_self_closing_never_has_children_regardless_of_spacing() {
        for input in ["<break/>", "<break />", "<break    />", "<break time=1s   />"] {
            let nodes = top_level(input);
            assert_eq!(nodes.len(), 1, "input {input:?}");
            assert!(
                matches!(&nodes[0], MarkupNode::Tag { self_closing: true, children, .. } if children.is_empty()),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_self_closing_does_not_open_a_level() {
        // The sibling after a self-closing tag stays at the same level.
        let nodes = top_level("<speak><break/><s>x</s></speak>");
        assert_eq!(nodes[0].children().len(), 2);
        assert_eq!(nodes[0].children()[1].name(), Some("s"));
    }

    #[test]
    fn test_closing_tag_whitespace_tolerated() {
        let nodes = top_level("<speak>hi</speak >");
        assert_eq!(nodes[0].name(), Some("speak"));
    }

    #[test]
    fn test_greater_than_in_text_is_text() {
        let nodes = top_level("<s>a > b</s>");
        assert_eq!(nodes[0].children(), &[MarkupNode::text("a > b")]);
    }

    // ── errors ──────────────────────────────────────────────────────────────

    #[test]
    fn test_unterminated_tag_reports_position() {
        let err = parse_markup("<speak>hello <break").unwrap_err();
        assert_eq!(err, SsmlError::UnterminatedTag { position: 13 });
    }

    #[test]
    fn test_close_at_root_is_mismatch() {
        let err = parse_markup("text</speak>").unwrap_err();
        assert_eq!(
            err,
            SsmlError::MismatchedCloseTag {
                expected: ROOT_LABEL.to_string(),
                found: "speak".to_string(),
                position: 4,
            }
        );
    }

    #[test]
    fn test_empty_tag_is_malformed() {
        assert!(matches!(
            parse_markup("<>"),
            Err(SsmlError::MalformedTag { .. })
        ));
    }

    #[test]
    fn test_inner_unclosed_tag_named() {
        let err = parse_markup("<speak><p>text</speak>").unwrap_err();
        assert_eq!(
            err,
            SsmlError::MismatchedCloseTag {
                expected: "p".to_string(),
                found: "speak".to_string(),
                position: 14,
            }
        );

        let err = parse_markup("<speak><p>text").unwrap_err();
        assert_eq!(
            err,
            SsmlError::UnclosedTag {
                name: "p".to_string()
            }
        );
    }

    #[test]
    fn test_error_in_deep_child_propagates() {
        let err = parse_markup("<a><b><c bad></c></b></a>").unwrap_err();
        assert_eq!(
            err,
            SsmlError::MalformedAttribute {
                token: "bad".to_string()
            }
        );
    }

    // ── depth guard ─────────────────────────────────────────────────────────

    #[test]
    fn test_depth_at_limit_succeeds() {
        let input = format!("{}{}", "<a>".repeat(3), "</a>".repeat(3));
        assert!(MarkupParser::with_max_depth(3).parse(&input).is_ok());
    }

    #[test]
    fn test_depth_over_limit_fails() {
        let input = format!("{}{}", "<a>".repeat(4), "</a>".repeat(4));
        let err = MarkupParser::with_max_depth(3).parse(&input).unwrap_err();
        assert_eq!(
            err,
            SsmlError::MaxNestingDepthExceeded {
                limit: 3,
                position: 9,
            }
        );
    }

    #[test]
    fn test_self_closing_does_not_count_toward_depth() {
        let parser = MarkupParser::with_max_depth(1);
        assert!(parser.parse("<a><b/><c/></a>").is_ok());
    }

    #[test]
    fn test_deeply_nested_malicious_input_fails_gracefully() {
        let input = "<x>".repeat(100_000);
        assert!(matches!(
            parse_markup(&input),
            Err(SsmlError::MaxNestingDepthExceeded {
                limit: DEFAULT_MAX_DEPTH,
                ..
            })
        ));
    }

    #[test]
    fn test_oversized_bound_is_clamped() {
        let parser = MarkupParser::with_max_depth(10_000_000);
        let input = "<x>".repeat(1_000_000);
        assert_eq!(
            parser.parse(&input).unwrap_err(),
            SsmlError::MaxNestingDepthExceeded {
                limit: MAX_DEPTH_LIMIT,
                position: MAX_DEPTH_LIMIT * 3,
            }
        );
    }

    #[test]
    fn test_deep_nesting_at_hard_limit_succeeds() {
        let input = format!("{}{}", "<x>".repeat(MAX_DEPTH_LIMIT), "</x>".repeat(MAX_DEPTH_LIMIT));
        assert!(MarkupParser::with_max_depth(MAX_DEPTH_LIMIT).parse(&input).is_ok());
    }

    // ── round trip ──────────────────────────────────────────────────────────

    #[test]
    fn test_round_trip_preserves_structure() {
        let mut root = MarkupNode::root();
        root.push_child(MarkupNode::tag(
            "speak",
            attrs(&[("version", "1.0"), ("xml:lang", "en-US")]),
            vec![
                MarkupNode::text("Hello, "),
                MarkupNode::tag(
                    "prosody",
                    attrs(&[("rate", "slow"), ("pitch", "+2st")]),
                    vec![MarkupNode::text("world")],
                ),
                MarkupNode::self_closing("break", attrs(&[("time", "500ms")])),
                MarkupNode::tag("p", Attributes::new(), vec![]),
                MarkupNode::tag(
                    "s",
                    Attributes::new(),
                    vec![MarkupNode::tag(
                        "say-as",
                        attrs(&[("interpret-as", "digits")]),
                        vec![MarkupNode::text("123")],
                    )],
                ),
            ],
        ));
        root.push_child(MarkupNode::text("tail"));

        let reparsed = parse_markup(&root.to_string()).unwrap();
        assert_eq!(reparsed, root);
    }

    #[test]
    fn test_round_trip_table() {
        let deep = format!(
            "{}core{}",
            "<a>".repeat(DEFAULT_MAX_DEPTH),
            "</a>".repeat(DEFAULT_MAX_DEPTH)
        );
        let cases = [
            "",
            "<p></p>",
            "<speak><p></p><s><w></w></s></speak>",
            r#"<break time="1s" /><mark name="m1"/>"#,
            "just words",
            deep.as_str(),
            r#"<prosody rate="slow" pitch=low rate="fast">x</prosody>"#,
        ];

        for input in cases {
            let tree = parse_markup(input).unwrap();
            let reparsed = parse_markup(&tree.to_string())
                .unwrap_or_else(|e| panic!("reparse of {input:?} failed: {e}"));
            assert_eq!(reparsed, tree, "input {input:?}");
        }
    }

    #[test]
    fn test_duplicate_keys_serialize_once() {
        let tree = parse_markup(r#"<prosody rate="slow" rate="fast">x</prosody>"#).unwrap();
        assert_eq!(tree.to_string(), r#"<prosody rate="fast">x</prosody>"#);
    }
}
