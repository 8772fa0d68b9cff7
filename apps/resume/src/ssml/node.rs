//! Markup node value type.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Attribute name → unquoted value. Keys are unique; ordering is not significant.
pub type Attributes = BTreeMap<String, String>;

/// A node in a parsed markup tree.
///
/// The root of every parse is a synthetic `Tag` with an empty name. Real tags always
/// have a non-empty name, so `is_root` can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkupNode {
    Tag {
        name: String,
        attributes: Attributes,
        children: Vec<MarkupNode>,
        /// `<x />` rather than `<x></x>`. Self-closing tags never have children.
        self_closing: bool,
    },
    Text {
        content: String,
    },
}

impl MarkupNode {
    /// The synthetic container every parse starts from.
    pub fn root() -> Self {
        MarkupNode::Tag {
            name: String::new(),
            attributes: Attributes::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    pub fn tag(name: impl Into<String>, attributes: Attributes, children: Vec<MarkupNode>) -> Self {
        MarkupNode::Tag {
            name: name.into(),
            attributes,
            children,
            self_closing: false,
        }
    }

    pub fn self_closing(name: impl Into<String>, attributes: Attributes) -> Self {
        MarkupNode::Tag {
            name: name.into(),
            attributes,
            children: Vec::new(),
            self_closing: true,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        MarkupNode::Text {
            content: content.into(),
        }
    }

    /// Tag name, or `None` for text nodes.
    pub fn name(&self) -> Option<&str> {
        match self {
            MarkupNode::Tag { name, .. } => Some(name),
            MarkupNode::Text { .. } => None,
        }
    }

    /// Children in document order. Text nodes have none.
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Tag { children, .. } => children,
            MarkupNode::Text { .. } => &[],
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, MarkupNode::Tag { name, .. } if name.is_empty())
    }

    /// Concatenated text of this node and all its descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let MarkupNode::Text { content } = self {
            out.push_str(content);
        }
        for child in self.children() {
            child.collect_text(out);
        }
    }

    /// Appends a completed child. No-op on text nodes and self-closing tags.
    pub(crate) fn push_child(&mut self, child: MarkupNode) {
        if let MarkupNode::Tag {
            children,
            self_closing: false,
            ..
        } = self
        {
            children.push(child);
        }
    }
}

/// Serializes back to markup. The root emits only its children.
impl fmt::Display for MarkupNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupNode::Text { content } => f.write_str(content),
            MarkupNode::Tag {
                name,
                attributes,
                children,
                self_closing,
            } => {
                if name.is_empty() {
                    for child in children {
                        write!(f, "{child}")?;
                    }
                    return Ok(());
                }

                write!(f, "<{name}")?;
                for (key, value) in attributes {
                    write!(f, " {key}=\"{value}\"")?;
                }
                if *self_closing {
                    return f.write_str(" />");
                }
                f.write_str(">")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{name}>")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_display_nested_tags() {
        let node = MarkupNode::tag(
            "speak",
            Attributes::new(),
            vec![MarkupNode::tag(
                "prosody",
                attrs(&[("rate", "slow")]),
                vec![MarkupNode::text("Hello")],
            )],
        );
        assert_eq!(
            node.to_string(),
            r#"<speak><prosody rate="slow">Hello</prosody></speak>"#
        );
    }

    #[test]
    fn test_display_self_closing() {
        let node = MarkupNode::self_closing("break", attrs(&[("time", "500ms")]));
        assert_eq!(node.to_string(), r#"<break time="500ms" />"#);
    }

    #[test]
    fn test_display_root_emits_children_only() {
        let mut root = MarkupNode::root();
        root.push_child(MarkupNode::text("a"));
        root.push_child(MarkupNode::self_closing("break", Attributes::new()));
        assert_eq!(root.to_string(), "a<break />");
    }

    #[test]
    fn test_push_child_ignored_on_self_closing() {
        let mut node = MarkupNode::self_closing("break", Attributes::new());
        node.push_child(MarkupNode::text("x"));
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_text_content_concatenates_in_order() {
        let node = MarkupNode::tag(
            "speak",
            Attributes::new(),
            vec![
                MarkupNode::text("Hello "),
                MarkupNode::tag("emphasis", Attributes::new(), vec![MarkupNode::text("big")]),
                MarkupNode::self_closing("break", Attributes::new()),
                MarkupNode::text(" world"),
            ],
        );
        assert_eq!(node.text_content(), "Hello big world");
    }

    #[test]
    fn test_attribute_order_does_not_affect_equality() {
        let a = MarkupNode::self_closing("x", attrs(&[("a", "1"), ("b", "2")]));
        let b = MarkupNode::self_closing("x", attrs(&[("b", "2"), ("a", "1")]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let node = MarkupNode::self_closing("break", attrs(&[("time", "1s")]));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "tag");
        assert_eq!(json["name"], "break");
        assert_eq!(json["attributes"]["time"], "1s");
        assert_eq!(json["self_closing"], true);

        let text = serde_json::to_value(MarkupNode::text("hi")).unwrap();
        assert_eq!(text["type"], "text");
        assert_eq!(text["content"], "hi");
    }

    #[test]
    fn test_is_root() {
        assert!(MarkupNode::root().is_root());
        assert!(!MarkupNode::tag("speak", Attributes::new(), vec![]).is_root());
        assert!(!MarkupNode::text("").is_root());
    }

}
