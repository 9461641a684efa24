use serde::{Deserialize, Serialize};

/// The kind of an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// A typed run of text inside a block.
///
/// `target` holds the URL for `Link` and `Image` spans and is `None` for
/// every other kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSpan {
    pub text: String,
    pub kind: SpanKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl InlineSpan {
    pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
            target: None,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Plain)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::Link,
            target: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: alt.into(),
            kind: SpanKind::Image,
            target: Some(url.into()),
        }
    }

    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }
}

/// Structural type of a block, as decided by [`crate::blocks::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockType {
    Paragraph,
    /// Level is always within `1..=6`.
    Heading { level: u8 },
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl BlockType {
    /// Short lowercase name, used by the wasm bindings and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading { .. } => "heading",
            BlockType::Code => "code",
            BlockType::Quote => "quote",
            BlockType::UnorderedList => "unordered_list",
            BlockType::OrderedList => "ordered_list",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn span_equality_is_structural() {
        assert_eq!(InlineSpan::plain("a"), InlineSpan::new("a", SpanKind::Plain));
        assert_ne!(InlineSpan::plain("a"), InlineSpan::new("a", SpanKind::Bold));
        assert_ne!(
            InlineSpan::link("a", "https://x"),
            InlineSpan::link("a", "https://y")
        );
    }

    #[test]
    fn span_serializes_without_empty_target() {
        let json = serde_json::to_string(&InlineSpan::new("b", SpanKind::Bold)).unwrap();
        assert_eq!(json, r#"{"text":"b","kind":"bold"}"#);

        let json = serde_json::to_string(&InlineSpan::image("alt", "/a.png")).unwrap();
        assert_eq!(json, r#"{"text":"alt","kind":"image","target":"/a.png"}"#);
    }

    #[test]
    fn block_type_names() {
        assert_eq!(BlockType::Heading { level: 3 }.name(), "heading");
        assert_eq!(BlockType::OrderedList.name(), "ordered_list");
    }
}
