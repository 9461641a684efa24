//! HTML node tree and serializer.
//!
//! Values are emitted verbatim: the text comes from Markdown the site author
//! wrote, so nothing is HTML-escaped. Void elements (`img`, `br`, ...) with an
//! empty value are written without a closing tag.

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;
use crate::types::{InlineSpan, SpanKind};

const VOID_ELEMENTS: &[&str] = &["area", "br", "col", "hr", "img", "input", "link", "meta", "wbr"];

/// Element attributes, rendered in insertion order.
pub type Attrs = Vec<(String, String)>;

/// A node of the output HTML tree.
///
/// Fields are optional so that [`HtmlNode::render`] can report a malformed
/// node instead of panicking. The constructors always build valid nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum HtmlNode {
    Leaf {
        #[serde(skip_serializing_if = "Option::is_none")]
        tag: Option<String>,
        value: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attrs: Attrs,
    },
    Parent {
        tag: Option<String>,
        children: Option<Vec<HtmlNode>>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attrs: Attrs,
    },
}

impl HtmlNode {
    /// Untagged leaf: renders as the bare value.
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: None,
            value: Some(value.into()),
            attrs: Vec::new(),
        }
    }

    pub fn leaf(tag: &str, value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.to_string()),
            value: Some(value.into()),
            attrs: Vec::new(),
        }
    }

    pub fn parent(tag: &str, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent {
            tag: Some(tag.to_string()),
            children: Some(children),
            attrs: Vec::new(),
        }
    }

    /// Append an attribute. Later calls render after earlier ones.
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        match &mut self {
            HtmlNode::Leaf { attrs, .. } | HtmlNode::Parent { attrs, .. } => {
                attrs.push((key.to_string(), value.into()));
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf { tag, .. } | HtmlNode::Parent { tag, .. } => tag.as_deref(),
        }
    }

    /// Children of a parent node; empty for leaves.
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Parent {
                children: Some(children),
                ..
            } => children,
            _ => &[],
        }
    }

    /// Serialize this node and its descendants to markup.
    pub fn render(&self) -> Result<String, ConvertError> {
        let mut out = String::new();
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<(), ConvertError> {
        match self {
            HtmlNode::Leaf { tag, value, attrs } => {
                let value = value.as_deref().ok_or(ConvertError::MissingValue)?;
                match tag {
                    None => out.push_str(value),
                    Some(tag) => {
                        open_tag(out, tag, attrs);
                        if !(value.is_empty() && VOID_ELEMENTS.contains(&tag.as_str())) {
                            out.push_str(value);
                            close_tag(out, tag);
                        }
                    }
                }
            }
            HtmlNode::Parent {
                tag,
                children,
                attrs,
            } => {
                let tag = tag.as_deref().ok_or(ConvertError::MissingTag)?;
                let children = children.as_ref().ok_or(ConvertError::MissingChildren)?;
                open_tag(out, tag, attrs);
                for child in children {
                    child.render_into(out)?;
                }
                close_tag(out, tag);
            }
        }
        Ok(())
    }
}

fn open_tag(out: &mut String, tag: &str, attrs: &Attrs) {
    out.push('<');
    out.push_str(tag);
    out.push_str(&attrs_to_html(attrs));
    out.push('>');
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Render attributes as ` key="value"` pairs, each with one leading space.
pub fn attrs_to_html(attrs: &Attrs) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!(" {key}=\"{value}\""))
        .collect()
}

/// Map an inline span to the leaf node that renders it.
pub fn span_to_node(span: &InlineSpan) -> HtmlNode {
    let target = span.target.clone().unwrap_or_default();
    match span.kind {
        SpanKind::Plain => HtmlNode::text(span.text.as_str()),
        SpanKind::Bold => HtmlNode::leaf("b", span.text.as_str()),
        SpanKind::Italic => HtmlNode::leaf("i", span.text.as_str()),
        SpanKind::Code => HtmlNode::leaf("code", span.text.as_str()),
        SpanKind::Link => HtmlNode::leaf("a", span.text.as_str()).with_attr("href", target),
        SpanKind::Image => HtmlNode::leaf("img", "")
            .with_attr("src", target)
            .with_attr("alt", span.text.as_str()),
    }
}

impl From<&InlineSpan> for HtmlNode {
    fn from(span: &InlineSpan) -> Self {
        span_to_node(span)
    }
}
