//! `mdsite-parse`: a converter for a small, fixed subset of Markdown.
//!
//! A document is split into blocks on blank lines, each block is classified
//! (paragraph, heading, code, quote, unordered or ordered list), its text is
//! split into inline spans (bold, italic, code, link, image) and the result
//! is assembled into an [`HtmlNode`] tree that renders to markup.
//!
//! # Quick start
//!
//! ```
//! let html = mdsite_parse::markdown_to_html("# Hello\n\nThis is **bold** text").unwrap();
//! assert_eq!(html, "<div><h1>Hello</h1><p>This is <b>bold</b> text</p></div>");
//!
//! let title = mdsite_parse::extract_title("# Hello\n\nbody").unwrap();
//! assert_eq!(title, "Hello");
//! ```

pub mod blocks;
pub mod convert;
pub mod error;
pub mod inline;
pub mod node;
pub mod title;
pub mod types;

pub use blocks::{classify, markdown_to_blocks};
pub use convert::{block_to_node, document_to_node, markdown_to_html};
pub use error::*;
pub use inline::text_to_spans;
pub use node::{Attrs, HtmlNode, span_to_node};
pub use title::extract_title;
pub use types::*;
