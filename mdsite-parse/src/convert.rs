//! Block-to-tree conversion.
//!
//! Each classified block becomes one parent node; its text goes through the
//! inline splitter (except code, which is kept verbatim) and every span
//! becomes a leaf.

use crate::blocks::{self, ORDERED_ITEM, block_lines};
use crate::error::ConvertError;
use crate::inline::text_to_spans;
use crate::node::{HtmlNode, span_to_node};
use crate::types::BlockType;

/// Convert a whole document into a `div` holding one child per block.
///
/// The first failing block aborts the conversion.
pub fn document_to_node(document: &str) -> Result<HtmlNode, ConvertError> {
    let children = blocks::markdown_to_blocks(document)
        .iter()
        .map(|block| block_to_node(block, blocks::classify(block)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("div", children))
}

/// Convert a document straight to markup.
pub fn markdown_to_html(document: &str) -> Result<String, ConvertError> {
    document_to_node(document)?.render()
}

/// Convert one block, already classified as `block_type`, into its node.
pub fn block_to_node(block: &str, block_type: BlockType) -> Result<HtmlNode, ConvertError> {
    match block_type {
        BlockType::Paragraph => paragraph_to_node(block),
        BlockType::Heading { .. } => heading_to_node(block),
        BlockType::Code => Ok(code_to_node(block)),
        BlockType::Quote => quote_to_node(block),
        BlockType::UnorderedList => unordered_list_to_node(block),
        BlockType::OrderedList => ordered_list_to_node(block),
    }
}

fn text_to_children(text: &str) -> Result<Vec<HtmlNode>, ConvertError> {
    Ok(text_to_spans(text)?.iter().map(span_to_node).collect())
}

fn paragraph_to_node(block: &str) -> Result<HtmlNode, ConvertError> {
    let text = block_lines(block).join(" ");
    Ok(HtmlNode::parent("p", text_to_children(&text)?))
}

fn heading_to_node(block: &str) -> Result<HtmlNode, ConvertError> {
    let level = block.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return Err(ConvertError::invalid_block(format!(
            "heading level {level} out of range: {block}"
        )));
    }
    if level + 1 >= block.len() {
        return Err(ConvertError::invalid_block(format!(
            "heading has no text: {block}"
        )));
    }
    let text = block.get(level + 1..).ok_or_else(|| {
        ConvertError::invalid_block(format!("heading prefix splits a character: {block}"))
    })?;
    Ok(HtmlNode::parent(
        &format!("h{level}"),
        text_to_children(text)?,
    ))
}

fn code_to_node(block: &str) -> HtmlNode {
    let inner = block.trim_matches('`').trim_matches('\n');
    let mut text = dedent(inner);
    if !text.ends_with('\n') {
        text.push('\n');
    }
    HtmlNode::parent("pre", vec![HtmlNode::parent("code", vec![HtmlNode::text(text)])])
}

fn quote_to_node(block: &str) -> Result<HtmlNode, ConvertError> {
    let lines = block_lines(block)
        .into_iter()
        .map(|line| {
            if !line.starts_with('>') {
                return Err(ConvertError::invalid_block(format!(
                    "quote line without '>': {line}"
                )));
            }
            Ok(line.trim_start_matches('>').trim())
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("blockquote", text_to_children(&lines.join(" "))?))
}

fn unordered_list_to_node(block: &str) -> Result<HtmlNode, ConvertError> {
    let items = block_lines(block)
        .into_iter()
        .map(|line| -> Result<HtmlNode, ConvertError> {
            let text = line.strip_prefix("- ").ok_or_else(|| {
                ConvertError::invalid_block(format!("list line without '- ': {line}"))
            })?;
            Ok(HtmlNode::parent("li", text_to_children(text)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("ul", items))
}

fn ordered_list_to_node(block: &str) -> Result<HtmlNode, ConvertError> {
    let items = block_lines(block)
        .into_iter()
        .map(|line| -> Result<HtmlNode, ConvertError> {
            let text = ORDERED_ITEM
                .captures(line)
                .and_then(|caps| caps.get(2))
                .ok_or_else(|| {
                    ConvertError::invalid_block(format!("list line without 'N. ': {line}"))
                })?;
            Ok(HtmlNode::parent("li", text_to_children(text.as_str())?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("ol", items))
}

/// Remove the longest leading whitespace shared by every non-blank line.
///
/// Whitespace-only lines are emptied and do not take part in the prefix.
fn dedent(text: &str) -> String {
    let prefix = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
            &line[..indent]
        })
        .reduce(common_prefix)
        .unwrap_or("");

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[prefix.len()..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let shared = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..shared]
}
