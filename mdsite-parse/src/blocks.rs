//! Block segmentation and classification.
//!
//! A document is cut into blocks on blank lines; each block is then typed by
//! looking at its lines. Both steps are pure functions of their input.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::BlockType;

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Matches one ordered-list line and captures the item text.
pub(crate) static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.+)$").unwrap());

const CODE_FENCE: &str = "```";

/// Split a document into trimmed, non-empty blocks, in source order.
pub fn markdown_to_blocks(document: &str) -> Vec<String> {
    let normalised = document.replace("\r\n", "\n");
    BLANK_LINES
        .split(&normalised)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decide the structural type of a block.
///
/// Checks run in priority order and the first hit wins, so `# 1. text` is a
/// heading rather than an ordered list.
pub fn classify(block: &str) -> BlockType {
    let lines = block_lines(block);
    let first = lines[0];

    if let Some(level) = heading_level(first) {
        return BlockType::Heading { level };
    }
    if first.starts_with(CODE_FENCE) && block.ends_with(CODE_FENCE) {
        return BlockType::Code;
    }
    if lines.iter().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }
    if lines.iter().all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }
    if lines.iter().all(|line| ORDERED_ITEM.is_match(line)) {
        return BlockType::OrderedList;
    }
    BlockType::Paragraph
}

/// Lines of a block; an empty block counts as a single empty line.
pub(crate) fn block_lines(block: &str) -> Vec<&str> {
    let lines: Vec<&str> = block.lines().collect();
    if lines.is_empty() { vec![""] } else { lines }
}

/// `Some(level)` when `line` opens with 1–6 `#` followed by a space.
fn heading_level(line: &str) -> Option<u8> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
        u8::try_from(hashes).ok()
    } else {
        None
    }
}
