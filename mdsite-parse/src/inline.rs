//! Inline splitter.
//!
//! Turns the text of a block into a flat sequence of [`InlineSpan`]s. The
//! stages run in a fixed order and each one only re-splits spans that are
//! still `Plain`, so styles never nest.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConvertError;
use crate::types::{InlineSpan, SpanKind};

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

// The `regex` crate has no look-behind; `find_links` rejects matches that
// directly follow a `!`.
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// A `[label](url)` occurrence with its byte range in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LinkMatch {
    start: usize,
    end: usize,
    label: String,
    url: String,
}

/// Split `text` into typed inline spans.
///
/// Fails with [`ConvertError::MalformedMarkdown`] when a delimiter appears an
/// odd number of times in a plain run.
pub fn text_to_spans(text: &str) -> Result<Vec<InlineSpan>, ConvertError> {
    let spans = vec![InlineSpan::plain(text)];
    let spans = split_delimiter(spans, "**", SpanKind::Bold)?;
    let spans = split_delimiter(spans, "_", SpanKind::Italic)?;
    let spans = split_delimiter(spans, "`", SpanKind::Code)?;
    let spans = split_images(spans);
    Ok(split_links(spans))
}

/// Split every plain span on `delimiter`; odd-indexed segments become `kind`.
///
/// Empty segments are dropped. Spans that are not plain pass through
/// untouched.
pub fn split_delimiter(
    spans: Vec<InlineSpan>,
    delimiter: &str,
    kind: SpanKind,
) -> Result<Vec<InlineSpan>, ConvertError> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        if span.text.matches(delimiter).count() % 2 != 0 {
            return Err(ConvertError::MalformedMarkdown {
                delimiter: delimiter.to_string(),
                text: span.text,
            });
        }

        for (i, segment) in span.text.split(delimiter).enumerate() {
            if segment.is_empty() {
                continue;
            }
            let segment_kind = if i % 2 == 0 { SpanKind::Plain } else { kind };
            out.push(InlineSpan::new(segment, segment_kind));
        }
    }

    Ok(out)
}

/// Extract `![alt](url)` spans out of every plain span.
pub fn split_images(spans: Vec<InlineSpan>) -> Vec<InlineSpan> {
    split_matches(spans, find_images, InlineSpan::image)
}

/// Extract `[text](url)` spans out of every plain span.
///
/// Run after [`split_images`]; a `[` directly preceded by `!` never starts a
/// link.
pub fn split_links(spans: Vec<InlineSpan>) -> Vec<InlineSpan> {
    split_matches(spans, find_links, InlineSpan::link)
}

/// `(alt, url)` pairs of every image in `text`, left to right.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    find_images(text)
        .into_iter()
        .map(|m| (m.label, m.url))
        .collect()
}

/// `(text, url)` pairs of every link in `text`, left to right. Images are not
/// reported.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    find_links(text)
        .into_iter()
        .map(|m| (m.label, m.url))
        .collect()
}

fn split_matches(
    spans: Vec<InlineSpan>,
    find: fn(&str) -> Vec<LinkMatch>,
    make: fn(String, String) -> InlineSpan,
) -> Vec<InlineSpan> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let matches = find(&span.text);
        if matches.is_empty() {
            out.push(span);
            continue;
        }

        let mut cursor = 0;
        for m in matches {
            let before = &span.text[cursor..m.start];
            if !before.is_empty() {
                out.push(InlineSpan::plain(before));
            }
            out.push(make(m.label, m.url));
            cursor = m.end;
        }

        let rest = &span.text[cursor..];
        if !rest.is_empty() {
            out.push(InlineSpan::plain(rest));
        }
    }

    out
}

fn find_images(text: &str) -> Vec<LinkMatch> {
    IMAGE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(LinkMatch {
                start: whole.start(),
                end: whole.end(),
                label: caps[1].to_string(),
                url: caps[2].to_string(),
            })
        })
        .collect()
}

fn find_links(text: &str) -> Vec<LinkMatch> {
    let mut results = Vec::new();
    let mut pos = 0;

    while let Some(caps) = LINK_PATTERN.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else {
            break;
        };

        // Image syntax: retry one byte past the `[` (always ASCII).
        if text[..whole.start()].ends_with('!') {
            pos = whole.start() + 1;
            continue;
        }

        results.push(LinkMatch {
            start: whole.start(),
            end: whole.end(),
            label: caps[1].to_string(),
            url: caps[2].to_string(),
        });
        pos = whole.end();
    }

    results
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
