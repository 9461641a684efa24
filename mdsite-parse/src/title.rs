use crate::error::ConvertError;

/// Title of a document: the first line starting with `# `, without the
/// marker and surrounding whitespace.
///
/// Works on raw lines, independently of block segmentation, so a `# ` line
/// anywhere in the document qualifies.
pub fn extract_title(document: &str) -> Result<String, ConvertError> {
    document
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(ConvertError::MissingTitle)
}
