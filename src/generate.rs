//! Page generation: Markdown + template → HTML page.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const TITLE_MARKER: &str = "{{ Title }}";
pub const CONTENT_MARKER: &str = "{{ Content }}";

/// Replace every title and content marker in `template`.
pub fn fill_template(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_MARKER, title)
        .replace(CONTENT_MARKER, content)
}

/// Convert one Markdown document into a full page using `template`.
pub fn render_page(markdown: &str, template: &str) -> Result<String> {
    let content = mdsite_parse::markdown_to_html(markdown)?;
    let title = mdsite_parse::extract_title(markdown)?;
    Ok(fill_template(template, &title, &content))
}

/// Read `from`, render it with `template` and write the page to `dest`,
/// creating parent directories as needed.
pub fn generate_page(from: &Path, template: &str, dest: &Path) -> Result<()> {
    let markdown = fs::read_to_string(from)
        .with_context(|| format!("Failed to read {}", from.display()))?;
    let page = render_page(&markdown, template)
        .with_context(|| format!("Failed to convert {}", from.display()))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(dest, page).with_context(|| format!("Failed to write {}", dest.display()))?;

    Ok(())
}
