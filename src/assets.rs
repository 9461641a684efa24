//! Filesystem helpers: static asset copying and content discovery.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Replace `dst` with a recursive copy of `src`. Returns the number of files
/// copied.
///
/// A missing `src` leaves an empty `dst`.
pub fn copy_static(src: &Path, dst: &Path) -> Result<usize> {
    if dst.exists() {
        fs::remove_dir_all(dst).with_context(|| format!("Failed to remove {}", dst.display()))?;
    }
    fs::create_dir_all(dst).with_context(|| format!("Failed to create {}", dst.display()))?;

    if !src.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let dest_path = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)
                .with_context(|| format!("Failed to create {}", dest_path.display()))?;
        } else {
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest_path).with_context(|| {
                format!("Failed to copy {} -> {}", entry.path().display(), dest_path.display())
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Recursively list the Markdown files under `dir`, as paths relative to it.
pub fn content_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !dir.exists() {
        return Ok(files);
    }

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            let rel = entry
                .path()
                .strip_prefix(dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(rel);
        }
    }

    Ok(files)
}

/// Output location of a content file: same relative path, `.html` extension.
pub fn page_path(public_dir: &Path, rel_content: &Path) -> PathBuf {
    public_dir.join(rel_content).with_extension("html")
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}
