//! Markdown file discovery.
//!
//! Walks a category directory and returns every `.md` file with its path
//! relative to the directory, always `/`-separated so generated ids are the
//! same on every platform.

use crate::log;
use std::{fs, path::Path};
use walkdir::WalkDir;

/// Suffix excluded by default (internal docs living next to content).
pub const DEFAULT_EXCLUDE: &str = "spec.md";

/// A discovered content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownFile {
    /// Path relative to the scanned root, `/`-separated.
    pub path: String,
    /// Raw file text.
    pub content: String,
}

/// Discovery settings shared by all categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// File name suffixes that are never content.
    pub exclude: Vec<String>,
    /// Follow symbolic links while walking. Loops are reported and skipped.
    pub follow_links: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            exclude: vec![DEFAULT_EXCLUDE.to_owned()],
            follow_links: false,
        }
    }
}

impl SourceOptions {
    /// Whether a file name is a content file under these options.
    pub fn is_content_name(&self, name: &str) -> bool {
        name.ends_with(".md") && !self.exclude.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }
}

/// Read every Markdown file under `root`, sorted by relative path.
///
/// A missing root yields an empty list. Unreadable entries are logged and
/// skipped.
pub fn read_markdown_files(root: &Path, options: &SourceOptions) -> Vec<MarkdownFile> {
    if !root.is_dir() {
        return Vec::new();
    }

    let walker = WalkDir::new(root)
        .follow_links(options.follow_links)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log!("warn"; "skipping entry under {}: {err}", root.display());
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy();
        if !entry.file_type().is_file() || !options.is_content_name(&name) {
            continue;
        }

        let Some(path) = relative_slash_path(entry.path(), root) else {
            continue;
        };

        match fs::read_to_string(entry.path()) {
            Ok(content) => files.push(MarkdownFile { path, content }),
            Err(err) => log!("warn"; "cannot read {}: {err}", entry.path().display()),
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

/// `root/a/b.md` → `"a/b.md"`
pub fn relative_slash_path(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

/// Record id for a file: relative path without the `.md` extension.
pub fn file_id(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.strip_suffix(".md").unwrap_or(&path).to_owned()
}
