//! `[content]` section configuration.

use super::defaults;
use crate::content::{Category, SourceOptions};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};

/// `[content]` section in folio.toml - where Markdown sources live.
///
/// # Example
/// ```toml
/// [content]
/// root = "content"
/// exclude = ["spec.md", "draft.md"]
///
/// [content.dirs]
/// blogs = "posts"          # relative to `root`
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Content root; each category reads `<root>/<category>` by default.
    #[serde(default = "defaults::content::root")]
    #[educe(Default = defaults::content::root())]
    pub root: PathBuf,

    /// File name suffixes that are never content.
    #[serde(default = "defaults::content::exclude")]
    #[educe(Default = defaults::content::exclude())]
    pub exclude: Vec<String>,

    /// Follow symbolic links while scanning.
    #[serde(default)]
    pub follow_links: bool,

    /// Per-category directory overrides, keyed by category name.
    #[serde(default)]
    pub dirs: BTreeMap<String, PathBuf>,
}

impl ContentConfig {
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            exclude: self.exclude.clone(),
            follow_links: self.follow_links,
        }
    }

    /// Override keys that do not name a category.
    pub fn unknown_dirs(&self) -> Vec<&str> {
        self.dirs
            .keys()
            .map(String::as_str)
            .filter(|key| Category::lookup(key).is_none())
            .collect()
    }
}
