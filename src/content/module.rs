//! Generated module rendering.
//!
//! A category's records are serialized to JSON and wrapped as an ES module
//! exporting exactly one named binding:
//!
//! ```js
//! // virtual:skills-data (generated from skills/, do not edit)
//! export const skillsData = [ ... ];
//! ```
//!
//! Rendering is a pure function of the records, so unchanged content yields
//! byte-identical output and an identical hash.

use super::category::Category;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output encoding of generated modules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// ES module with a single named export (default).
    #[default]
    Esm,
    /// Bare JSON document.
    Json,
}

impl ModuleFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Esm => "js",
            Self::Json => "json",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Esm => "application/javascript; charset=utf-8",
            Self::Json => "application/json; charset=utf-8",
        }
    }
}

/// Outcome of one generation pass, besides the records themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Number of files read.
    pub files: usize,
    /// Number of records produced (before singleton selection).
    pub records: usize,
    /// Files dropped for missing required fields.
    pub skipped: Vec<String>,
    /// Files dropped because their front matter could not be decoded.
    pub failed: Vec<(String, String)>,
}

/// A fully generated category module.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedModule {
    pub category: Category,
    pub format: ModuleFormat,
    /// Array for array categories, record or `null` for singletons.
    pub data: Value,
    /// Module source text.
    pub code: String,
    /// blake3 hex digest of `code`.
    pub hash: String,
    pub report: GenerationReport,
}

impl GeneratedModule {
    pub fn new(category: Category, format: ModuleFormat, data: Value, report: GenerationReport) -> Self {
        let code = render(category, &data, format);
        let hash = blake3::hash(code.as_bytes()).to_hex().to_string();
        Self {
            category,
            format,
            data,
            code,
            hash,
            report,
        }
    }

    /// Output file name, e.g. `skills-data.js`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.category.module_name(), self.format.extension())
    }

    /// Whether the module exposes no content (`[]` or `null`).
    pub fn is_empty(&self) -> bool {
        match &self.data {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }
}

/// Render module source for a category.
pub fn render(category: Category, data: &Value, format: ModuleFormat) -> String {
    let fallback = || match data {
        Value::Array(_) => "[]".to_owned(),
        _ => "null".to_owned(),
    };
    let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| fallback());

    match format {
        ModuleFormat::Json => format!("{json}\n"),
        ModuleFormat::Esm => format!(
            "// {} (generated from {}/, do not edit)\nexport const {} = {json};\n",
            category.virtual_id(),
            category.name(),
            category.export_name(),
        ),
    }
}
