//! `[output]` section configuration.

use super::defaults;
use crate::content::ModuleFormat;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[output]` section in folio.toml - where `build` writes modules.
///
/// # Example
/// ```toml
/// [output]
/// dir = "src/generated"
/// format = "json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "defaults::output::dir")]
    #[educe(Default = defaults::output::dir())]
    pub dir: PathBuf,

    /// `esm` (default) or `json`.
    #[serde(default)]
    pub format: ModuleFormat,
}
