//! Configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[content]` | Content root, excluded suffixes, dir overrides  |
//! | `[output]`  | Where `build` writes modules, and their format  |
//! | `[serve]`   | Dev server and reload hub ports, watch toggle   |
//!
//! Every section is optional. A missing `folio.toml` is the same as an
//! empty one.
//!
//! # Example
//!
//! ```toml
//! [content]
//! root = "content"
//!
//! [content.dirs]
//! learning-journey = "journey"
//!
//! [output]
//! dir = "src/generated"
//! format = "esm"
//!
//! [serve]
//! port = 5173
//! ```

mod content;
pub mod defaults;
mod error;
mod output;
mod serve;

pub use error::ConfigError;

use content::ContentConfig;
use output::OutputConfig;
use serve::ServeConfig;

use crate::{
    cli::{Cli, Commands},
    content::{Category, Pipeline},
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute project root (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl FromStr for SiteConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

impl SiteConfig {
    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        content.parse()
    }

    /// Load the config named by the CLI, apply CLI overrides and resolve
    /// every path against the project root.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli, root);
        config.validate()?;
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli, root: &Path) {
        update_option(&mut self.content.root, cli.content.as_ref());
        update_option(&mut self.output.dir, cli.output.as_ref());

        match &cli.command {
            Commands::Build { format, .. } => {
                if let Some(format) = format {
                    self.output.format = (*format).into();
                }
            }
            Commands::Serve {
                interface,
                port,
                watch,
            } => {
                update_option(&mut self.serve.interface, interface.as_ref());
                update_option(&mut self.serve.port, port.as_ref());
                update_option(&mut self.serve.watch, watch.as_ref());
            }
            Commands::Watch | Commands::Inspect { .. } => {}
        }

        self.resolve_paths(root, &cli.config);
    }

    /// Make every configured path absolute. Relative paths resolve against
    /// the root; category overrides resolve against the content root.
    fn resolve_paths(&mut self, root: &Path, config: &Path) {
        let root = normalize_path(root);
        self.config_path = normalize_path(&root.join(config));
        self.content.root = resolve(&root, &self.content.root);
        self.output.dir = resolve(&root, &self.output.dir);

        let content_root = self.content.root.clone();
        for dir in self.content.dirs.values_mut() {
            *dir = resolve(&content_root, dir);
        }
        self.root = root;
    }

    /// Validate configuration state
    pub fn validate(&self) -> Result<()> {
        let unknown = self.content.unknown_dirs();
        if !unknown.is_empty() {
            let known: Vec<_> = Category::ALL.iter().map(|c| c.name()).collect();
            bail!(ConfigError::Validation(format!(
                "[content.dirs] unknown categories: {} (expected one of: {})",
                unknown.join(", "),
                known.join(", ")
            )));
        }

        if self.serve.port == self.serve.reload_port {
            bail!(ConfigError::Validation(
                "[serve] port and reload_port must differ".into()
            ));
        }

        if self.content.exclude.iter().any(String::is_empty) {
            bail!(ConfigError::Validation(
                "[content.exclude] entries must not be empty".into()
            ));
        }

        Ok(())
    }

    /// Pipeline reading from the configured directories.
    pub fn pipeline(&self) -> Pipeline {
        let pipeline = Pipeline::new(&self.content.root)
            .with_options(self.content.source_options())
            .with_format(self.output.format);

        self.content
            .dirs
            .iter()
            .filter_map(|(name, dir)| Some((Category::lookup(name)?, dir.clone())))
            .fold(pipeline, |pipeline, (category, dir)| pipeline.with_dir(category, dir))
    }
}

/// Update config option if CLI value is provided
fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
    if let Some(option) = cli_option {
        *config_option = option.clone();
    }
}

/// Expand `~` and join relative paths onto `base`.
fn resolve(base: &Path, path: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
    if expanded.is_relative() {
        normalize_path(&base.join(expanded))
    } else {
        normalize_path(&expanded)
    }
}

/// Normalize a path to absolute, using canonicalize if the path exists
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}
