//! Command-line interface definitions.

use crate::content::{Category, ModuleFormat};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Markdown content pipeline for portfolio sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root; relative paths in the config resolve against it
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Output directory for generated modules (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI spelling of [`ModuleFormat`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Esm,
    Json,
}

impl From<FormatArg> for ModuleFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Esm => Self::Esm,
            FormatArg::Json => Self::Json,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate every category module into the output directory
    Build {
        /// Remove the output directory before writing
        #[arg(long)]
        clean: bool,

        /// Module encoding
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Serve virtual modules over HTTP, regenerating on change
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,

        /// enable watch
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// Build once, then rewrite changed categories as content changes
    Watch,

    /// Print one category's generated module and its report
    Inspect {
        /// Category name or virtual id, e.g. `skills` or `virtual:skills-data`
        #[arg(value_parser = parse_category)]
        category: Category,
    },
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["folio", "-o", "out", "build", "--clean", "--format", "json"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert_eq!(cli.config, PathBuf::from("folio.toml"));
        match cli.command {
            Commands::Build { clean, format } => {
                assert!(clean);
                assert_eq!(format.map(ModuleFormat::from), Some(ModuleFormat::Json));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_serve_watch_flag() {
        let cli = Cli::try_parse_from(["folio", "serve", "--port", "8080", "--watch", "false"]).unwrap();
        match cli.command {
            Commands::Serve { port, watch, interface } => {
                assert_eq!(port, Some(8080));
                assert_eq!(watch, Some(false));
                assert_eq!(interface, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_inspect_category() {
        let cli = Cli::try_parse_from(["folio", "inspect", "virtual:learning-journey"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Inspect { category: Category::LearningJourney }
        ));
        assert!(Cli::try_parse_from(["folio", "inspect", "recipes"]).is_err());
    }
}
