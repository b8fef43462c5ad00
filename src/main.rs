//! Folio - Markdown content pipeline for portfolio sites.

mod build;
mod cli;
mod config;
mod content;
mod logger;
mod reload;
mod serve;
mod watch;

use anyhow::Result;
use build::build_modules;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use content::{Category, ContentCache};
use reload::Silent;
use serve::serve_site;
use std::sync::Arc;
use watch::watch_for_changes_blocking;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;
    let cache = ContentCache::new(config.pipeline());

    match &cli.command {
        Commands::Build { clean, .. } => build_modules(&cache, &config.output.dir, *clean).map(|_| ()),
        Commands::Serve { .. } => serve_site(&config, Arc::new(cache)),
        Commands::Watch => {
            let output = &config.output.dir;
            build_modules(&cache, output, false)?;
            watch_for_changes_blocking(&config, &cache, Some(output), &Silent)
        }
        Commands::Inspect { category } => {
            inspect(&cache, *category);
            Ok(())
        }
    }
}

/// Print a module's source, then what was left out of it.
fn inspect(cache: &ContentCache, category: Category) {
    let module = cache.get_or_generate(category);
    println!("{}", module.code);

    let report = &module.report;
    log!(
        "inspect";
        "{}: {} files, {} records, from {}",
        category.virtual_id(),
        report.files,
        report.records,
        cache.pipeline().dir(category).display()
    );
    if module.is_empty() {
        log!("inspect"; "no records; check the files under {}", cache.pipeline().dir(category).display());
    }
    for path in &report.skipped {
        log!("inspect"; "skipped {path} (missing required fields)");
    }
    for (path, reason) in &report.failed {
        log!("error"; "failed {path}: {reason}");
    }
}
