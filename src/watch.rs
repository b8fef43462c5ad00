//! File system watcher for per-category regeneration.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         Event Loop                             │
//! │                                                                │
//! │  ┌──────────┐    ┌───────────┐    ┌─────────────────────────┐  │
//! │  │ notify   │───▶│ Debouncer │───▶│ classify()              │  │
//! │  │ events   │    │ (300ms)   │    │   path → categories     │  │
//! │  └──────────┘    └───────────┘    │   config → restart hint │  │
//! │                                   └────────────┬────────────┘  │
//! │                                                ▼               │
//! │                                   apply_changes()              │
//! │                                     regenerate (cache)         │
//! │                                     write module (optional)    │
//! │                                     ReloadSink::notify         │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the categories whose directories contain a changed file are
//! touched; every other cached module stays as it is.

use crate::{
    build::write_module,
    config::SiteConfig,
    content::{Category, ContentCache},
    log,
    logger::WatchStatus,
    reload::ReloadSink,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::mpsc::{RecvTimeoutError, channel},
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events until they settle.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    delay: Duration,
}

impl Debouncer {
    fn new(delay: Duration) -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            delay,
        }
    }

    fn add(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.pending
            .extend(paths.into_iter().filter(|p| !is_temp_file(p)));
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty() && self.last_event.is_some_and(|t| t.elapsed() >= self.delay)
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            self.delay
        }
    }
}

// =============================================================================
// Change Handling
// =============================================================================

/// What a batch of changed paths means.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Changes {
    pub categories: BTreeSet<Category>,
    pub config_changed: bool,
}

/// Map changed paths onto categories and the config file.
pub fn classify(paths: &[PathBuf], cache: &ContentCache, config_path: &Path) -> Changes {
    let mut changes = Changes::default();
    for path in paths {
        if path == config_path {
            changes.config_changed = true;
            continue;
        }
        changes
            .categories
            .extend(cache.pipeline().categories_for(path));
    }
    changes
}

/// Regenerate each category, write it when `output` is set and notify the
/// sink for every module whose source changed.
///
/// Returns the categories that were notified.
pub fn apply_changes(
    categories: &BTreeSet<Category>,
    cache: &ContentCache,
    output: Option<&Path>,
    sink: &dyn ReloadSink,
    status: &mut WatchStatus,
) -> Vec<Category> {
    let mut notified = Vec::new();

    for &category in categories {
        let refresh = cache.regenerate(category);
        if !refresh.changed {
            status.unchanged(category.name());
            continue;
        }

        let module = &refresh.module;
        if let Some(dir) = output
            && let Err(e) = write_module(dir, module)
        {
            // Forget the module so the next event retries the write.
            cache.invalidate(category);
            status.error(&format!("{category}: write failed"), &format!("{e:#}"));
            continue;
        }

        sink.notify(category);
        notified.push(category);

        let report = &module.report;
        let message = format!("{category}: {} records", report.records);
        if report.failed.is_empty() {
            status.success(&message);
        } else {
            let failed: Vec<_> = report.failed.iter().map(|(path, _)| path.as_str()).collect();
            status.warning(&format!("{message}, failed to parse {}", failed.join(", ")));
        }
    }

    notified
}

// =============================================================================
// Watcher Setup
// =============================================================================

/// Paths to watch: the content root, category directories outside it and
/// the config file.
///
/// A content root that does not exist yet is waited for through its nearest
/// existing ancestor.
fn watch_targets(config: &SiteConfig, cache: &ContentCache) -> Vec<(PathBuf, RecursiveMode)> {
    let content_root = &config.content.root;
    let mut targets = Vec::new();

    if content_root.is_dir() {
        targets.push((content_root.clone(), RecursiveMode::Recursive));
    } else if let Some(ancestor) = nearest_existing_dir(content_root) {
        targets.push((ancestor, RecursiveMode::NonRecursive));
    }
    for category in Category::ALL {
        let dir = cache.pipeline().dir(category);
        if dir.is_dir() && !dir.starts_with(content_root) {
            targets.push((dir.to_path_buf(), RecursiveMode::Recursive));
        }
    }
    if config.config_path.is_file() {
        targets.push((config.config_path.clone(), RecursiveMode::NonRecursive));
    }
    targets
}

fn nearest_existing_dir(path: &Path) -> Option<PathBuf> {
    path.ancestors().skip(1).find(|p| p.is_dir()).map(Path::to_path_buf)
}

/// Categories whose directories live under `root`.
fn categories_under(cache: &ContentCache, root: &Path) -> BTreeSet<Category> {
    Category::ALL
        .into_iter()
        .filter(|c| cache.pipeline().dir(*c).starts_with(root))
        .collect()
}

fn rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig, cache: &ContentCache) -> Result<()> {
    let targets = watch_targets(config, cache);
    for (path, mode) in &targets {
        watcher
            .watch(path, *mode)
            .with_context(|| format!("Failed to watch {}", path.display()))?;
    }

    let watched: Vec<_> = targets.iter().map(|(p, _)| rel(p, &config.root)).collect();
    if watched.is_empty() {
        log!("watch"; "nothing to watch under {}", config.root.display());
    } else {
        log!("watch"; "watching {}", watched.join(", "));
    }
    Ok(())
}

// =============================================================================
// Public API
// =============================================================================

/// Watch content until the event channel closes.
///
/// Modules are written to `output` when given; every changed category is
/// announced to `sink`.
pub fn watch_for_changes_blocking(
    config: &SiteConfig,
    cache: &ContentCache,
    output: Option<&Path>,
    sink: &dyn ReloadSink,
) -> Result<()> {
    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, config, cache)?;

    let content_root = &config.content.root;
    let mut awaiting_root = !content_root.is_dir();
    if awaiting_root {
        log!("watch"; "{} does not exist yet, waiting for it", rel(content_root, &config.root));
    }

    let mut debouncer = Debouncer::new(Duration::from_millis(DEBOUNCE_MS));
    let mut status = WatchStatus::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) => debouncer.add(event.paths),
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                let mut changes = classify(&debouncer.take(), cache, &config.config_path);
                if awaiting_root && content_root.is_dir() {
                    awaiting_root = false;
                    match watcher.watch(content_root, RecursiveMode::Recursive) {
                        Ok(()) => log!("watch"; "watching {}", rel(content_root, &config.root)),
                        Err(e) => log!("watch"; "failed to watch {}: {e}", content_root.display()),
                    }
                    changes.categories.extend(categories_under(cache, content_root));
                }
                if changes.config_changed {
                    status.warning("config changed, restart to apply");
                }
                apply_changes(&changes.categories, cache, output, sink, &mut status);
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}
