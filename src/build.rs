//! Module writing.
//!
//! # Architecture
//!
//! ```text
//! build_modules()
//!     │
//!     ├── clean output dir        (--clean only)
//!     │
//!     ├── for each category
//!     │       ContentCache::regenerate()
//!     │       write_module() ──► <output>/<module-name>.<ext>
//!     │                          (skipped when the hash on disk matches)
//!     │
//!     └── write manifest.json    { virtual id → file name }
//! ```

use crate::{
    content::{Category, ContentCache, GeneratedModule, ModuleFormat},
    log,
};
use anyhow::{Context, Result, bail};
use std::{collections::BTreeMap, fs, path::Path};

pub const MANIFEST_NAME: &str = "manifest.json";

/// What a build did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub written: usize,
    pub unchanged: usize,
    pub records: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Regenerate every category and write changed modules plus the manifest.
pub fn build_modules(cache: &ContentCache, output: &Path, clean: bool) -> Result<BuildSummary> {
    if clean {
        clean_output(cache, output)?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let mut summary = BuildSummary::default();
    for category in Category::ALL {
        let module = cache.regenerate(category).module;
        let report = &module.report;
        summary.records += report.records;
        summary.skipped += report.skipped.len();
        summary.failed += report.failed.len();

        if write_module(output, &module)? {
            summary.written += 1;
        } else {
            summary.unchanged += 1;
        }
        if !report.skipped.is_empty() {
            log!("build"; "{category}: skipped {} (missing required fields)", report.skipped.join(", "));
        }
    }

    write_if_changed(&output.join(MANIFEST_NAME), &manifest_json(cache.pipeline().format)?)?;

    log!(
        "build";
        "{} records, {} modules written, {} unchanged",
        summary.records, summary.written, summary.unchanged
    );
    Ok(summary)
}

/// Write one module into `dir`. Returns `false` when the file on disk
/// already has the same hash.
pub fn write_module(dir: &Path, module: &GeneratedModule) -> Result<bool> {
    let path = dir.join(module.file_name());
    if hash_on_disk(&path).as_deref() == Some(module.hash.as_str()) {
        return Ok(false);
    }
    write_file(&path, &module.code)?;
    Ok(true)
}

/// `{ virtual id: file name }` for every category.
pub fn manifest(format: ModuleFormat) -> BTreeMap<&'static str, String> {
    Category::ALL
        .into_iter()
        .map(|c| (c.virtual_id(), format!("{}.{}", c.module_name(), format.extension())))
        .collect()
}

pub fn manifest_json(format: ModuleFormat) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&manifest(format))?;
    json.push('\n');
    Ok(json)
}

fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    let hash = blake3::hash(content.as_bytes()).to_hex();
    if hash_on_disk(path).as_deref() == Some(hash.as_str()) {
        return Ok(false);
    }
    write_file(path, content)?;
    Ok(true)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn hash_on_disk(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    Some(blake3::hash(&bytes).to_hex().to_string())
}

/// Remove the output directory, refusing when it contains content.
fn clean_output(cache: &ContentCache, output: &Path) -> Result<()> {
    if !output.exists() {
        return Ok(());
    }
    let pipeline = cache.pipeline();
    if let Some(category) = Category::ALL
        .into_iter()
        .find(|c| pipeline.dir(*c).starts_with(output))
    {
        bail!(
            "Refusing to clean {}: it contains the {category} content directory",
            output.display()
        );
    }

    fs::remove_dir_all(output)
        .with_context(|| format!("Failed to clean output directory {}", output.display()))?;
    log!("build"; "cleaned {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Pipeline;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> (TempDir, ContentCache, PathBuf) {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/skills/dev.md", "---\ncategory: dev\nskills: [Go, Rust]\n---\n");
        write(dir.path(), "content/home/index.md", "---\ntitle: Hi\n---\n");
        let cache = ContentCache::new(Pipeline::new(&dir.path().join("content")));
        let output = dir.path().join("out");
        (dir, cache, output)
    }

    #[test]
    fn test_build_writes_every_module_and_manifest() {
        let (_dir, cache, output) = fixture();
        let summary = build_modules(&cache, &output, false).unwrap();

        assert_eq!(summary.written, Category::ALL.len());
        assert_eq!(summary.records, 3);
        for category in Category::ALL {
            assert!(output.join(format!("{}.js", category.module_name())).is_file());
        }

        let skills = fs::read_to_string(output.join("skills-data.js")).unwrap();
        assert!(skills.contains("export const skillsData = ["));
        let blogs = fs::read_to_string(output.join("blogs-data.js")).unwrap();
        assert!(blogs.contains("export const blogPosts = [];"));

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output.join(MANIFEST_NAME)).unwrap()).unwrap();
        assert_eq!(manifest["virtual:learning-journey"], "learning-journey.js");
    }

    #[test]
    fn test_unchanged_modules_are_not_rewritten() {
        let (dir, cache, output) = fixture();
        build_modules(&cache, &output, false).unwrap();

        let second = build_modules(&cache, &output, false).unwrap();
        assert_eq!(second.written, 0);
        assert_eq!(second.unchanged, Category::ALL.len());

        write(dir.path(), "content/skills/dev.md", "---\ncategory: dev\nskills: [Go]\n---\n");
        let third = build_modules(&cache, &output, false).unwrap();
        assert_eq!(third.written, 1);
    }

    #[test]
    fn test_write_module_hash_skip() {
        let (_dir, cache, output) = fixture();
        fs::create_dir_all(&output).unwrap();
        let module = cache.get_or_generate(Category::Home);

        assert!(write_module(&output, &module).unwrap());
        assert!(!write_module(&output, &module).unwrap());

        fs::write(output.join("home-data.js"), "stale").unwrap();
        assert!(write_module(&output, &module).unwrap());
    }

    #[test]
    fn test_clean_removes_stale_files() {
        let (_dir, cache, output) = fixture();
        write(&output, "old-module.js", "export const old = 1;");

        build_modules(&cache, &output, true).unwrap();
        assert!(!output.join("old-module.js").exists());
        assert!(output.join(MANIFEST_NAME).is_file());
    }

    #[test]
    fn test_clean_refuses_content_directory() {
        let (dir, cache, _output) = fixture();
        let err = build_modules(&cache, dir.path(), true).unwrap_err();
        assert!(err.to_string().contains("Refusing to clean"));
        assert!(dir.path().join("content/skills/dev.md").exists());
    }

    #[test]
    fn test_json_manifest() {
        let manifest = manifest(ModuleFormat::Json);
        assert_eq!(manifest["virtual:home-data"], "home-data.json");
        assert_eq!(manifest.len(), Category::ALL.len());
    }
}
