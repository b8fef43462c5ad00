//! Generic category generation engine.
//!
//! Every category runs through the same steps; only the directory, the
//! cardinality and the parser differ:
//!
//! ```text
//! read_markdown_files(dir)
//!     │
//!     ├── split_front_matter() ── decode error ──► report.failed (warning)
//!     ├── split_sections()
//!     ├── K::parse()           ── no records ───► report.skipped
//!     │
//!     ├── K::order()           (category-specific ordering)
//!     └── Array → [..] | Singleton → first or null ──► GeneratedModule
//! ```

use super::{
    category::{Cardinality, Category},
    front_matter::{FrontMatter, split_front_matter},
    module::{GeneratedModule, GenerationReport, ModuleFormat},
    parsers,
    sections::{SectionMap, split_sections},
    source::{MarkdownFile, SourceOptions, file_id, read_markdown_files, relative_slash_path},
};
use crate::log;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A content file after front matter and section splitting.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    /// Relative `/`-separated path, e.g. `term-1/career-start.md`.
    pub path: String,
    /// Record id derived from the path, e.g. `term-1/career-start`.
    pub id: String,
    pub front: FrontMatter,
    pub sections: SectionMap,
    /// Body text after the front matter, trimmed.
    pub body: String,
}

impl ParsedFile {
    /// Split a discovered file. Fails only on undecodable front matter.
    pub fn parse(file: &MarkdownFile) -> Result<Self, super::front_matter::MarkdownError> {
        let (front, body) = split_front_matter(&file.content)?;
        Ok(Self {
            path: file.path.clone(),
            id: file_id(&file.path),
            sections: split_sections(body),
            body: body.trim().to_owned(),
            front,
        })
    }

    /// Build directly from text, for parser tests.
    #[cfg(test)]
    pub fn from_text(path: &str, content: &str) -> Self {
        Self::parse(&MarkdownFile {
            path: path.to_owned(),
            content: content.to_owned(),
        })
        .unwrap()
    }
}

/// Parsing strategy for one category.
pub trait ContentKind {
    type Record: Serialize;

    /// Turn one file into zero or more records. Zero means "skip this file".
    fn parse(file: &ParsedFile) -> Vec<Self::Record>;

    /// Reorder the collected records. Keeps path order by default.
    fn order(_records: &mut [Self::Record]) {}
}

/// Records collected from a set of files.
#[derive(Debug)]
pub struct Collected<R> {
    pub records: Vec<R>,
    pub report: GenerationReport,
}

/// Parse and flatten records from every file, in file order.
pub fn collect<K: ContentKind>(files: &[MarkdownFile]) -> Collected<K::Record> {
    let mut report = GenerationReport {
        files: files.len(),
        ..GenerationReport::default()
    };
    let mut records = Vec::new();

    for file in files {
        let parsed = match ParsedFile::parse(file) {
            Ok(parsed) => parsed,
            Err(err) => {
                let detail = match std::error::Error::source(&err) {
                    Some(source) => format!("{err}: {source}"),
                    None => err.to_string(),
                };
                log!("warn"; "{}: {detail}", file.path);
                report.failed.push((file.path.clone(), detail));
                continue;
            }
        };

        let produced = K::parse(&parsed);
        if produced.is_empty() {
            report.skipped.push(file.path.clone());
        }
        records.extend(produced);
    }

    K::order(&mut records);
    report.records = records.len();
    Collected { records, report }
}

/// Shape collected records according to the category's cardinality.
pub fn shape<R: Serialize>(cardinality: Cardinality, records: Vec<R>) -> Value {
    match cardinality {
        Cardinality::Array => {
            serde_json::to_value(records).unwrap_or_else(|_| Value::Array(Vec::new()))
        }
        Cardinality::Singleton => records
            .into_iter()
            .next()
            .and_then(|record| serde_json::to_value(record).ok())
            .unwrap_or(Value::Null),
    }
}

fn build<K: ContentKind>(category: Category, files: &[MarkdownFile], format: ModuleFormat) -> GeneratedModule {
    let Collected { records, report } = collect::<K>(files);
    let data = shape(category.cardinality(), records);
    GeneratedModule::new(category, format, data, report)
}

/// Generate a category module from already-read files.
pub fn generate_from_files(category: Category, files: &[MarkdownFile], format: ModuleFormat) -> GeneratedModule {
    match category {
        Category::Home => build::<parsers::Home>(category, files, format),
        Category::About => build::<parsers::About>(category, files, format),
        Category::Skills => build::<parsers::Skills>(category, files, format),
        Category::Projects => build::<parsers::Projects>(category, files, format),
        Category::Blogs => build::<parsers::Blogs>(category, files, format),
        Category::Contact => build::<parsers::Contact>(category, files, format),
        Category::LearningJourney => build::<parsers::LearningJourney>(category, files, format),
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Where each category's content lives and how modules are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    dirs: Vec<(Category, PathBuf)>,
    pub options: SourceOptions,
    pub format: ModuleFormat,
}

impl Pipeline {
    /// Pipeline with every category in its default directory under `root`.
    pub fn new(root: &Path) -> Self {
        Self {
            dirs: Category::ALL
                .into_iter()
                .map(|c| (c, root.join(c.name())))
                .collect(),
            options: SourceOptions::default(),
            format: ModuleFormat::default(),
        }
    }

    /// Override one category's directory.
    pub fn with_dir(mut self, category: Category, dir: PathBuf) -> Self {
        if let Some(entry) = self.dirs.iter_mut().find(|(c, _)| *c == category) {
            entry.1 = dir;
        }
        self
    }

    pub fn with_options(mut self, options: SourceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_format(mut self, format: ModuleFormat) -> Self {
        self.format = format;
        self
    }

    /// Content directory of a category.
    pub fn dir(&self, category: Category) -> &Path {
        self.dirs
            .iter()
            .find(|(c, _)| *c == category)
            .map_or_else(|| Path::new(category.name()), |(_, dir)| dir.as_path())
    }

    /// Read and generate one category from the current disk state.
    pub fn generate(&self, category: Category) -> GeneratedModule {
        let files = read_markdown_files(self.dir(category), &self.options);
        generate_from_files(category, &files, self.format)
    }

    /// Categories a changed path belongs to.
    ///
    /// Only content file names count. Nested category directories are
    /// allowed, so one path may belong to several categories.
    pub fn categories_for(&self, path: &Path) -> Vec<Category> {
        let is_content = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.options.is_content_name(name));
        if !is_content {
            return Vec::new();
        }

        self.dirs
            .iter()
            .filter(|(_, dir)| relative_slash_path(path, dir).is_some())
            .map(|(c, _)| *c)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn md(path: &str, content: &str) -> MarkdownFile {
        MarkdownFile {
            path: path.to_owned(),
            content: content.to_owned(),
        }
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_parsed_file_id_and_sections() {
        let parsed = ParsedFile::from_text("term-1/career-start.md", "---\ntitle: X\n---\n## Key Learnings\n- A\n");
        assert_eq!(parsed.id, "term-1/career-start");
        assert_eq!(parsed.sections.get("key learnings"), Some("- A"));
        assert_eq!(parsed.front.text("title").as_deref(), Some("X"));
    }

    #[test]
    fn test_empty_input_null_safety() {
        for category in Category::ALL {
            let module = generate_from_files(category, &[], ModuleFormat::Esm);
            match category.cardinality() {
                Cardinality::Array => assert_eq!(module.data, json!([])),
                Cardinality::Singleton => assert_eq!(module.data, Value::Null),
            }
        }
    }

    #[test]
    fn test_required_field_gating_does_not_affect_siblings() {
        let files = vec![
            md("a.md", "---\ntitle: A\ndescription: first\n---\n"),
            md("b.md", "---\ntitle: B\n---\n"),
            md("c.md", "---\ntitle: C\ndescription: third\n---\n"),
        ];
        let module = generate_from_files(Category::Projects, &files, ModuleFormat::Esm);

        let ids: Vec<_> = module.data.as_array().unwrap().iter().map(|p| p["id"].clone()).collect();
        assert_eq!(ids, vec![json!("a"), json!("c")]);
        assert_eq!(module.report.skipped, vec!["b.md".to_owned()]);
        assert!(module.report.failed.is_empty());
    }

    #[test]
    fn test_malformed_front_matter_is_isolated() {
        let files = vec![
            md("bad.md", "---\ntitle: [oops\n---\n"),
            md("good.md", "---\ntitle: Good\ndescription: fine\n---\n"),
        ];
        let module = generate_from_files(Category::Projects, &files, ModuleFormat::Esm);

        assert_eq!(module.data.as_array().unwrap().len(), 1);
        assert_eq!(module.report.failed.len(), 1);
        assert_eq!(module.report.failed[0].0, "bad.md");
    }

    #[test]
    fn test_singleton_takes_first_record() {
        let files = vec![
            md("a.md", "---\nsubtitle: no title\n---\n"),
            md("b.md", "---\ntitle: Second\n---\n"),
            md("c.md", "---\ntitle: Third\n---\n"),
        ];
        let module = generate_from_files(Category::Home, &files, ModuleFormat::Esm);
        assert_eq!(module.data["title"], "Second");
        assert_eq!(module.report.records, 2);
    }

    #[test]
    fn test_pipeline_idempotent() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "projects/one.md", "---\ntitle: One\ndescription: d\ntechnologies: rust, wasm\n---\n");
        write(dir.path(), "projects/nested/two.md", "---\ntitle: Two\ndescription: d\n---\n");

        let pipeline = Pipeline::new(dir.path());
        let first = pipeline.generate(Category::Projects);
        let second = pipeline.generate(Category::Projects);

        assert_eq!(first.code, second.code);
        assert_eq!(first.hash, second.hash);
        assert_eq!(first.report.records, 2);
    }

    #[test]
    fn test_pipeline_missing_directory() {
        let dir = TempDir::new().unwrap();
        let pipeline = Pipeline::new(&dir.path().join("missing"));
        assert_eq!(pipeline.generate(Category::Blogs).data, json!([]));
        assert_eq!(pipeline.generate(Category::About).data, Value::Null);
    }

    #[test]
    fn test_categories_for() {
        let root = Path::new("/site/content");
        let pipeline = Pipeline::new(root).with_dir(Category::Blogs, PathBuf::from("/site/posts"));

        assert_eq!(
            pipeline.categories_for(&root.join("skills").join("web.md")),
            vec![Category::Skills]
        );
        assert_eq!(
            pipeline.categories_for(Path::new("/site/posts/2024/hello.md")),
            vec![Category::Blogs]
        );
        assert!(pipeline.categories_for(&root.join("skills").join("web.txt")).is_empty());
        assert!(pipeline.categories_for(&root.join("skills").join("api-spec.md")).is_empty());
        assert!(pipeline.categories_for(Path::new("/elsewhere/x.md")).is_empty());
    }
}
