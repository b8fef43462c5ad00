//! Splitting a Markdown body into `## Heading` sections.
//!
//! Only second-level headings open a section; text before the first heading
//! is reachable through [`preamble`] only. Heading keys are normalized once on insertion and
//! looked up by exact match, with a small alias table folding synonyms into
//! one canonical key:
//!
//! | Written heading       | Key              |
//! |-----------------------|------------------|
//! | `## Key Learnings`    | `key learnings`  |
//! | `## Learnings:`       | `key learnings`  |
//! | `## Tech Stack`       | `technologies`   |
//! | `## What's Next`      | `next steps`     |

use regex::Regex;
use std::{collections::BTreeMap, sync::LazyLock};

/// A line opening a section: exactly two `#` then a space.
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^##[ \t]+(.*?)\s*$").unwrap());

/// Heading synonyms, `(alias, canonical)`.
const ALIASES: &[(&str, &str)] = &[
    ("learnings", "key learnings"),
    ("what i learned", "key learnings"),
    ("lessons learned", "key learnings"),
    ("tech stack", "technologies"),
    ("tech", "technologies"),
    ("tools", "technologies"),
    ("accomplishments", "achievements"),
    ("what's next", "next steps"),
    ("next", "next steps"),
    ("summary", "overview"),
    ("contact", "contacts"),
    ("contact methods", "contacts"),
];

/// Normalized heading → trimmed section body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap(BTreeMap<String, String>);

impl SectionMap {
    /// Section body by heading. The name goes through the same
    /// normalization as headings do.
    pub fn get(&self, heading: &str) -> Option<&str> {
        self.0.get(&normalize_heading(heading)).map(String::as_str)
    }
}

/// Normalize a heading into its lookup key.
///
/// Trims, lowercases, collapses whitespace, drops a trailing `:` and
/// resolves aliases.
pub fn normalize_heading(heading: &str) -> String {
    let lower = heading.trim().trim_end_matches(':').to_lowercase();
    let key = lower.split_whitespace().collect::<Vec<_>>().join(" ");

    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or(key, |(_, canonical)| (*canonical).to_owned())
}

/// Split a body into sections keyed by normalized heading.
///
/// Empty sections are omitted; a repeated heading keeps the later body.
pub fn split_sections(body: &str) -> SectionMap {
    let mut sections = BTreeMap::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in body.lines() {
        if let Some(caps) = HEADING.captures(line) {
            if let Some((key, lines)) = current.take() {
                insert_section(&mut sections, key, &lines);
            }
            current = Some((normalize_heading(&caps[1]), Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }

    if let Some((key, lines)) = current {
        insert_section(&mut sections, key, &lines);
    }

    SectionMap(sections)
}

/// Text before the first section heading, trimmed.
pub fn preamble(body: &str) -> &str {
    let mut end = body.len();
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if HEADING.is_match(line.trim_end_matches(['\r', '\n'])) {
            end = offset;
            break;
        }
        offset += line.len();
    }
    body[..end].trim()
}

fn insert_section(sections: &mut BTreeMap<String, String>, key: String, lines: &[&str]) {
    let text = lines.join("\n");
    let text = text.trim();
    if key.is_empty() || text.is_empty() {
        return;
    }
    sections.insert(key, text.to_owned());
}
