//! Category parsers.
//!
//! Each parser is a pure function from a [`ParsedFile`] to zero or more
//! records. Returning nothing means the file lacks the category's required
//! fields and is skipped; that is not an error.
//!
//! | Parser            | Required fields            | Records per file |
//! |-------------------|----------------------------|------------------|
//! | `home`            | `title`                    | 0..1             |
//! | `about`           | `headline`                 | 0..1             |
//! | `skills`          | `name` per entry           | 0..N             |
//! | `projects`        | `title`, `description`     | 0..1             |
//! | `blogs`           | `title`, `excerpt`, `date` | 0..1             |
//! | `contact`         | `title`                    | 0..1             |
//! | `learning_journey`| `title`, `period`          | 0..1             |

mod about;
mod blogs;
mod contact;
mod home;
mod journey;
mod projects;
mod skills;

use rustc_hash::FxHashSet;

use super::{
    bullets::extract_bullets,
    engine::{ContentKind, ParsedFile},
    front_matter::FrontMatter,
    types::{
        AboutData, BlogPost, CallToAction, ContactData, HomeData, LearningJourneyItem,
        ProjectData, SkillDataItem, TextBlock,
    },
};

// ============================================================================
// Strategy Table Entries
// ============================================================================

pub struct Home;
pub struct About;
pub struct Skills;
pub struct Projects;
pub struct Blogs;
pub struct Contact;
pub struct LearningJourney;

impl ContentKind for Home {
    type Record = HomeData;

    fn parse(file: &ParsedFile) -> Vec<HomeData> {
        home::parse(file).into_iter().collect()
    }
}

impl ContentKind for About {
    type Record = AboutData;

    fn parse(file: &ParsedFile) -> Vec<AboutData> {
        about::parse(file).into_iter().collect()
    }
}

impl ContentKind for Skills {
    type Record = SkillDataItem;

    fn parse(file: &ParsedFile) -> Vec<SkillDataItem> {
        skills::parse(file)
    }
}

impl ContentKind for Projects {
    type Record = ProjectData;

    fn parse(file: &ParsedFile) -> Vec<ProjectData> {
        projects::parse(file).into_iter().collect()
    }

    fn order(records: &mut [ProjectData]) {
        projects::order(records);
    }
}

impl ContentKind for Blogs {
    type Record = BlogPost;

    fn parse(file: &ParsedFile) -> Vec<BlogPost> {
        blogs::parse(file).into_iter().collect()
    }

    fn order(records: &mut [BlogPost]) {
        blogs::order(records);
    }
}

impl ContentKind for Contact {
    type Record = ContactData;

    fn parse(file: &ParsedFile) -> Vec<ContactData> {
        contact::parse(file).into_iter().collect()
    }
}

impl ContentKind for LearningJourney {
    type Record = LearningJourneyItem;

    fn parse(file: &ParsedFile) -> Vec<LearningJourneyItem> {
        journey::parse(file).into_iter().collect()
    }

    fn order(records: &mut [LearningJourneyItem]) {
        journey::order(records);
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// List from front matter, falling back to the bullets of a section.
fn list_or_bullets(file: &ParsedFile, key: &str, section: &str) -> Vec<String> {
    let list = file.front.list(key);
    if !list.is_empty() {
        return list;
    }
    file.sections.get(section).map(extract_bullets).unwrap_or_default()
}

/// Text from front matter, falling back to a section's prose.
fn text_or_section(file: &ParsedFile, key: &str, section: &str) -> Option<String> {
    file.front
        .text(key)
        .or_else(|| file.sections.get(section).map(str::to_owned))
}

/// Call-to-action from a nested `{label, link}` mapping, or from flat
/// `<key>Label` / `<key>Link` fields.
fn call_to_action(front: &FrontMatter, key: &str) -> Option<CallToAction> {
    let (label, link) = match front.nested(key) {
        Some(nested) => (
            nested.text("label"),
            nested.text("link").or_else(|| nested.text("href")).or_else(|| nested.text("url")),
        ),
        None => (
            front.text(&format!("{key}Label")),
            front.text(&format!("{key}Link")),
        ),
    };
    Some(CallToAction {
        label: label?,
        link: link?,
    })
}

/// Section content as a list when it has bullets, else as prose.
fn text_block(section: &str) -> TextBlock {
    let bullets = extract_bullets(section);
    if bullets.is_empty() {
        TextBlock::Text(section.trim().to_owned())
    } else {
        TextBlock::List(bullets)
    }
}

/// ASCII, lowercase, `-`-joined slug of a display name: `"C++ / Qt"` → `"c-qt"`.
fn slugify(name: &str) -> String {
    deunicode::deunicode(name)
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Suffix repeated ids with `-2`, `-3`, ... in first-seen order.
fn dedupe_ids<'a>(ids: impl IntoIterator<Item = &'a mut String>) {
    let mut seen = FxHashSet::default();
    for id in ids {
        if seen.insert(id.clone()) {
            continue;
        }
        let base = id.clone();
        let mut n = 2;
        while !seen.insert(format!("{base}-{n}")) {
            n += 1;
        }
        *id = format!("{base}-{n}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_to_action_nested_and_flat() {
        let file = ParsedFile::from_text(
            "x.md",
            "---\nprimaryCta:\n  label: Projects\n  link: '#projects'\nsecondaryCtaLabel: Contact\nsecondaryCtaLink: '#contact'\nbroken:\n  label: only label\n---\n",
        );
        assert_eq!(
            call_to_action(&file.front, "primaryCta"),
            Some(CallToAction {
                label: "Projects".into(),
                link: "#projects".into()
            })
        );
        assert_eq!(
            call_to_action(&file.front, "secondaryCta").map(|c| c.link),
            Some("#contact".into())
        );
        assert_eq!(call_to_action(&file.front, "broken"), None);
    }

    #[test]
    fn test_list_or_bullets() {
        let file = ParsedFile::from_text("x.md", "---\ntitle: t\n---\n## Highlights\nProse line\n- One\n- Two\n");
        assert_eq!(list_or_bullets(&file, "highlights", "highlights"), vec!["One", "Two"]);

        let file = ParsedFile::from_text("x.md", "---\nhighlights: a, b\n---\n## Highlights\n- ignored\n");
        assert_eq!(list_or_bullets(&file, "highlights", "highlights"), vec!["a", "b"]);
    }

    #[test]
    fn test_text_block() {
        assert_eq!(text_block("plain prose"), TextBlock::Text("plain prose".into()));
        assert_eq!(
            text_block("intro\n- A\n- B"),
            TextBlock::List(vec!["A".into(), "B".into()])
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rust"), "rust");
        assert_eq!(slugify("C++ / Qt"), "c-qt");
        assert_eq!(slugify("  Node.js  "), "node-js");
        assert_eq!(slugify("Français"), "francais");
        assert_eq!(slugify("C#"), "c");
    }

    #[test]
    fn test_dedupe_ids() {
        let mut ids: Vec<String> = ["a/c", "a/c", "a/go", "a/c", "a/c-2"].map(String::from).into();
        dedupe_ids(ids.iter_mut());
        assert_eq!(ids, vec!["a/c", "a/c-2", "a/go", "a/c-3", "a/c-2-2"]);
    }
}
