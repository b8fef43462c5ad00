//! Skills parser. One file fans out into one record per listed skill.
//!
//! ```yaml
//! category: dev
//! skills:
//!   - name: Go
//!     proficiency: advanced
//!   - Rust            # bare name, proficiency defaults to beginner
//! ```

use super::{dedupe_ids, slugify};
use crate::content::{
    bullets::extract_bullets,
    engine::ParsedFile,
    front_matter::{FrontMatter, scalar_text},
    types::{Proficiency, SkillCategory, SkillDataItem},
};
use serde_yaml::Value;

pub fn parse(file: &ParsedFile) -> Vec<SkillDataItem> {
    let mut skills = collect(file);
    dedupe_ids(skills.iter_mut().map(|skill| &mut skill.id));
    skills
}

fn collect(file: &ParsedFile) -> Vec<SkillDataItem> {
    let front = &file.front;
    let category = front
        .text("category")
        .map(|c| SkillCategory::parse(&c))
        .unwrap_or_default();

    let entries = front.items("skills");
    if !entries.is_empty() {
        return entries
            .iter()
            .filter_map(|entry| from_entry(file, category, entry))
            .collect();
    }

    // Single-skill file.
    if front.text("name").is_some() {
        return from_mapping(file, category, front).into_iter().collect();
    }

    file.sections
        .get("skills")
        .map(extract_bullets)
        .unwrap_or_default()
        .into_iter()
        .map(|name| record(file, category, name, Proficiency::default(), None, None))
        .collect()
}

fn from_entry(file: &ParsedFile, category: SkillCategory, entry: &Value) -> Option<SkillDataItem> {
    match FrontMatter::from_value(entry) {
        Some(map) => from_mapping(file, category, &map),
        None => {
            let name = scalar_text(entry)?;
            Some(record(file, category, name, Proficiency::default(), None, None))
        }
    }
}

fn from_mapping(file: &ParsedFile, category: SkillCategory, map: &FrontMatter) -> Option<SkillDataItem> {
    let name = map.text("name")?;
    let category = map
        .text("category")
        .map_or(category, |c| SkillCategory::parse(&c));
    let proficiency = map
        .text("proficiency")
        .or_else(|| map.text("level"))
        .map(|p| Proficiency::parse(&p))
        .unwrap_or_default();

    Some(record(
        file,
        category,
        name,
        proficiency,
        map.text("icon"),
        map.text("description"),
    ))
}

fn record(
    file: &ParsedFile,
    category: SkillCategory,
    name: String,
    proficiency: Proficiency,
    icon: Option<String>,
    description: Option<String>,
) -> SkillDataItem {
    SkillDataItem {
        id: format!("{}/{}", file.id, slugify(&name)),
        name,
        category,
        proficiency,
        icon,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_out_with_default_proficiency() {
        let file = ParsedFile::from_text(
            "languages.md",
            "---\ncategory: dev\nskills:\n  - name: Go\n    proficiency: advanced\n  - name: Rust\n---\n",
        );
        let skills = parse(&file);

        assert_eq!(skills.len(), 2);
        assert!(skills.iter().all(|s| s.category == SkillCategory::Dev));
        assert_eq!(skills[0].name, "Go");
        assert_eq!(skills[0].proficiency, Proficiency::Advanced);
        assert_eq!(skills[1].proficiency, Proficiency::Beginner);
        assert_eq!(skills[1].id, "languages/rust");
    }

    #[test]
    fn test_bare_names_and_nameless_entries() {
        let file = ParsedFile::from_text(
            "tools.md",
            "---\ncategory: tools\nskills:\n  - Docker\n  - icon: x\n  - name: Git\n    category: devops\n---\n",
        );
        let skills = parse(&file);

        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].name, "Docker");
        assert_eq!(skills[0].category, SkillCategory::Tools);
        assert_eq!(skills[1].category, SkillCategory::Devops);
    }

    #[test]
    fn test_single_skill_file() {
        let file = ParsedFile::from_text(
            "rust.md",
            "---\nname: Rust\ncategory: backend\nlevel: intermediate\ndescription: Systems language\n---\n",
        );
        let skills = parse(&file);
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].proficiency, Proficiency::Intermediate);
        assert_eq!(skills[0].description.as_deref(), Some("Systems language"));
    }

    #[test]
    fn test_bullet_fallback() {
        let file = ParsedFile::from_text("web.md", "---\ncategory: frontend\n---\n## Skills\n- React\n- CSS\n");
        let names: Vec<_> = parse(&file).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["React", "CSS"]);
    }

    #[test]
    fn test_ids_stay_unique_within_a_file() {
        let file = ParsedFile::from_text(
            "langs.md",
            "---\ncategory: dev\nskills: [C, C++, 'C#', Français, Francais]\n---\n",
        );
        let ids: Vec<_> = parse(&file).into_iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec!["langs/c", "langs/c-2", "langs/c-3", "langs/francais", "langs/francais-2"]
        );
    }

    #[test]
    fn test_no_skills_skips() {
        let file = ParsedFile::from_text("empty.md", "---\ncategory: dev\n---\nNothing here.");
        assert!(parse(&file).is_empty());
    }
}
