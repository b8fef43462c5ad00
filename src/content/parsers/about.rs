//! About section parser.

use super::{call_to_action, list_or_bullets, text_or_section};
use crate::content::{engine::ParsedFile, types::AboutData};

pub fn parse(file: &ParsedFile) -> Option<AboutData> {
    let front = &file.front;

    Some(AboutData {
        id: file.id.clone(),
        headline: front.text("headline").or_else(|| front.text("title"))?,
        bio: text_or_section(file, "bio", "bio"),
        strengths: list_or_bullets(file, "strengths", "strengths"),
        values: list_or_bullets(file, "values", "values"),
        current_focus: list_or_bullets(file, "currentFocus", "current focus"),
        cta: call_to_action(front, "cta"),
        narrative: text_or_section(file, "narrative", "narrative")
            .or_else(|| file.sections.get("story").map(str::to_owned)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_about() {
        let file = ParsedFile::from_text(
            "about.md",
            r##"---
headline: Building reliable systems
strengths: [Debugging, Mentoring]
current_focus: "Rust, Distributed systems"
cta:
  label: Say hi
  link: "#contact"
---
## Bio
I write software.

## Values
- Clarity
- Ownership

## Narrative
It started with a broken router.
"##,
        );

        let about = parse(&file).unwrap();
        assert_eq!(about.headline, "Building reliable systems");
        assert_eq!(about.bio.as_deref(), Some("I write software."));
        assert_eq!(about.strengths, vec!["Debugging", "Mentoring"]);
        assert_eq!(about.values, vec!["Clarity", "Ownership"]);
        assert_eq!(about.current_focus, vec!["Rust", "Distributed systems"]);
        assert_eq!(about.cta.unwrap().label, "Say hi");
        assert!(about.narrative.unwrap().contains("router"));
    }

    #[test]
    fn test_title_stands_in_for_headline() {
        let file = ParsedFile::from_text("about.md", "---\ntitle: About me\n---\n");
        assert_eq!(parse(&file).unwrap().headline, "About me");
    }

    #[test]
    fn test_missing_headline_skips() {
        let file = ParsedFile::from_text("about.md", "---\nbio: text\n---\n");
        assert!(parse(&file).is_none());
    }
}
