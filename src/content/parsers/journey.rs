//! Learning journey parser.
//!
//! Milestones are ordered chronologically by a key derived from `period`:
//!
//! | Period           | Key   |
//! |------------------|-------|
//! | `"2024-Present"` | 9999  |
//! | `"Ongoing"`      | 9999  |
//! | `"2018-2023"`    | 2018  |
//! | `"2025+"`        | 2025  |
//! | `"N/A"`          | 0     |
//!
//! Open-ended periods always sort last; periods without a year sort first.

use super::text_block;
use crate::content::{
    engine::ParsedFile,
    types::{ExpandedContent, JourneyCategory, LearningJourneyItem, TextBlock},
};
use regex::Regex;
use std::sync::LazyLock;

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{4}").unwrap());

/// Sort key of open-ended periods.
const LATEST: u32 = 9999;

/// Icon and color shown for a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JourneyStyle {
    pub icon: &'static str,
    pub color: &'static str,
}

/// Category → style. Never read from content files.
const STYLES: &[(&str, JourneyStyle)] = &[
    ("education", JourneyStyle { icon: "graduation-cap", color: "bg-blue-500" }),
    ("work", JourneyStyle { icon: "briefcase", color: "bg-green-500" }),
    ("project", JourneyStyle { icon: "code", color: "bg-purple-500" }),
    ("skill", JourneyStyle { icon: "lightbulb", color: "bg-yellow-500" }),
    ("certification", JourneyStyle { icon: "award", color: "bg-orange-500" }),
];

const FALLBACK_STYLE: JourneyStyle = JourneyStyle {
    icon: "book",
    color: "bg-gray-500",
};

/// Style for a category name, with a grey book for anything unmapped.
pub fn style_for(category: &str) -> JourneyStyle {
    STYLES
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(FALLBACK_STYLE, |(_, style)| *style)
}

/// Chronological sort key of a period string.
pub fn period_sort_key(period: &str) -> u32 {
    let lower = period.to_lowercase();
    if lower.contains("present") || lower.contains("ongoing") {
        return LATEST;
    }
    YEAR.find(period)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

pub fn parse(file: &ParsedFile) -> Option<LearningJourneyItem> {
    let front = &file.front;
    let title = front.text("title")?;
    let period = front.text("period")?;
    let category = front
        .text("category")
        .map(|c| JourneyCategory::parse(&c))
        .unwrap_or_default();
    let description = front.text("description").unwrap_or_default();
    let style = style_for(category.as_str());

    let section = |name: &str| file.sections.get(name).map(text_block);
    let expanded_content = ExpandedContent {
        overview: section("overview").unwrap_or_else(|| TextBlock::Text(description.clone())),
        key_learnings: section("key learnings").unwrap_or_default(),
        technologies: section("technologies"),
        achievements: section("achievements"),
        challenges: section("challenges"),
        next_steps: section("next steps"),
    };

    Some(LearningJourneyItem {
        id: file.id.clone(),
        title,
        period,
        category,
        description,
        icon: style.icon.to_owned(),
        color: style.color.to_owned(),
        expanded_content,
    })
}

/// Stable ascending sort by period key.
pub fn order(items: &mut [LearningJourneyItem]) {
    items.sort_by_key(|item| period_sort_key(&item.period));
}
