//! Projects parser.

use super::list_or_bullets;
use crate::content::{
    engine::ParsedFile,
    types::{ProjectData, ProjectStatus},
};
use std::cmp::Ordering;

/// Card gradient when none is given.
pub const DEFAULT_GRADIENT: &str = "from-blue-500 to-purple-600";

pub fn parse(file: &ParsedFile) -> Option<ProjectData> {
    let front = &file.front;

    Some(ProjectData {
        id: file.id.clone(),
        title: front.text("title")?,
        description: front.text("description")?,
        technologies: list_or_bullets(file, "technologies", "technologies"),
        gradient: front
            .text("gradient")
            .unwrap_or_else(|| DEFAULT_GRADIENT.to_owned()),
        demo_url: front.text("demoUrl").or_else(|| front.text("demo")),
        github_url: front
            .text("githubUrl")
            .or_else(|| front.text("sourceUrl"))
            .or_else(|| front.text("github")),
        highlights: list_or_bullets(file, "highlights", "highlights"),
        status: front
            .text("status")
            .map(|s| ProjectStatus::parse(&s))
            .unwrap_or_default(),
        featured: front.flag("featured"),
        order: front.integer("order"),
    })
}

/// Explicit `order` first (ascending), unordered projects after, by id.
pub fn order(projects: &mut [ProjectData]) {
    projects.sort_by(|a, b| match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}
