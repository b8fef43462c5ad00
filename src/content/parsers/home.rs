//! Home (hero) parser.

use super::{call_to_action, list_or_bullets};
use crate::content::{
    engine::ParsedFile,
    front_matter::{FrontMatter, scalar_text},
    sections::preamble,
    types::{HomeData, SocialLink},
};

pub fn parse(file: &ParsedFile) -> Option<HomeData> {
    let front = &file.front;

    Some(HomeData {
        id: file.id.clone(),
        title: front.text("title")?,
        subtitle: front.text("subtitle"),
        primary_cta: call_to_action(front, "primaryCta"),
        secondary_cta: call_to_action(front, "secondaryCta"),
        highlights: list_or_bullets(file, "highlights", "highlights"),
        badges: list_or_bullets(file, "badges", "badges"),
        social_links: social_links(front),
        body: Some(preamble(&file.body))
            .filter(|body| !body.is_empty())
            .map(str::to_owned),
    })
}

/// `socialLinks` entries: `{platform, url, label?}` mappings.
///
/// A `platform: url` mapping is accepted as shorthand.
fn social_links(front: &FrontMatter) -> Vec<SocialLink> {
    if let Some(map) = front.get("socialLinks").and_then(serde_yaml::Value::as_mapping) {
        return map
            .iter()
            .filter_map(|(platform, url)| {
                Some(SocialLink {
                    platform: scalar_text(platform)?,
                    url: scalar_text(url)?,
                    label: None,
                })
            })
            .collect();
    }

    front
        .items("socialLinks")
        .iter()
        .filter_map(FrontMatter::from_value)
        .filter_map(|link| {
            Some(SocialLink {
                platform: link.text("platform")?,
                url: link.text("url")?,
                label: link.text("label"),
            })
        })
        .collect()
}
