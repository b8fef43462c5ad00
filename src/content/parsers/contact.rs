//! Contact parser.
//!
//! Methods come from a front matter list, or from `key: value` bullet blocks
//! under a `## Contacts` heading when the list is absent. Both produce the
//! same [`ContactMethod`] shape.

use crate::content::{
    bullets::extract_bullet_blocks,
    engine::ParsedFile,
    front_matter::FrontMatter,
    types::{ContactData, ContactMethod, ContactType},
};

pub fn parse(file: &ParsedFile) -> Option<ContactData> {
    let front = &file.front;

    Some(ContactData {
        id: file.id.clone(),
        title: front.text("title")?,
        subtitle: front.text("subtitle"),
        description: front
            .text("description")
            .or_else(|| file.sections.get("description").map(str::to_owned)),
        availability: front.text("availability"),
        methods: methods(file),
    })
}

fn methods(file: &ParsedFile) -> Vec<ContactMethod> {
    let listed: Vec<_> = ["contacts", "methods"]
        .iter()
        .flat_map(|key| file.front.items(key))
        .filter_map(FrontMatter::from_value)
        .filter_map(|entry| {
            method(
                entry.text("type").as_deref(),
                entry.text("label"),
                entry.text("value"),
                entry.text("url"),
                entry.text("icon"),
            )
        })
        .collect();
    if !listed.is_empty() {
        return listed;
    }

    let Some(section) = file.sections.get("contacts") else {
        return Vec::new();
    };

    extract_bullet_blocks(section)
        .into_iter()
        .filter_map(|block| {
            let field = |key: &str| {
                block
                    .iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.clone())
            };
            method(
                field("type").as_deref(),
                field("label"),
                field("value"),
                field("url"),
                field("icon"),
            )
        })
        .collect()
}

/// Normalize one entry; missing type/label/value or an unknown type drops it.
fn method(
    kind: Option<&str>,
    label: Option<String>,
    value: Option<String>,
    url: Option<String>,
    icon: Option<String>,
) -> Option<ContactMethod> {
    let kind = ContactType::parse(kind?)?;
    let value = value?;
    let url = url.or_else(|| kind.synthesize_url(&value));

    Some(ContactMethod {
        kind,
        label: label?,
        value,
        url,
        icon,
    })
}
