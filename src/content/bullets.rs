//! List item extraction from section bodies.

use regex::Regex;
use std::sync::LazyLock;

/// `- item` / `* item`, with optional indentation.
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(.+)$").unwrap());

/// `key: value` line inside a bullet block.
static PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_ -]*?)\s*:\s*(.*?)\s*$").unwrap());

/// Extract bullet items in source order.
///
/// Non-list lines are skipped, so prose and lists can share a section.
pub fn extract_bullets(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| BULLET.captures(line))
        .map(|caps| caps[1].trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Extract `key: value` blocks, one per bullet.
///
/// A bullet opens a block; the bullet's own text and the lines following it
/// contribute their `key: value` pairs until the next bullet. Keys are
/// lowercased. Blocks without any pair are dropped.
///
/// ```text
/// - type: email
///   label: Email
///   value: me@example.com
/// - type: github
///   ...
/// ```
pub fn extract_bullet_blocks(text: &str) -> Vec<Vec<(String, String)>> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<(String, String)>> = None;

    for line in text.lines() {
        let rest = if let Some(caps) = BULLET.captures(line) {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            current = Some(Vec::new());
            caps.get(1).map_or("", |m| m.as_str())
        } else {
            line
        };

        if let (Some(block), Some(pair)) = (current.as_mut(), PAIR.captures(rest)) {
            let value = pair[2].trim();
            if !value.is_empty() {
                block.push((pair[1].to_lowercase(), value.to_owned()));
            }
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    blocks.retain(|block| !block.is_empty());
    blocks
}
