//! Blog post parser.

use crate::content::{
    engine::ParsedFile,
    types::{BlogPost, BlogStatus},
};

/// Reading speed used for `readTime` estimates.
const WORDS_PER_MINUTE: usize = 200;

/// Category tag when none is given.
pub const DEFAULT_CATEGORY: &str = "general";

pub fn parse(file: &ParsedFile) -> Option<BlogPost> {
    let front = &file.front;

    Some(BlogPost {
        id: file.id.clone(),
        title: front.text("title")?,
        excerpt: front.text("excerpt")?,
        date: front.text("date")?,
        read_time: front
            .text("readTime")
            .unwrap_or_else(|| estimate_read_time(&file.body)),
        category: front
            .text("category")
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
        tags: front.list("tags"),
        status: front
            .text("status")
            .map(|s| BlogStatus::parse(&s))
            .unwrap_or_default(),
        featured: front.flag("featured"),
        url: front.text("url"),
        summary: front
            .text("summary")
            .or_else(|| file.sections.get("summary").map(str::to_owned)),
    })
}

/// `"N min read"` for a body, at least one minute.
pub fn estimate_read_time(body: &str) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}

/// Newest first; same date by title.
pub fn order(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post() {
        let file = ParsedFile::from_text(
            "2024/async-rust.md",
            "---\ntitle: Async Rust\nexcerpt: Notes on executors\ndate: 2024-03-01\ntags: rust, async\nstatus: coming soon\n---\nShort body.",
        );
        let post = parse(&file).unwrap();

        assert_eq!(post.id, "2024/async-rust");
        assert_eq!(post.date, "2024-03-01");
        assert_eq!(post.read_time, "1 min read");
        assert_eq!(post.category, DEFAULT_CATEGORY);
        assert_eq!(post.tags, vec!["rust", "async"]);
        assert_eq!(post.status, BlogStatus::ComingSoon);
        assert!(!post.featured);
    }

    #[test]
    fn test_explicit_read_time_wins() {
        let file = ParsedFile::from_text(
            "a.md",
            "---\ntitle: A\nexcerpt: e\ndate: 2024-01-01\nread_time: 12 min read\n---\n",
        );
        assert_eq!(parse(&file).unwrap().read_time, "12 min read");
    }

    #[test]
    fn test_required_fields() {
        let file = ParsedFile::from_text("a.md", "---\ntitle: A\nexcerpt: e\n---\n");
        assert!(parse(&file).is_none());
    }

    #[test]
    fn test_estimate_read_time() {
        assert_eq!(estimate_read_time(""), "1 min read");
        assert_eq!(estimate_read_time(&"word ".repeat(200)), "1 min read");
        assert_eq!(estimate_read_time(&"word ".repeat(201)), "2 min read");
    }

    #[test]
    fn test_order_newest_first() {
        let post = |title: &str, date: &str| BlogPost {
            id: title.into(),
            title: title.into(),
            excerpt: String::new(),
            date: date.into(),
            read_time: String::new(),
            category: DEFAULT_CATEGORY.into(),
            tags: vec![],
            status: BlogStatus::Published,
            featured: false,
            url: None,
            summary: None,
        };
        let mut posts = vec![
            post("Old", "2023-05-01"),
            post("B", "2024-02-01"),
            post("A", "2024-02-01"),
        ];
        order(&mut posts);
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "Old"]);
    }
}
