//! YAML front matter extraction.
//!
//! A content file may start with a header block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Hello
//! tags: [rust, web]
//! ---
//! Body text...
//! ```
//!
//! The header is decoded with `serde_yaml` into an open mapping. Parsers read
//! it through the typed accessors on [`FrontMatter`], which accept both the
//! camelCase key (`readTime`) and its snake_case spelling (`read_time`).

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Marker line opening and closing the header block.
const DELIMITER: &str = "---";

/// Front matter decoding errors.
#[derive(Debug, Error)]
pub enum MarkdownError {
    #[error("front matter is not valid YAML")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter must be a mapping, found {0}")]
    NotMapping(&'static str),
}

/// Decoded front matter of a single file.
///
/// Absence of a header block yields an empty mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter(Mapping);

impl FrontMatter {
    /// Wrap a YAML value if it is a mapping.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Mapping(map) => Some(Self(map.clone())),
            Value::Tagged(tagged) => Self::from_value(&tagged.value),
            _ => None,
        }
    }

    /// Raw value lookup. `null` values count as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let value = self.0.get(key).or_else(|| {
            let snake = to_snake_case(key);
            if snake == key {
                None
            } else {
                self.0.get(snake.as_str())
            }
        })?;
        (!value.is_null()).then_some(value)
    }

    /// Scalar field as trimmed text. Empty strings count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_text)
    }

    /// List field, accepting a YAML sequence or a comma-separated string.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.get(key).map(normalize_list).unwrap_or_default()
    }

    /// Boolean flag. Accepts native booleans and `"true"`/`"yes"` strings.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes"),
            _ => false,
        }
    }

    /// Integer field, accepting numbers and numeric strings.
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Nested mapping field.
    pub fn nested(&self, key: &str) -> Option<FrontMatter> {
        self.get(key).and_then(Self::from_value)
    }

    /// Items of a sequence field. Non-sequence values yield nothing.
    pub fn items(&self, key: &str) -> &[Value] {
        match self.get(key) {
            Some(Value::Sequence(items)) => items.as_slice(),
            _ => &[],
        }
    }
}

/// Render a scalar YAML value as trimmed, non-empty text.
pub fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => return scalar_text(&tagged.value),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Normalize a list-like value into trimmed, non-empty strings.
///
/// `[a, " b "]` and `"a, b"` both become `["a", "b"]`.
pub fn normalize_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_text).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect(),
        Value::Tagged(tagged) => normalize_list(&tagged.value),
        other => scalar_text(other).into_iter().collect(),
    }
}

/// Split raw file text into front matter and body.
///
/// Returns an empty mapping and the whole input when there is no header
/// block or the closing marker is missing.
pub fn split_front_matter(text: &str) -> Result<(FrontMatter, &str), MarkdownError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok((FrontMatter::default(), text));
    };
    if first.trim_end() != DELIMITER {
        return Ok((FrontMatter::default(), text));
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let header = &text[header_start..offset];
            let body = &text[offset + line.len()..];
            return Ok((parse_header(header)?, body));
        }
        offset += line.len();
    }

    Ok((FrontMatter::default(), text))
}

fn parse_header(header: &str) -> Result<FrontMatter, MarkdownError> {
    if header.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    match serde_yaml::from_str::<Value>(header)? {
        Value::Null => Ok(FrontMatter::default()),
        Value::Mapping(map) => Ok(FrontMatter(map)),
        Value::Sequence(_) => Err(MarkdownError::NotMapping("a sequence")),
        Value::Tagged(_) => Err(MarkdownError::NotMapping("a tagged value")),
        _ => Err(MarkdownError::NotMapping("a scalar")),
    }
}

/// `readTime` → `read_time`
fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fm(yaml: &str) -> FrontMatter {
        let text = format!("---\n{yaml}\n---\nbody");
        split_front_matter(&text).unwrap().0
    }

    #[test]
    fn test_split_basic() {
        let text = "---\ntitle: Hello\n---\n# Body\n";
        let (front, body) = split_front_matter(text).unwrap();
        assert_eq!(front.text("title").as_deref(), Some("Hello"));
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_without_header() {
        let text = "Just a body\n## Section\n";
        let (front, body) = split_front_matter(text).unwrap();
        assert_eq!(front, FrontMatter::default());
        assert_eq!(body, text);
    }

    #[test]
    fn test_split_unclosed_header_is_body() {
        let text = "---\ntitle: Hello\nno closing marker";
        let (front, body) = split_front_matter(text).unwrap();
        assert_eq!(front, FrontMatter::default());
        assert_eq!(body, text);
    }

    #[test]
    fn test_split_empty_header() {
        let (front, body) = split_front_matter("---\n---\nbody").unwrap();
        assert_eq!(front, FrontMatter::default());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_crlf_and_bom() {
        let text = "\u{feff}---\r\ntitle: Win\r\n---\r\nbody\r\n";
        let (front, body) = split_front_matter(text).unwrap();
        assert_eq!(front.text("title").as_deref(), Some("Win"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_split_invalid_yaml() {
        let result = split_front_matter("---\ntitle: [unclosed\n---\nbody");
        assert!(matches!(result, Err(MarkdownError::Yaml(_))));
    }

    #[test]
    fn test_split_non_mapping_header() {
        let result = split_front_matter("---\n- a\n- b\n---\nbody");
        assert!(matches!(result, Err(MarkdownError::NotMapping(_))));
    }

    #[test]
    fn test_list_sequence_and_string_agree() {
        let native = fm("tags: [rust, \" web \", \"\"]");
        let joined = fm("tags: \"rust,  web ,\"");
        assert_eq!(native.list("tags"), vec!["rust", "web"]);
        assert_eq!(native.list("tags"), joined.list("tags"));
    }

    #[test]
    fn test_list_missing_is_empty() {
        assert!(fm("title: x").list("tags").is_empty());
    }

    #[test]
    fn test_text_scalars() {
        let front = fm("year: 2024\nflag: true\nempty: \"  \"\nnothing:");
        assert_eq!(front.text("year").as_deref(), Some("2024"));
        assert_eq!(front.text("flag").as_deref(), Some("true"));
        assert_eq!(front.text("empty"), None);
        assert_eq!(front.text("nothing"), None);
    }

    #[test]
    fn test_snake_case_fallback() {
        let front = fm("read_time: 5 min read\nprimaryCta:\n  label: Go");
        assert_eq!(front.text("readTime").as_deref(), Some("5 min read"));
        let cta = front.nested("primaryCta").unwrap();
        assert_eq!(cta.text("label").as_deref(), Some("Go"));
    }

    #[test]
    fn test_flag_and_integer() {
        let front = fm("featured: yes\ndraft: false\norder: \"3\"\nweight: 7");
        assert!(front.flag("featured"));
        assert!(!front.flag("draft"));
        assert!(!front.flag("missing"));
        assert_eq!(front.integer("order"), Some(3));
        assert_eq!(front.integer("weight"), Some(7));
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("readTime"), "read_time");
        assert_eq!(to_snake_case("title"), "title");
        assert_eq!(to_snake_case("currentFocus"), "current_focus");
    }
}
