//! Record types produced by the category parsers.
//!
//! These are serialized to JSON (camelCase keys) and exposed to UI code via
//! the generated virtual modules.

use serde::Serialize;

// ============================================================================
// Shared Pieces
// ============================================================================

/// Label + link pair used for call-to-action buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub label: String,
    pub link: String,
}

/// Social profile link shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Section content that is either prose or a list.
///
/// A section containing bullets becomes a list of the bullet texts,
/// otherwise the trimmed prose is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TextBlock {
    Text(String),
    List(Vec<String>),
}

impl Default for TextBlock {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

// ============================================================================
// Singleton Records
// ============================================================================

/// Hero section data, exposed as `homeData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeData {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_cta: Option<CallToAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_cta: Option<CallToAction>,
    pub highlights: Vec<String>,
    pub badges: Vec<String>,
    pub social_links: Vec<SocialLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// About section data, exposed as `aboutData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutData {
    pub id: String,
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub strengths: Vec<String>,
    pub values: Vec<String>,
    pub current_focus: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<CallToAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

/// Contact section data, exposed as `contactData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactData {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    pub methods: Vec<ContactMethod>,
}

/// Kind of contact channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    Email,
    Linkedin,
    Github,
    Phone,
}

impl ContactType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" | "mail" => Some(Self::Email),
            "linkedin" => Some(Self::Linkedin),
            "github" => Some(Self::Github),
            "phone" | "tel" => Some(Self::Phone),
            _ => None,
        }
    }

    /// Link derived from the value when no explicit url is given.
    pub fn synthesize_url(self, value: &str) -> Option<String> {
        match self {
            Self::Email => Some(format!("mailto:{value}")),
            Self::Phone => Some(format!("tel:{value}")),
            Self::Linkedin | Self::Github => None,
        }
    }
}

/// A single way to get in touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMethod {
    #[serde(rename = "type")]
    pub kind: ContactType,
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

// ============================================================================
// Array Records
// ============================================================================

/// Skill grouping tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Dev,
    Devops,
    Database,
    Tools,
    #[default]
    Other,
}

impl SkillCategory {
    /// Parse a tag, falling back to `other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "frontend" => Self::Frontend,
            "backend" => Self::Backend,
            "dev" => Self::Dev,
            "devops" => Self::Devops,
            "database" => Self::Database,
            "tools" => Self::Tools,
            _ => Self::Other,
        }
    }
}

/// Self-assessed skill level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Proficiency {
    /// Parse a level, falling back to `beginner`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }
}

/// One skill, exposed in `skillsData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillDataItem {
    pub id: String,
    pub name: String,
    pub category: SkillCategory,
    pub proficiency: Proficiency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Project lifecycle tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Completed,
    InProgress,
    Planned,
}

impl ProjectStatus {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "in-progress" => Self::InProgress,
            "planned" => Self::Planned,
            _ => Self::Completed,
        }
    }
}

/// One project card, exposed in `projectsData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub id: String,
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub gradient: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub highlights: Vec<String>,
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Blog post publication state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlogStatus {
    #[default]
    Published,
    Draft,
    ComingSoon,
}

impl BlogStatus {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "draft" => Self::Draft,
            "coming-soon" => Self::ComingSoon,
            _ => Self::Published,
        }
    }
}

/// One blog post teaser, exposed in `blogPosts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Publication date as written (usually `YYYY-MM-DD`).
    pub date: String,
    pub read_time: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: BlogStatus,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Learning journey milestone kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyCategory {
    Education,
    Work,
    Project,
    #[default]
    Skill,
    Certification,
}

impl JourneyCategory {
    /// Parse a category, falling back to `skill`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "education" => Self::Education,
            "work" => Self::Work,
            "project" => Self::Project,
            "certification" => Self::Certification,
            _ => Self::Skill,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Work => "work",
            Self::Project => "project",
            Self::Skill => "skill",
            Self::Certification => "certification",
        }
    }
}

/// Detail panel of a learning journey milestone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedContent {
    pub overview: TextBlock,
    pub key_learnings: TextBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<TextBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<TextBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenges: Option<TextBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<TextBlock>,
}

/// One milestone, exposed in `learningJourneyData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningJourneyItem {
    pub id: String,
    pub title: String,
    pub period: String,
    pub category: JourneyCategory,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub expanded_content: ExpandedContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_fallbacks() {
        assert_eq!(SkillCategory::parse("DEV"), SkillCategory::Dev);
        assert_eq!(SkillCategory::parse("cooking"), SkillCategory::Other);
        assert_eq!(Proficiency::parse("Advanced"), Proficiency::Advanced);
        assert_eq!(Proficiency::parse("guru"), Proficiency::Beginner);
        assert_eq!(ProjectStatus::parse("in progress"), ProjectStatus::InProgress);
        assert_eq!(ProjectStatus::parse("???"), ProjectStatus::Completed);
        assert_eq!(BlogStatus::parse("coming_soon"), BlogStatus::ComingSoon);
        assert_eq!(JourneyCategory::parse("hobby"), JourneyCategory::Skill);
        assert_eq!(ContactType::parse("twitter"), None);
    }

    #[test]
    fn test_contact_url_synthesis() {
        assert_eq!(
            ContactType::Email.synthesize_url("me@example.com").as_deref(),
            Some("mailto:me@example.com")
        );
        assert_eq!(ContactType::Phone.synthesize_url("+1555").as_deref(), Some("tel:+1555"));
        assert_eq!(ContactType::Github.synthesize_url("octocat"), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(ProjectData {
            id: "p".into(),
            title: "T".into(),
            description: "D".into(),
            technologies: vec![],
            gradient: "g".into(),
            demo_url: Some("https://demo".into()),
            github_url: None,
            highlights: vec![],
            status: ProjectStatus::InProgress,
            featured: false,
            order: None,
        })
        .unwrap();

        assert_eq!(json["demoUrl"], "https://demo");
        assert_eq!(json["status"], "in-progress");
        assert!(json.get("githubUrl").is_none());
        assert!(json.get("featured").is_none());
    }

    #[test]
    fn test_text_block_untagged() {
        assert_eq!(serde_json::to_string(&TextBlock::Text("x".into())).unwrap(), "\"x\"");
        assert_eq!(
            serde_json::to_string(&TextBlock::List(vec!["a".into()])).unwrap(),
            "[\"a\"]"
        );
    }
}
