//! Content categories and their static properties.
//!
//! | Category           | Virtual id                 | Binding               | Shape     |
//! |--------------------|----------------------------|-----------------------|-----------|
//! | `home`             | `virtual:home-data`        | `homeData`            | singleton |
//! | `about`            | `virtual:about-data`       | `aboutData`           | singleton |
//! | `skills`           | `virtual:skills-data`      | `skillsData`          | array     |
//! | `projects`         | `virtual:projects-data`    | `projectsData`        | array     |
//! | `blogs`            | `virtual:blogs-data`       | `blogPosts`           | array     |
//! | `contact`          | `virtual:contact-data`     | `contactData`         | singleton |
//! | `learning-journey` | `virtual:learning-journey` | `learningJourneyData` | array     |

use std::{fmt, str::FromStr};

/// Prefix shared by all virtual module identifiers.
pub const VIRTUAL_PREFIX: &str = "virtual:";

/// Whether a category yields one record or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// First record wins; `null` when there is none.
    Singleton,
    /// All records; `[]` when there are none.
    Array,
}

/// One of the seven content domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Home,
    About,
    Skills,
    Projects,
    Blogs,
    Contact,
    LearningJourney,
}

impl Category {
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::About,
        Self::Skills,
        Self::Projects,
        Self::Blogs,
        Self::Contact,
        Self::LearningJourney,
    ];

    /// Short name, also the default directory under the content root.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Blogs => "blogs",
            Self::Contact => "contact",
            Self::LearningJourney => "learning-journey",
        }
    }

    /// Identifier UI code imports.
    pub const fn virtual_id(self) -> &'static str {
        match self {
            Self::Home => "virtual:home-data",
            Self::About => "virtual:about-data",
            Self::Skills => "virtual:skills-data",
            Self::Projects => "virtual:projects-data",
            Self::Blogs => "virtual:blogs-data",
            Self::Contact => "virtual:contact-data",
            Self::LearningJourney => "virtual:learning-journey",
        }
    }

    /// Virtual id without the `virtual:` prefix, used as the output file stem.
    pub fn module_name(self) -> &'static str {
        &self.virtual_id()[VIRTUAL_PREFIX.len()..]
    }

    /// Name of the single binding the generated module exports.
    pub const fn export_name(self) -> &'static str {
        match self {
            Self::Home => "homeData",
            Self::About => "aboutData",
            Self::Skills => "skillsData",
            Self::Projects => "projectsData",
            Self::Blogs => "blogPosts",
            Self::Contact => "contactData",
            Self::LearningJourney => "learningJourneyData",
        }
    }

    pub const fn cardinality(self) -> Cardinality {
        match self {
            Self::Home | Self::About | Self::Contact => Cardinality::Singleton,
            Self::Skills | Self::Projects | Self::Blogs | Self::LearningJourney => Cardinality::Array,
        }
    }

    /// Resolve a category from its name, virtual id or module name.
    pub fn lookup(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix(VIRTUAL_PREFIX).unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s || c.module_name() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| {
            let names: Vec<_> = Self::ALL.iter().map(|c| c.name()).collect();
            format!("unknown category `{s}` (expected one of: {})", names.join(", "))
        })
    }
}
