//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use crate::content::source::DEFAULT_EXCLUDE;
    use std::path::PathBuf;

    pub fn root() -> PathBuf {
        "content".into()
    }

    pub fn exclude() -> Vec<String> {
        vec![DEFAULT_EXCLUDE.into()]
    }
}

// ============================================================================
// [output] Section Defaults
// ============================================================================

pub mod output {
    use std::path::PathBuf;

    pub fn dir() -> PathBuf {
        "src/generated".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5173
    }

    pub fn reload_port() -> u16 {
        5174
    }
}
