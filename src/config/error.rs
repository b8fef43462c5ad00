//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("folio.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let display = io_err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("folio.toml"));

        let validation = ConfigError::Validation("[serve] port and reload_port must differ".into());
        assert!(validation.to_string().contains("reload_port"));
    }
}
