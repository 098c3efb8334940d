//! Session configuration read from `rptmodel.toml`.
//!
//! Every field has a default, so an empty file (or no file) is valid.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// File name looked up by [`discover_config`].
pub const CONFIG_FILE_NAME: &str = "rptmodel.toml";

/// Deepest library inclusion chain accepted by default.
pub const DEFAULT_MAX_LIBRARY_DEPTH: usize = 8;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// SessionConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Extra directory searched for included libraries after the including
    /// document's own directory.
    pub resource_path: Option<PathBuf>,

    /// Locale used for display names (`de`, `de_CH`, ...).
    pub locale: String,

    /// Fail opening a document when the semantic check reports errors, and
    /// treat a missing library as an error instead of a warning.
    pub strict_semantics: bool,

    pub max_library_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            resource_path: None,
            locale: "en".to_string(),
            strict_semantics: false,
            max_library_depth: DEFAULT_MAX_LIBRARY_DEPTH,
        }
    }
}

impl SessionConfig {
    /// Reject values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_library_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_library_depth must be at least 1".to_string(),
            ));
        }
        if self.locale.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "locale '{}' contains whitespace",
                self.locale
            )));
        }

        Ok(())
    }
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> Result<SessionConfig, ConfigError> {
    let config: SessionConfig = toml::from_str(text)?;
    config.validate()?;

    Ok(config)
}

/// Load and validate a config file. A relative `resource_path` is taken
/// relative to the file's directory.
pub fn load_config(path: &Path) -> Result<SessionConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse_config(&text)?;

    if let Some(resource) = &config.resource_path
        && resource.is_relative()
        && let Some(dir) = path.parent()
    {
        config.resource_path = Some(dir.join(resource));
    }

    Ok(config)
}

/// Find `rptmodel.toml` in `start` or its ancestors.
#[must_use]
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.max_library_depth, DEFAULT_MAX_LIBRARY_DEPTH);
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn fields_are_read() {
        let config = parse_config(
            r#"
            resource_path = "libs"
            locale = "de_CH"
            strict_semantics = true
            max_library_depth = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.resource_path, Some(PathBuf::from("libs")));
        assert_eq!(config.locale, "de_CH");
        assert!(config.strict_semantics);
        assert_eq!(config.max_library_depth, 3);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = parse_config("resource_dir = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_depth_is_invalid() {
        let err = parse_config("max_library_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/rptmodel.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn relative_resource_path_follows_config_file() {
        let dir = std::env::temp_dir().join(format!("rptmodel-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, "resource_path = \"libs\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.resource_path, Some(dir.join("libs")));
        assert_eq!(discover_config(&dir.join("nested")), Some(path));

        fs::remove_dir_all(&dir).unwrap();
    }
}
