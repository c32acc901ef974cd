//! Calculator configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid YAML for [`CalculatorConfig`]
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Values parsed but make no sense
    #[error("Configuration error: {message}")]
    Invalid {
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid-value error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Shell and front-end settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Completion file used by the native front end
    pub storage_path: PathBuf,
    /// How long the success page state lasts, in milliseconds
    pub celebration_ms: u64,
    /// Share endpoint; the page URL is appended verbatim
    pub share_base_url: String,
    /// URL shared by front ends that have no location of their own
    pub page_url: String,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Log destination for the interactive terminal, which owns stderr
    pub log_file: Option<PathBuf>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("target/ctf-calculator/completion.json"),
            celebration_ms: 3000,
            share_base_url: "https://www.facebook.com/sharer/sharer.php?u=".to_string(),
            page_url: "http://localhost:8080/".to_string(),
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

impl CalculatorConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a YAML document
    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a YAML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Rejects settings the shell cannot work with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.share_base_url.trim().is_empty() {
            return Err(ConfigError::invalid("share_base_url must not be empty"));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::invalid("log_level must not be empty"));
        }
        Ok(())
    }

    /// Set the completion file
    #[must_use]
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    /// Set the celebration delay
    #[must_use]
    pub const fn with_celebration_ms(mut self, ms: u64) -> Self {
        self.celebration_ms = ms;
        self
    }

    /// Set the default log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the log file
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Celebration delay as a duration
    #[must_use]
    pub const fn celebration(&self) -> Duration {
        Duration::from_millis(self.celebration_ms)
    }

    /// Share link for a page URL
    #[must_use]
    pub fn share_url(&self, page_url: &str) -> String {
        format!("{}{page_url}", self.share_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CalculatorConfig::default();
        assert_eq!(config.celebration_ms, 3000);
        assert_eq!(config.celebration(), Duration::from_secs(3));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_file, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = CalculatorConfig::new()
            .with_storage_path("/tmp/x.json")
            .with_celebration_ms(10)
            .with_log_level("debug")
            .with_log_file("/tmp/calc.log");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/x.json"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/calc.log")));
        assert_eq!(config.celebration_ms, 10);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_share_url_appends_page_url_verbatim() {
        let config = CalculatorConfig::default();
        assert_eq!(
            config.share_url("http://host/calc?a=1"),
            "https://www.facebook.com/sharer/sharer.php?u=http://host/calc?a=1"
        );
    }

    #[test]
    fn test_from_yaml_partial_uses_defaults() {
        let config = CalculatorConfig::from_yaml("celebration_ms: 500\n").unwrap();
        assert_eq!(config.celebration_ms, 500);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_from_yaml_rejects_empty_share_url() {
        let err = CalculatorConfig::from_yaml("share_base_url: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_from_yaml_rejects_bad_types() {
        let err = CalculatorConfig::from_yaml("celebration_ms: soon\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("calc.yaml");
        std::fs::write(&path, "page_url: http://example.test/\n").unwrap();
        let config = CalculatorConfig::load(&path).unwrap();
        assert_eq!(config.page_url, "http://example.test/");
    }

    #[test]
    fn test_load_missing_file() {
        let err = CalculatorConfig::load(Path::new("/nonexistent/calc.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
