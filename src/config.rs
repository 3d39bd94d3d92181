//! Configuration system for the persona quiz
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (PERSONA_QUIZ_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};
use crate::quiz::wizard::DEFAULT_SUBMIT_TIMEOUT;

/// Default persona service address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "persona-quiz.toml";

/// Main quiz configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Persona service connection settings
    pub service: ServiceConfig,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Persona service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the persona service
    pub base_url: String,

    /// Upper bound on one persona generation call, in seconds
    pub timeout_secs: u64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_SUBMIT_TIMEOUT.as_secs(),
        }
    }
}

impl ServiceConfig {
    /// Submission timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_file_size_mb: 100,
            max_files: 5,
            json_format: false,
        }
    }
}

impl QuizConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = match Self::find_config_file(config_path)? {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.expand_paths();
        config.validate()?;

        Ok(config)
    }

    /// Parse a TOML file without applying overrides or validation
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading configuration file");
        let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            Error::config_parse(format!("{}: {}", path.display(), e), Some(e))
        })?;
        info!(path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }

    /// Find the configuration file to use
    pub fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // An explicit path must exist
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = [
            PathBuf::from(LOCAL_CONFIG_FILE),
            dirs::config_dir()
                .map(|p| p.join("persona-quiz").join("config.toml"))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|p| p.join(".persona-quiz").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &search_paths {
            if !path.as_os_str().is_empty() && path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Service settings
        if let Ok(val) = std::env::var("PERSONA_QUIZ_BASE_URL") {
            self.service.base_url = val;
        }
        if let Ok(val) = std::env::var("PERSONA_QUIZ_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.service.timeout_secs = n;
            }
        }

        // Logging settings
        if let Ok(val) = std::env::var("PERSONA_QUIZ_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("PERSONA_QUIZ_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("PERSONA_QUIZ_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Apply command-line overrides, then re-validate
    pub fn apply_cli_overrides(
        &mut self,
        base_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<()> {
        if let Some(url) = base_url {
            self.service.base_url = url.to_string();
        }
        if let Some(secs) = timeout_secs {
            self.service.timeout_secs = secs;
        }
        self.validate()
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.service.base_url).map_err(|e| {
            Error::config_field_invalid(
                "service.base_url",
                format!("invalid service URL '{}': {}", self.service.base_url, e),
            )
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::config_field_invalid(
                "service.base_url",
                format!("service URL must use http or https, got '{}'", url.scheme()),
            ));
        }

        if self.service.timeout_secs == 0 {
            return Err(Error::config_field_invalid(
                "service.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Default location written by `config init`
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".persona-quiz")
        .join("config.toml")
}

/// Initialize a new configuration file, returning where it was written
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(default_config_path);

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# Persona Quiz Configuration

[service]
# Base URL of the persona generation service
base_url = "http://localhost:8000"

# Upper bound on one persona generation call, in seconds
timeout_secs = 60

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.persona-quiz/logs/persona-quiz.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 100

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.service.timeout_secs, 60);
        assert_eq!(config.service.timeout(), Duration::from_secs(60));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_override() {
        env::set_var("PERSONA_QUIZ_BASE_URL", "https://persona.example.com");
        env::set_var("PERSONA_QUIZ_TIMEOUT_SECS", "15");
        env::set_var("PERSONA_QUIZ_LOG_JSON", "1");

        let mut config = QuizConfig::default();
        config.apply_env_overrides();

        assert_eq!(config.service.base_url, "https://persona.example.com");
        assert_eq!(config.service.timeout_secs, 15);
        assert!(config.logging.json_format);

        env::remove_var("PERSONA_QUIZ_BASE_URL");
        env::remove_var("PERSONA_QUIZ_TIMEOUT_SECS");
        env::remove_var("PERSONA_QUIZ_LOG_JSON");
    }

    #[test]
    fn test_cli_override_wins_and_validates() {
        let mut config = QuizConfig::default();
        config
            .apply_cli_overrides(Some("http://127.0.0.1:9000"), Some(5))
            .unwrap();
        assert_eq!(config.service.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.service.timeout_secs, 5);

        let err = config.apply_cli_overrides(Some("not a url"), None).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut config = QuizConfig::default();
        config.service.base_url = "ftp://persona.example.com".to_string();
        assert!(config.validate().is_err());

        config.service.base_url = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = QuizConfig::default();
        config.service.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        match err {
            Error::ConfigValidation { field, .. } => {
                assert_eq!(field.as_deref(), Some("service.timeout_secs"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = QuizConfig::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(QuizConfig::default().validate().is_ok());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = QuizConfig::default();
        config.logging.file = Some("~/logs/quiz.log".to_string());
        config.expand_paths();
        assert!(!config.logging.file.unwrap().contains('~'));
    }

    #[test]
    fn test_default_file_parses_to_defaults() {
        let parsed: QuizConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed.service, ServiceConfig::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: QuizConfig = toml::from_str(
            r#"
[service]
base_url = "https://persona.internal:8443"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.service.base_url, "https://persona.internal:8443");
        assert_eq!(config.service.timeout_secs, 60);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = QuizConfig::find_config_file(Some("/nonexistent/quiz.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_from_file_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[service\nbase_url = ").unwrap();

        let err = QuizConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_init_config_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let path_str = path.to_str().unwrap();

        let written = init_config(Some(path_str), false).unwrap();
        assert_eq!(written, path);
        assert!(init_config(Some(path_str), false).is_err());
        assert!(init_config(Some(path_str), true).is_ok());
    }
}
