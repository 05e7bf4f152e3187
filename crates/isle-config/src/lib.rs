//! Configuration management for isle.
//!
//! Parses `isle.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.access_token`
//! - `content.domain`
//!
//! Without a config file the access token is taken from
//! `CONTENT_ISLAND_ACCESS_TOKEN`.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the Content Island access token.
    pub access_token: Option<String>,
    /// Override the content language.
    pub language: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "isle.toml";

/// Environment variable consulted for the access token by default.
pub const ACCESS_TOKEN_ENV: &str = "CONTENT_ISLAND_ACCESS_TOKEN";

/// Languages the content model supports.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en"];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content Island API configuration.
    pub content: ContentConfig,
    /// Markdown rendering configuration.
    pub markdown: MarkdownConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Content Island API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Bearer access token for the project.
    pub access_token: String,
    /// API host name, without scheme.
    pub domain: String,
    /// API version path segment.
    pub api_version: String,
    /// Use https (true) or http (false).
    pub secure: bool,
    /// Content language to read fields in.
    pub language: String,
    /// Global HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            access_token: format!("${{{ACCESS_TOKEN_ENV}:-}}"),
            domain: "api.contentisland.net".to_owned(),
            api_version: "1.0".to_owned(),
            secure: true,
            language: "en".to_owned(),
            timeout_secs: 30,
        }
    }
}

impl ContentConfig {
    /// API base URL, e.g. `https://api.contentisland.net/api/1.0`.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!(
            "{scheme}://{}/api/{}",
            self.domain.trim_end_matches('/'),
            self.api_version
        )
    }

    /// Validate that all fields are properly set.
    ///
    /// The access token is checked separately by [`Config::require_access_token`]
    /// since commands that only render markdown never contact the service.
    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.domain, "content.domain")?;
        if self.domain.contains("://") {
            return Err(ConfigError::Validation(
                "content.domain must not include a scheme, use content.secure".to_owned(),
            ));
        }
        require_non_empty(&self.api_version, "content.api_version")?;
        if !SUPPORTED_LANGUAGES.contains(&self.language.as_str()) {
            return Err(ConfigError::Validation(format!(
                "content.language '{}' is not supported (expected one of: {})",
                self.language,
                SUPPORTED_LANGUAGES.join(", ")
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "content.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Markdown rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Render soft line breaks as `<br />`.
    pub breaks: bool,
    /// Enable GitHub Flavored Markdown extensions.
    pub gfm: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            breaks: true,
            gfm: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.access_token`").
        field: String,
        /// Error message (e.g., "${`CONTENT_ISLAND_ACCESS_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `isle.toml` in current directory and parents,
    /// falling back to defaults.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or an overridden value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            let mut config = Self::default();
            config.expand_env_vars()?;
            config
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(token) = &settings.access_token {
            self.content.access_token.clone_from(token);
        }
        if let Some(language) = &settings.language {
            self.content.language.clone_from(language);
        }
    }

    /// Get the access token, failing if none is configured.
    ///
    /// Use this instead of reading `content.access_token` directly when the
    /// command talks to the content service.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the token is empty.
    pub fn require_access_token(&self) -> Result<&str, ConfigError> {
        if self.content.access_token.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "content.access_token is not set (configure it in {CONFIG_FILENAME} or set {ACCESS_TOKEN_ENV})"
            )));
        }
        Ok(&self.content.access_token)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.content.validate()
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.content.access_token =
            expand::expand_env(&self.content.access_token, "content.access_token")?;
        self.content.domain = expand::expand_env(&self.content.domain, "content.domain")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.content.domain, "api.contentisland.net");
        assert_eq!(config.content.api_version, "1.0");
        assert!(config.content.secure);
        assert_eq!(config.content.language, "en");
        assert_eq!(config.content.timeout_secs, 30);
        assert!(config.markdown.breaks);
        assert!(config.markdown.gfm);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_default_token_reads_env_with_empty_fallback() {
        let config = Config::default();
        assert_eq!(
            config.content.access_token,
            "${CONTENT_ISLAND_ACCESS_TOKEN:-}"
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.content.domain, "api.contentisland.net");
        assert!(config.markdown.breaks);
    }

    #[test]
    fn test_parse_content_config() {
        let toml = r#"
[content]
access_token = "token123"
domain = "api.staging.contentisland.net"
api_version = "2.0"
secure = false
timeout_secs = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.content.access_token, "token123");
        assert_eq!(config.content.domain, "api.staging.contentisland.net");
        assert_eq!(config.content.timeout_secs, 5);
        assert_eq!(
            config.content.base_url(),
            "http://api.staging.contentisland.net/api/2.0"
        );
    }

    #[test]
    fn test_parse_markdown_config() {
        let toml = r"
[markdown]
breaks = false
gfm = false
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.markdown.breaks);
        assert!(!config.markdown.gfm);
    }

    #[test]
    fn test_base_url_default() {
        let config = Config::default();
        assert_eq!(
            config.content.base_url(),
            "https://api.contentisland.net/api/1.0"
        );
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let content = ContentConfig {
            domain: "cms.example.com/".to_owned(),
            ..ContentConfig::default()
        };
        assert_eq!(content.base_url(), "https://cms.example.com/api/1.0");
    }

    #[test]
    fn test_validate_rejects_unsupported_language() {
        let mut config = Config::default();
        config.content.language = "fr".to_owned();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("content.language"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.content.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_rejects_domain_with_scheme() {
        let mut config = Config::default();
        config.content.domain = "https://api.contentisland.net".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scheme"));
    }

    #[test]
    fn test_validate_rejects_empty_domain() {
        let mut config = Config::default();
        config.content.domain = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("content.domain cannot be empty"));
    }

    #[test]
    fn test_require_access_token_empty() {
        let mut config = Config::default();
        config.content.access_token = String::new();
        let err = config.require_access_token().unwrap_err();
        assert!(err.to_string().contains(ACCESS_TOKEN_ENV));
    }

    #[test]
    fn test_require_access_token_set() {
        let mut config = Config::default();
        config.content.access_token = "abc".to_owned();
        assert_eq!(config.require_access_token().unwrap(), "abc");
    }

    #[test]
    fn test_apply_cli_settings_token() {
        let mut config = Config::default();
        let overrides = CliSettings {
            access_token: Some("cli-token".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.content.access_token, "cli-token");
        assert_eq!(config.content.language, "en"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.content.access_token = "file-token".to_owned();

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.content.access_token, "file-token");
        assert_eq!(config.content.language, "en");
    }

    #[test]
    fn test_expand_env_vars_content() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("ISLE_TEST_TOKEN_EXPAND", "secret-token");
        }

        let toml = r#"
[content]
access_token = "${ISLE_TEST_TOKEN_EXPAND}"
domain = "${ISLE_TEST_DOMAIN_UNSET:-api.contentisland.net}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.content.access_token, "secret-token");
        assert_eq!(config.content.domain, "api.contentisland.net");

        unsafe {
            std::env::remove_var("ISLE_TEST_TOKEN_EXPAND");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ISLE_TEST_TOKEN_MISSING");
        }

        let toml = r#"
[content]
access_token = "${ISLE_TEST_TOKEN_MISSING}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("content.access_token"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/isle.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[content]
access_token = "file-token"

[markdown]
breaks = false
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.content.access_token, "file-token");
        assert!(!config.markdown.breaks);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_applies_cli_settings_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[content]\naccess_token = \"file-token\"\n").unwrap();

        let overrides = CliSettings {
            language: Some("de".to_owned()),
            ..Default::default()
        };
        let result = Config::load(Some(&path), Some(&overrides));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[content\n").unwrap();

        let result = Config::load(Some(&path), None);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
