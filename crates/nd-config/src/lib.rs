//! Configuration management for nd.
//!
//! Parses `nd.toml` configuration files with serde and provides
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
//! - `notion.token`
//! - `notion.base_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the Notion integration token.
    pub token: Option<String>,
    /// Override the number of parallel branch fetches.
    pub concurrency: Option<usize>,
    /// Override the URL prefix for child page links.
    pub page_base: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "nd.toml";

/// Largest page size the Notion API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Notion API connection settings.
    pub notion: NotionConfig,
    /// Tree retrieval settings.
    pub fetch: FetchConfig,
    /// Rendering settings.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Notion API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    /// Integration token. Usually `${NOTION_TOKEN}`.
    pub token: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Value of the `Notion-Version` header.
    pub version: String,
    /// Children per request (1-100).
    pub page_size: u32,
    /// Global HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: "https://api.notion.com/v1".to_owned(),
            version: "2022-06-28".to_owned(),
            page_size: MAX_PAGE_SIZE,
            timeout_secs: 30,
        }
    }
}

/// Tree retrieval configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum number of branches fetched in parallel.
    pub concurrency: usize,
    /// Maximum nesting depth before the build is aborted.
    pub max_depth: usize,
    /// Maximum number of blocks in one tree before the build is aborted.
    pub max_blocks: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            max_depth: 32,
            max_blocks: 10_000,
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// URL prefix for links to child pages.
    pub page_base: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_base: "/page".to_owned(),
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
        /// Config field path (e.g., "`notion.token`").
        field: String,
        /// Error message (e.g., "${`NOTION_TOKEN`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

fn require_positive(value: u64, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `nd.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values. Validation runs last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// an environment variable is missing, or validation fails.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(token) = &settings.token {
            self.notion.token = Some(token.clone());
        }
        if let Some(concurrency) = settings.concurrency {
            self.fetch.concurrency = concurrency;
        }
        if let Some(page_base) = &settings.page_base {
            self.render.page_base.clone_from(page_base);
        }
    }

    /// Get the Notion integration token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no token is configured.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        match self.notion.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ConfigError::Validation(
                "notion.token required (set it in nd.toml or NOTION_TOKEN)".to_owned(),
            )),
        }
    }

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

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_notion()?;
        self.validate_fetch()?;
        Ok(())
    }

    fn validate_notion(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.notion.base_url, "notion.base_url")?;
        require_http_url(&self.notion.base_url, "notion.base_url")?;
        require_non_empty(&self.notion.version, "notion.version")?;
        require_positive(self.notion.timeout_secs, "notion.timeout_secs")?;

        if self.notion.page_size == 0 || self.notion.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "notion.page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        Ok(())
    }

    fn validate_fetch(&self) -> Result<(), ConfigError> {
        require_positive(self.fetch.concurrency as u64, "fetch.concurrency")?;
        require_positive(self.fetch.max_depth as u64, "fetch.max_depth")?;
        require_positive(self.fetch.max_blocks as u64, "fetch.max_blocks")?;
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref token) = self.notion.token {
            self.notion.token = Some(expand::expand_env(token, "notion.token")?);
        }
        self.notion.base_url = expand::expand_env(&self.notion.base_url, "notion.base_url")?;
        Ok(())
    }
}
