use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable consulted for the UV service API key
pub const UV_API_KEY_ENV: &str = "FAIRWEATHER_UV_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// UV index lookup settings
    #[serde(default)]
    pub uv: UvConfig,

    /// Activity ranking settings
    #[serde(default)]
    pub ranking: RankingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UvConfig {
    /// Base URL of the UV index service (the `/uvi` path is appended)
    #[serde(default = "default_uv_base_url")]
    pub base_url: String,

    /// API key sent as `appid`. Never written back to disk; see [`UvConfig::resolved_api_key`].
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Upper bound on a single lookup, in seconds
    #[serde(default = "default_uv_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_uv_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_uv_timeout_secs() -> u64 {
    5
}

impl UvConfig {
    /// The key from the config file if set, otherwise from `FAIRWEATHER_UV_API_KEY`
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key_or(std::env::var(UV_API_KEY_ENV).ok())
    }

    fn api_key_or(&self, env_key: Option<String>) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| env_key.filter(|k| !k.is_empty()))
    }
}

impl Default for UvConfig {
    fn default() -> Self {
        Self {
            base_url: default_uv_base_url(),
            api_key: None,
            timeout_secs: default_uv_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Activities scoring below this are left out of rankings (default: 5)
    #[serde(default = "default_min_score")]
    pub min_score: u8,

    /// Maximum number of ranked activities returned (default: 10)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_min_score() -> u8 {
    5
}

fn default_limit() -> usize {
    10
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            limit: default_limit(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_or_create(&config_path)
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound(path.display().to_string()),
            _ => ConfigError::Invalid(format!("{}: {}", path.display(), e)),
        })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
    }

    fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        Ok(Self::load_from(path)?)
    }

    /// Load configuration and validate it
    ///
    /// Returns an error if validation fails with critical errors; warnings are logged.
    /// Failures reading an explicit file or failing validation carry a [`ConfigError`].
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.uv.base_url, "uv.base_url", &mut result);

        if self.uv.timeout_secs == 0 {
            result.add_error("uv.timeout_secs", "Timeout must be greater than 0");
        } else if self.uv.timeout_secs > 30 {
            result.add_warning(
                "uv.timeout_secs",
                "UV lookups block scoring; timeouts over 30 seconds are unusually long",
            );
        }

        if self.uv.resolved_api_key().is_none() {
            result.add_warning(
                "uv.api_key",
                format!(
                    "No API key configured (set {}); UV lookups will use the default index",
                    UV_API_KEY_ENV
                ),
            );
        }

        if self.ranking.min_score > 100 {
            result.add_warning(
                "ranking.min_score",
                "Scores never exceed 100; every activity will be filtered out",
            );
        }

        if self.ranking.limit == 0 {
            result.add_warning("ranking.limit", "Ranking limit is 0; rankings will be empty");
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the given file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the default configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("fairweather");

        Ok(config_dir.join("config.toml"))
    }
}
