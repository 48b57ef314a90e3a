use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable that overrides `weather.api_key`
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";
const SUPPORTED_UNITS: [&str; 3] = ["metric", "imperial", "standard"];

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
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory (favorites live here too)
    pub config_dir: PathBuf,

    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Favorites persistence settings
    #[serde(default)]
    pub favorites: FavoritesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the OpenWeatherMap 2.5 API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// API key sent as `appid`; `OPENWEATHER_API_KEY` takes precedence
    #[serde(default)]
    pub api_key: String,

    /// Base URL for condition icons
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,

    /// Measurement units passed to the provider
    #[serde(default = "default_units")]
    pub units: String,

    /// Freshness window for cached searches, in minutes
    #[serde(default = "default_cache_minutes")]
    pub cache_minutes: u64,

    /// HTTP client timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_icon_base_url() -> String {
    DEFAULT_ICON_BASE_URL.to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_cache_minutes() -> u64 {
    60
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: String::new(),
            icon_base_url: default_icon_base_url(),
            units: default_units(),
            cache_minutes: default_cache_minutes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl WeatherConfig {
    /// API key with the environment override applied
    pub fn effective_api_key(&self) -> String {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| self.api_key.clone())
    }

    pub fn cache_window(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cache_minutes.saturating_mul(60))
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// File (inside `config_dir`) holding the JSON favorites list
    #[serde(default = "default_favorites_file")]
    pub file_name: String,
}

fn default_favorites_file() -> String {
    "favorite_cities.json".to_string()
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            file_name: default_favorites_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skycast");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            favorites: FavoritesConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, writing defaults there on first use
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        Self::load()?.into_validated()
    }

    /// Validate an already loaded config, failing on errors and logging warnings
    pub fn into_validated(self) -> Result<(Self, ValidationResult)> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()))
                .context("Configuration validation failed");
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((self, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.api_base_url, "weather.api_base_url", &mut result);
        self.validate_url(&self.weather.icon_base_url, "weather.icon_base_url", &mut result);

        if self.weather.effective_api_key().trim().is_empty() {
            result.add_warning(
                "weather.api_key",
                format!("No API key configured; set {} or weather.api_key", API_KEY_ENV),
            );
        }

        if !SUPPORTED_UNITS.contains(&self.weather.units.as_str()) {
            result.add_error(
                "weather.units",
                format!(
                    "Unsupported units '{}', expected one of {}",
                    self.weather.units,
                    SUPPORTED_UNITS.join(", ")
                ),
            );
        }

        if self.weather.cache_minutes == 0 {
            result.add_error("weather.cache_minutes", "Cache window must be greater than 0");
        } else if self.weather.cache_minutes > 1440 {
            result.add_warning(
                "weather.cache_minutes",
                "Cache window is more than 24 hours",
            );
        }

        if self.weather.request_timeout_secs == 0 {
            result.add_error(
                "weather.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        }

        if self.favorites.file_name.trim().is_empty() {
            result.add_error("favorites.file_name", "Favorites file name cannot be empty");
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
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Path of the persisted favorites list
    pub fn favorites_path(&self) -> PathBuf {
        self.config_dir.join(&self.favorites.file_name)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skycast");

        Ok(config_dir.join("config.toml"))
    }
}
