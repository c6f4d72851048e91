use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

const APP_DIR: &str = "skycast";
const CONFIG_FILE: &str = "config.toml";
/// File name of the saved-locations store
pub const DATA_FILE: &str = "weather_data.json";

/// Environment variables that override the API keys in the config file
pub const GEOCODE_KEY_ENV: &str = "SKYCAST_GEOCODE_API_KEY";
pub const NEWS_KEY_ENV: &str = "SKYCAST_NEWS_API_KEY";

const KEY_PLACEHOLDER_PREFIX: &str = "YOUR_";

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

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Third-party service endpoints and credentials
    #[serde(default)]
    pub api: ApiConfig,

    /// Saved-locations file
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// OpenCage geocoding API base URL
    pub geocode_url: String,

    /// OpenCage API key (overridden by `SKYCAST_GEOCODE_API_KEY`)
    pub geocode_api_key: String,

    /// Open-Meteo API base URL, used for current weather and forecasts
    pub weather_url: String,

    /// NewsAPI base URL
    pub news_url: String,

    /// NewsAPI key (overridden by `SKYCAST_NEWS_API_KEY`)
    pub news_api_key: String,

    /// Per-request timeout. Unset keeps the HTTP client's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn has_geocode_key(&self) -> bool {
        is_real_key(&self.geocode_api_key)
    }

    pub fn has_news_key(&self) -> bool {
        is_real_key(&self.news_api_key)
    }

    /// Replace keys with values from the environment, when set
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(GEOCODE_KEY_ENV) {
            self.geocode_api_key = key;
        }
        if let Ok(key) = std::env::var(NEWS_KEY_ENV) {
            self.news_api_key = key;
        }
    }
}

fn is_real_key(key: &str) -> bool {
    !key.trim().is_empty() && !key.starts_with(KEY_PLACEHOLDER_PREFIX)
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocode_url: "https://api.opencagedata.com/geocode/v1".to_string(),
            geocode_api_key: "YOUR_OPENCAGE_API_KEY".to_string(),
            weather_url: "https://api.open-meteo.com/v1".to_string(),
            news_url: "https://newsapi.org/v2".to_string(),
            news_api_key: "YOUR_NEWSAPI_KEY".to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding the last snapshot per city
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

fn default_data_file() -> PathBuf {
    default_config_dir().join(DATA_FILE)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

/// `<platform config dir>/skycast`, or `./skycast` when there is none
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

impl Config {
    /// Default configuration file path
    pub fn default_path() -> PathBuf {
        default_config_dir().join(CONFIG_FILE)
    }

    /// Load configuration from `path`, creating a default file if it doesn't exist.
    /// API keys from the environment take precedence over the file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str::<Config>(&contents)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            config
        };

        config.api.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: &Path) -> Result<(Self, ValidationResult)> {
        let config = Self::load_from(path)?;
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

        validate_url(&self.api.geocode_url, "api.geocode_url", &mut result);
        validate_url(&self.api.weather_url, "api.weather_url", &mut result);
        validate_url(&self.api.news_url, "api.news_url", &mut result);

        if self.api.request_timeout_secs == Some(0) {
            result.add_error(
                "api.request_timeout_secs",
                "Timeout must be greater than 0 (omit it to use the default)",
            );
        }

        if !self.api.has_geocode_key() {
            result.add_warning(
                "api.geocode_api_key",
                format!("Geocoding API key not configured - set it or {}", GEOCODE_KEY_ENV),
            );
        }

        if !self.api.has_news_key() {
            result.add_warning(
                "api.news_api_key",
                format!("News API key not configured - set it or {}", NEWS_KEY_ENV),
            );
        }

        if self.store.data_file.as_os_str().is_empty() {
            result.add_error("store.data_file", "Data file path must not be empty");
        } else if self.store.data_file.is_dir() {
            result.add_error(
                "store.data_file",
                format!("Path is a directory: {}", self.store.data_file.display()),
            );
        }

        result
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }
}

/// Validate a URL field
fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        // Default config should be valid (only warnings, no errors)
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_placeholder_keys_are_warnings() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.warnings.iter().any(|w| w.field == "api.geocode_api_key"));
        assert!(result.warnings.iter().any(|w| w.field == "api.news_api_key"));
        assert!(!config.api.has_geocode_key());
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.api.weather_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "api.weather_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.api.news_url = "ftp://newsapi.org/v2".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.api.request_timeout_secs = Some(0);
        let result = config.validate();
        assert!(!result.is_valid());

        config.api.request_timeout_secs = Some(15);
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_data_file_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.store.data_file = dir.path().to_path_buf();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "store.data_file"));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.api.weather_url, "https://api.open-meteo.com/v1");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.api.weather_url = "http://localhost:8080/v1".to_string();
        config.api.request_timeout_secs = Some(20);
        config.store.data_file = dir.path().join("saved.json");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api.weather_url, "http://localhost:8080/v1");
        assert_eq!(loaded.api.request_timeout_secs, Some(20));
        assert_eq!(loaded.store.data_file, dir.path().join("saved.json"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nrequest_timeout_secs = 30\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.request_timeout_secs, Some(30));
        assert_eq!(config.api.news_url, "https://newsapi.org/v2");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\ngeocode_url = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
