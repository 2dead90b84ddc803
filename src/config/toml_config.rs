use crate::adapters::postcodes_io::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::core::ConfigProvider;
use crate::utils::error::{LocatorError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_radius, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_RADIUS_MILES: u32 = 25;
const MAX_TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    pub cache: Option<CacheConfig>,
    pub search: Option<SearchConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocoderConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Absent means unbounded.
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_radius_miles: Option<u32>,
}

impl TomlConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LocatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LocatorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value, leaving unset variables as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LocatorError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("geocoder.base_url", self.geocoder_base_url())?;

        if let Some(timeout) = self.geocoder.timeout_seconds {
            validate_range("geocoder.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }

        if let Some(user_agent) = &self.geocoder.user_agent {
            validate_non_empty_string("geocoder.user_agent", user_agent)?;
        }

        if let Some(capacity) = self.cache.as_ref().and_then(|c| c.capacity) {
            validate_positive_number("cache.capacity", capacity, 1)?;
        }

        validate_radius("search.default_radius_miles", self.default_radius_miles())?;

        Ok(())
    }

    pub fn default_radius_miles(&self) -> u32 {
        self.search
            .as_ref()
            .and_then(|s| s.default_radius_miles)
            .unwrap_or(DEFAULT_RADIUS_MILES)
    }
}

impl ConfigProvider for TomlConfig {
    fn geocoder_base_url(&self) -> &str {
        self.geocoder.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn request_timeout(&self) -> Duration {
        self.geocoder
            .timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    fn cache_capacity(&self) -> Option<usize> {
        self.cache.as_ref().and_then(|c| c.capacity)
    }

    fn user_agent(&self) -> &str {
        self.geocoder
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
