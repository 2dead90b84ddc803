use crate::adapters::postcodes_io::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::config::toml_config::{CacheConfig, TomlConfig};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_radius, validate_range, validate_url,
    Validate,
};
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "proximity-locator")]
#[command(about = "Resolve UK postcodes and rank locations by distance")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Geocoding service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Geocoding request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// Bound the coordinate cache to this many postcodes
    #[arg(long, global = true)]
    pub cache_capacity: Option<usize>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Look up the coordinates of a postcode
    Resolve { postcode: String },

    /// Distance in miles between two coordinate pairs
    Distance {
        #[arg(allow_hyphen_values = true)]
        lat1: f64,
        #[arg(allow_hyphen_values = true)]
        lon1: f64,
        #[arg(allow_hyphen_values = true)]
        lat2: f64,
        #[arg(allow_hyphen_values = true)]
        lon2: f64,
    },

    /// Check a postcode's shape and print its formatted form
    Validate { postcode: String },

    /// List the selectable search radii
    Radii,

    /// Rank candidate locations around a postcode
    Search {
        postcode: String,

        /// CSV file with town,county,region,postcode,latitude,longitude
        #[arg(long)]
        candidates: String,

        /// Search radius in miles (5, 10, 25, 50 or 100)
        #[arg(long)]
        radius: Option<u32>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}

impl CliConfig {
    /// Applies command-line overrides on top of a file configuration.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(base_url) = &self.base_url {
            config.geocoder.base_url = Some(base_url.clone());
            tracing::info!("🔧 Geocoder base URL overridden to: {}", base_url);
        }
        if let Some(timeout) = self.timeout_seconds {
            config.geocoder.timeout_seconds = Some(timeout);
            tracing::info!("🔧 Timeout overridden to: {}s", timeout);
        }
        if let Some(capacity) = self.cache_capacity {
            config.cache = Some(CacheConfig {
                capacity: Some(capacity),
            });
            tracing::info!("🔧 Cache capacity overridden to: {}", capacity);
        }
    }
}

impl ConfigProvider for CliConfig {
    fn geocoder_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn request_timeout(&self) -> Duration {
        self.timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    fn cache_capacity(&self) -> Option<usize> {
        self.cache_capacity
    }

    fn user_agent(&self) -> &str {
        DEFAULT_USER_AGENT
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("--base-url", self.geocoder_base_url())?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("--timeout-seconds", timeout, 1, 60)?;
        }
        if let Some(capacity) = self.cache_capacity {
            validate_positive_number("--cache-capacity", capacity, 1)?;
        }
        if let Command::Search {
            candidates, radius, ..
        } = &self.command
        {
            validate_path("--candidates", candidates)?;
            if let Some(radius) = radius {
                validate_radius("--radius", *radius)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_command() {
        let config = CliConfig::try_parse_from([
            "proximity-locator",
            "search",
            "SW1A 1AA",
            "--candidates",
            "towns.csv",
            "--radius",
            "50",
            "--cache-capacity",
            "100",
        ])
        .unwrap();

        assert_eq!(config.cache_capacity(), Some(100));
        assert!(config.validate().is_ok());
        match config.command {
            Command::Search {
                postcode,
                candidates,
                radius,
                json,
            } => {
                assert_eq!(postcode, "SW1A 1AA");
                assert_eq!(candidates, "towns.csv");
                assert_eq!(radius, Some(50));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_negative_coordinates_parse() {
        let config = CliConfig::try_parse_from([
            "proximity-locator",
            "distance",
            "51.5074",
            "-0.1278",
            "53.4808",
            "-2.2426",
        ])
        .unwrap();

        assert!(matches!(
            config.command,
            Command::Distance { lon1, .. } if lon1 == -0.1278
        ));
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let config = CliConfig::try_parse_from([
            "proximity-locator",
            "search",
            "SW1A 1AA",
            "--candidates",
            "towns.csv",
            "--radius",
            "30",
        ])
        .unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_apply_to_file_config() {
        let cli = CliConfig::try_parse_from([
            "proximity-locator",
            "--base-url",
            "http://localhost:1234/postcodes",
            "--timeout-seconds",
            "2",
            "radii",
        ])
        .unwrap();
        let mut file_config = TomlConfig::default();

        cli.apply_overrides(&mut file_config);

        assert_eq!(
            file_config.geocoder_base_url(),
            "http://localhost:1234/postcodes"
        );
        assert_eq!(file_config.request_timeout(), Duration::from_secs(2));
        assert_eq!(file_config.cache_capacity(), None);
    }
}
