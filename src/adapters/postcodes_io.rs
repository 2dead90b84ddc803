use crate::domain::model::Coordinates;
use crate::domain::ports::{ConfigProvider, Geocoder};
use crate::utils::error::{LocatorError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.postcodes.io/postcodes";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_USER_AGENT: &str = concat!("proximity-locator/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct LookupResponse {
    result: Option<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Geocoder for postcodes.io-style services: `GET {base_url}/{postcode}`.
#[derive(Debug, Clone)]
pub struct PostcodesIoClient {
    base_url: Url,
    client: Client,
}

impl PostcodesIoClient {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        validate_url("geocoder.base_url", base_url)?;
        let base_url = Url::parse(base_url).map_err(|e| LocatorError::ConfigError {
            message: format!("invalid geocoder base URL: {}", e),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn from_config<P: ConfigProvider>(config: &P) -> Result<Self> {
        Self::new(
            config.geocoder_base_url(),
            config.request_timeout(),
            config.user_agent(),
        )
    }

    fn lookup_url(&self, postcode: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LocatorError::ConfigError {
                message: format!("geocoder base URL cannot take a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .push(postcode);
        Ok(url)
    }

    fn failure(postcode: &str, reason: impl ToString) -> LocatorError {
        LocatorError::LookupFailed {
            postcode: postcode.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl Geocoder for PostcodesIoClient {
    async fn geocode(&self, normalized_postcode: &str) -> Result<Option<Coordinates>> {
        let url = self.lookup_url(normalized_postcode)?;

        tracing::debug!("Making geocoding request to: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::failure(normalized_postcode, e))?;

        tracing::debug!("Geocoding response status: {}", response.status());
        if !response.status().is_success() {
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::failure(normalized_postcode, e))?;
        let parsed: LookupResponse = serde_json::from_str(&body).map_err(|e| {
            Self::failure(normalized_postcode, format!("malformed response body: {}", e))
        })?;

        let Some(LookupResult {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }) = parsed.result
        else {
            return Ok(None);
        };

        Coordinates::new(latitude, longitude)
            .map(Some)
            .map_err(|e| Self::failure(normalized_postcode, e))
    }
}
