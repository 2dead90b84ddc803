use crate::domain::model::Coordinates;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Outbound postcode lookup.
///
/// `Ok(None)` means the service does not know the postcode. `Err` is reserved
/// for transport failures, timeouts and malformed responses.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, normalized_postcode: &str) -> Result<Option<Coordinates>>;
}

/// Keyed by normalized postcode.
pub trait CoordinateCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Coordinates>;
    fn insert(&self, key: String, coordinates: Coordinates);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: CoordinateCache + ?Sized> CoordinateCache for Box<T> {
    fn get(&self, key: &str) -> Option<Coordinates> {
        (**self).get(key)
    }

    fn insert(&self, key: String, coordinates: Coordinates) {
        (**self).insert(key, coordinates)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn geocoder_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn cache_capacity(&self) -> Option<usize>;
    fn user_agent(&self) -> &str;
}
