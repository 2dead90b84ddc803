pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::cache::{LruCache, MemoryCache};
pub use crate::adapters::postcodes_io::PostcodesIoClient;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::distance::distance_miles;
pub use crate::core::locator::{CacheStats, ProximityLocator};
pub use crate::core::postcode::{format_postcode, is_valid_uk_postcode, normalize_postcode};
pub use crate::core::ranking::{rank_by_proximity, rank_with_distances};
pub use crate::domain::model::{Coordinates, DistanceOption, LocationRecord, RankedLocation, DISTANCE_OPTIONS};
pub use crate::utils::error::{LocatorError, Result};
