pub mod distance;
pub mod locator;
pub mod postcode;
pub mod ranking;

pub use crate::domain::model::{Coordinates, DistanceOption, LocationRecord, RankedLocation};
pub use crate::domain::ports::{ConfigProvider, CoordinateCache, Geocoder};
pub use crate::utils::error::Result;
