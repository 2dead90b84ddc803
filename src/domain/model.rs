use crate::utils::error::{LocatorError, Result};
use serde::{Deserialize, Serialize};

/// A resolved point on the globe, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Checked constructor. Rejects non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(-90.0..=90.0).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
        {
            return Err(LocatorError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A directory location. Coordinates are absent until resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub town: String,
    pub county: Option<String>,
    pub region: Option<String>,
    pub postcode: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl LocationRecord {
    pub fn new(town: impl Into<String>) -> Self {
        Self {
            town: town.into(),
            county: None,
            region: None,
            postcode: None,
            coordinates: None,
        }
    }

    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLocation {
    pub location: LocationRecord,
    pub distance_miles: u32,
}

/// A selectable search radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistanceOption {
    pub miles: u32,
    pub label: &'static str,
}

pub const DISTANCE_OPTIONS: [DistanceOption; 5] = [
    DistanceOption {
        miles: 5,
        label: "Within 5 miles",
    },
    DistanceOption {
        miles: 10,
        label: "Within 10 miles",
    },
    DistanceOption {
        miles: 25,
        label: "Within 25 miles",
    },
    DistanceOption {
        miles: 50,
        label: "Within 50 miles",
    },
    DistanceOption {
        miles: 100,
        label: "Within 100 miles",
    },
];

impl DistanceOption {
    pub fn from_miles(miles: u32) -> Option<Self> {
        DISTANCE_OPTIONS.iter().copied().find(|o| o.miles == miles)
    }
}
