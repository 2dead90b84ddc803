use crate::adapters::cache::{LruCache, MemoryCache};
use crate::adapters::postcodes_io::PostcodesIoClient;
use crate::core::postcode::{is_valid_uk_postcode, normalize_postcode};
use crate::core::ranking::rank_with_distances;
use crate::domain::model::{Coordinates, LocationRecord, RankedLocation};
use crate::domain::ports::{ConfigProvider, CoordinateCache, Geocoder};
use crate::utils::error::{LocatorError, Result};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Resolves postcodes through a [`Geocoder`], memoizing successes in a [`CoordinateCache`].
pub struct ProximityLocator<G: Geocoder, C: CoordinateCache> {
    geocoder: G,
    cache: C,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<G: Geocoder, C: CoordinateCache> ProximityLocator<G, C> {
    pub fn new(geocoder: G, cache: C) -> Self {
        Self {
            geocoder,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Resolves a postcode, keeping the not-found/failure distinction.
    pub async fn lookup(&self, postcode: &str) -> Result<Coordinates> {
        let key = normalize_postcode(postcode);
        if key.is_empty() {
            return Err(LocatorError::PostcodeNotFound {
                postcode: postcode.to_string(),
            });
        }

        if let Some(coordinates) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Cache hit for postcode {}", key);
            return Ok(coordinates);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Cache miss for postcode {}, querying geocoder", key);

        match self.geocoder.geocode(&key).await {
            Ok(Some(coordinates)) => {
                self.cache.insert(key, coordinates);
                Ok(coordinates)
            }
            Ok(None) => Err(LocatorError::PostcodeNotFound { postcode: key }),
            Err(LocatorError::LookupFailed { reason, .. }) => {
                Err(LocatorError::LookupFailed { postcode: key, reason })
            }
            Err(e) => Err(LocatorError::LookupFailed {
                postcode: key,
                reason: e.to_string(),
            }),
        }
    }

    /// Resolves a postcode, collapsing every failure to `None`.
    pub async fn resolve(&self, postcode: &str) -> Option<Coordinates> {
        match self.lookup(postcode).await {
            Ok(coordinates) => Some(coordinates),
            Err(e @ LocatorError::PostcodeNotFound { .. }) => {
                tracing::debug!("{}", e);
                None
            }
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }

    /// Fills in coordinates for records that have a postcode but no coordinates.
    ///
    /// Records that fail to resolve are returned unchanged.
    pub async fn annotate(&self, candidates: Vec<LocationRecord>) -> Vec<LocationRecord> {
        let mut annotated = Vec::with_capacity(candidates.len());
        let mut unresolved = 0usize;

        for mut record in candidates {
            if record.coordinates.is_none() {
                if let Some(postcode) = record.postcode.as_deref() {
                    record.coordinates = self.resolve(postcode).await;
                }
                if record.coordinates.is_none() {
                    unresolved += 1;
                }
            }
            annotated.push(record);
        }

        if unresolved > 0 {
            tracing::debug!("{} candidates left without coordinates", unresolved);
        }
        annotated
    }

    /// Ranks candidates around a postcode.
    pub async fn search(
        &self,
        postcode: &str,
        candidates: Vec<LocationRecord>,
        max_distance_miles: u32,
    ) -> Result<Vec<RankedLocation>> {
        if !is_valid_uk_postcode(postcode) {
            return Err(LocatorError::InvalidPostcode {
                postcode: postcode.to_string(),
            });
        }

        let origin =
            self.resolve(postcode)
                .await
                .ok_or_else(|| LocatorError::OriginUnavailable {
                    postcode: postcode.to_string(),
                })?;

        let candidates = self.annotate(candidates).await;
        let ranked = rank_with_distances(origin, &candidates, max_distance_miles);

        tracing::info!(
            "{} of {} candidates within {} miles of {}",
            ranked.len(),
            candidates.len(),
            max_distance_miles,
            postcode
        );
        Ok(ranked)
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.len(),
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }
}

impl ProximityLocator<PostcodesIoClient, Box<dyn CoordinateCache>> {
    /// HTTP geocoder plus an LRU cache when a capacity is configured, unbounded otherwise.
    pub fn from_config<P: ConfigProvider>(config: &P) -> Result<Self> {
        let geocoder = PostcodesIoClient::from_config(config)?;
        let cache: Box<dyn CoordinateCache> = match config.cache_capacity() {
            Some(capacity) => {
                tracing::debug!("Using LRU coordinate cache (capacity {})", capacity);
                Box::new(LruCache::new(capacity))
            }
            None => Box::new(MemoryCache::new()),
        };
        Ok(Self::new(geocoder, cache))
    }
}
