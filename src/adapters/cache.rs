use crate::domain::model::Coordinates;
use crate::domain::ports::CoordinateCache;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, RwLock};

/// Unbounded cache. Entries live as long as the cache does.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Coordinates>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CoordinateCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Coordinates> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).copied()
    }

    fn insert(&self, key: String, coordinates: Coordinates) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, coordinates);
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[derive(Debug, Default)]
struct LruState {
    entries: HashMap<String, (Coordinates, u64)>,
    // access tick -> key, oldest first
    recency: BTreeMap<u64, String>,
    tick: u64,
}

impl LruState {
    fn touch(&mut self, key: &str) -> Option<Coordinates> {
        let next = self.tick + 1;
        let (coordinates, last) = self.entries.get_mut(key)?;
        let previous = std::mem::replace(last, next);
        let coordinates = *coordinates;
        self.tick = next;
        self.recency.remove(&previous);
        self.recency.insert(next, key.to_string());
        Some(coordinates)
    }

    fn evict_oldest(&mut self) {
        if let Some((_, key)) = self.recency.pop_first() {
            self.entries.remove(&key);
            tracing::debug!("Evicted postcode {} from coordinate cache", key);
        }
    }
}

/// Bounded cache evicting the least recently used postcode.
#[derive(Debug)]
pub struct LruCache {
    capacity: usize,
    state: Mutex<LruState>,
}

impl LruCache {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(LruState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl CoordinateCache for LruCache {
    fn get(&self, key: &str) -> Option<Coordinates> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.touch(key)
    }

    fn insert(&self, key: String, coordinates: Coordinates) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if state.touch(&key).is_some() {
            if let Some(entry) = state.entries.get_mut(&key) {
                entry.0 = coordinates;
            }
            return;
        }

        while state.entries.len() >= self.capacity {
            state.evict_oldest();
        }

        state.tick += 1;
        let tick = state.tick;
        state.recency.insert(tick, key.clone());
        state.entries.insert(key, (coordinates, tick));
    }

    fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn coords(latitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude: 0.0,
        }
    }

    #[test]
    fn test_memory_cache_never_evicts() {
        let cache = MemoryCache::new();
        for i in 0..1000 {
            cache.insert(format!("AB{}", i), coords(50.0));
        }
        assert_eq!(cache.len(), 1000);
        assert_eq!(cache.get("AB0"), Some(coords(50.0)));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_lru_evicts_least_recently_used() {
        let cache = LruCache::new(2);
        cache.insert("A11AA".to_string(), coords(1.0));
        cache.insert("B11AA".to_string(), coords(2.0));

        // Touch A so B becomes the eviction candidate
        assert_eq!(cache.get("A11AA"), Some(coords(1.0)));
        cache.insert("C11AA".to_string(), coords(3.0));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("B11AA"), None);
        assert_eq!(cache.get("A11AA"), Some(coords(1.0)));
        assert_eq!(cache.get("C11AA"), Some(coords(3.0)));
    }

    #[test]
    fn test_lru_reinsert_updates_without_growing() {
        let cache = LruCache::new(2);
        cache.insert("A11AA".to_string(), coords(1.0));
        cache.insert("A11AA".to_string(), coords(1.5));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("A11AA"), Some(coords(1.5)));
    }

    #[test]
    fn test_lru_zero_capacity_holds_one() {
        let cache = LruCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert("A11AA".to_string(), coords(1.0));
        cache.insert("B11AA".to_string(), coords(2.0));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("B11AA"), Some(coords(2.0)));
    }

    #[test]
    fn test_concurrent_inserts() {
        let cache = Arc::new(LruCache::new(64));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..32 {
                        cache.insert(format!("T{}K{}", t, i), coords(t as f64));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 64);
    }
}
