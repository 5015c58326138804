//! In-memory zone cache.
//!
//! Memoises zones by code so that every lookup of the same code hands out
//! the same shared instance. Entries are never evicted.

use crate::zone::Zone;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe code → zone store.
///
/// Lookups of distinct codes only take the read lock; inserts take the
/// write lock and keep whichever zone reached the map first, so at most one
/// instance per code is ever stored.
#[derive(Debug, Default)]
pub struct ZoneCache {
    zones: RwLock<HashMap<String, Arc<Zone>>>,
}

impl ZoneCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached zone for `code`, if any.
    pub fn get(&self, code: &str) -> Option<Arc<Zone>> {
        let zones = self.zones.read().unwrap_or_else(|e| e.into_inner());
        zones.get(code).cloned()
    }

    /// Returns the cached zone with the same code as `zone`, inserting it if absent.
    pub fn get_or_insert(&self, zone: Zone) -> Arc<Zone> {
        if let Some(cached) = self.get(zone.code()) {
            tracing::debug!(code = zone.code(), "Zone cache hit");
            return cached;
        }

        let mut zones = self.zones.write().unwrap_or_else(|e| e.into_inner());
        let cached = zones
            .entry(zone.code().to_string())
            .or_insert_with(|| {
                tracing::debug!(code = zone.code(), "Zone cache insert");
                Arc::new(zone)
            });
        Arc::clone(cached)
    }

    /// Returns the cached zone for `code`, building it with `build` on a miss.
    pub fn get_or_try_insert_with<E>(
        &self,
        code: &str,
        build: impl FnOnce() -> Result<Zone, E>,
    ) -> Result<Arc<Zone>, E> {
        if let Some(cached) = self.get(code) {
            tracing::debug!(code, "Zone cache hit");
            return Ok(cached);
        }
        tracing::debug!(code, "Zone cache miss");
        Ok(self.get_or_insert(build()?))
    }

    pub fn len(&self) -> usize {
        self.zones.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached zone.
    pub fn clear(&self) {
        self.zones.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of cached zones.
    pub entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoHexError;
    use crate::zone::zone_by_code;
    use std::thread;

    #[test]
    fn test_get_or_insert_keeps_first_instance() -> Result<(), GeoHexError> {
        let cache = ZoneCache::new();
        let first = cache.get_or_insert(zone_by_code("RU6064")?);
        let second = cache.get_or_insert(zone_by_code("RU6064")?);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        Ok(())
    }

    #[test]
    fn test_get_or_try_insert_with() -> Result<(), GeoHexError> {
        let cache = ZoneCache::new();
        assert!(cache.get("RU6064").is_none());

        let zone = cache.get_or_try_insert_with("RU6064", || zone_by_code("RU6064"))?;
        let again = cache.get_or_try_insert_with("RU6064", || -> Result<Zone, GeoHexError> {
            panic!("builder must not run on a hit")
        })?;
        assert!(Arc::ptr_eq(&zone, &again));

        let failed = cache.get_or_try_insert_with("R", || zone_by_code("R"));
        assert!(failed.is_err());
        assert_eq!(cache.len(), 1);
        Ok(())
    }

    #[test]
    fn test_clear() -> Result<(), GeoHexError> {
        let cache = ZoneCache::new();
        cache.get_or_insert(zone_by_code("RU6064")?);
        cache.get_or_insert(zone_by_code("XM4885546")?);
        assert_eq!(cache.stats(), CacheStats { entries: 2 });

        cache.clear();
        assert!(cache.is_empty());
        Ok(())
    }

    #[test]
    fn test_concurrent_inserts_store_one_instance() -> Result<(), GeoHexError> {
        let cache = Arc::new(ZoneCache::new());
        let zone = zone_by_code("XM4885546")?;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let zone = zone.clone();
                thread::spawn(move || cache.get_or_insert(zone))
            })
            .collect();

        let results: Vec<Arc<Zone>> = handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect();

        assert_eq!(cache.len(), 1);
        assert!(results.iter().all(|z| Arc::ptr_eq(z, &results[0])));
        Ok(())
    }
}
