use crate::cache::{CacheStats, ZoneCache};
use crate::coord::GeoPoint;
use crate::error::GeoHexError;
use crate::index::GridCoord;
use crate::zone::{
    Zone, grid_by_code, grid_by_location, zone_by_code, zone_by_grid, zone_by_location,
};
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Zone resolver with an optional zone cache.
///
/// With the cache enabled, every lookup that lands on the same code returns
/// the same shared `Zone` instance. With it disabled (the default) each
/// lookup builds a fresh zone.
///
/// # Example
///
/// ```
/// use geohex_rs::GeoHex;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), geohex_rs::GeoHexError> {
/// let geohex = GeoHex::builder().cache_enabled(true).build();
///
/// let a = geohex.zone_by_location(39.931417738, -105.18518518, 4)?;
/// let b = geohex.zone_by_code("RU6064")?;
/// assert!(Arc::ptr_eq(&a, &b));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct GeoHex {
    cache_enabled: AtomicBool,
    cache: ZoneCache,
}

impl GeoHex {
    /// Resolver without caching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with caching enabled.
    pub fn with_cache() -> Self {
        Self::builder().cache_enabled(true).build()
    }

    pub fn builder() -> GeoHexBuilder {
        GeoHexBuilder::new()
    }

    /// Turns the cache on or off. Zones cached so far are kept.
    pub fn set_cache_enabled(&self, enabled: bool) {
        self.cache_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.cache_enabled.load(Ordering::Relaxed)
    }

    fn share(&self, zone: Zone) -> Arc<Zone> {
        if self.is_cache_enabled() {
            self.cache.get_or_insert(zone)
        } else {
            Arc::new(zone)
        }
    }

    pub fn zone_by_location(
        &self,
        lat: f64,
        lon: f64,
        level: u8,
    ) -> Result<Arc<Zone>, GeoHexError> {
        Ok(self.share(zone_by_location(lat, lon, level)?))
    }

    pub fn zone_by_code(&self, code: &str) -> Result<Arc<Zone>, GeoHexError> {
        if self.is_cache_enabled() {
            return self.cache.get_or_try_insert_with(code, || zone_by_code(code));
        }
        Ok(Arc::new(zone_by_code(code)?))
    }

    pub fn zone_by_grid(&self, grid: GridCoord, level: u8) -> Result<Arc<Zone>, GeoHexError> {
        Ok(self.share(zone_by_grid(grid, level)?))
    }

    pub fn grid_by_location(
        &self,
        lat: f64,
        lon: f64,
        level: u8,
    ) -> Result<GridCoord, GeoHexError> {
        grid_by_location(lat, lon, level)
    }

    pub fn grid_by_code(&self, code: &str) -> Result<GridCoord, GeoHexError> {
        grid_by_code(code)
    }

    pub fn hex_boundary(&self, zone: &Zone) -> [GeoPoint; 6] {
        zone.hex_boundary()
    }

    /// Resolves many `(lat, lon)` points in parallel.
    ///
    /// Results keep the input order. The first error aborts the batch.
    pub fn zones_by_locations(
        &self,
        points: &[(f64, f64)],
        level: u8,
    ) -> Result<Vec<Arc<Zone>>, GeoHexError> {
        points
            .par_iter()
            .map(|&(lat, lon)| self.zone_by_location(lat, lon, level))
            .collect()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[derive(Debug, Default)]
pub struct GeoHexBuilder {
    cache_enabled: Option<bool>,
}

impl GeoHexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = Some(enabled);
        self
    }

    pub fn build(self) -> GeoHex {
        let geohex = GeoHex::new();
        geohex.set_cache_enabled(self.cache_enabled.unwrap_or(false));
        geohex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_disabled_by_default() -> Result<(), GeoHexError> {
        let geohex = GeoHex::new();
        assert!(!geohex.is_cache_enabled());

        let a = geohex.zone_by_code("RU6064")?;
        let b = geohex.zone_by_code("RU6064")?;
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a, b);
        assert_eq!(geohex.cache_stats().entries, 0);
        Ok(())
    }

    #[test]
    fn test_cache_returns_same_instance() -> Result<(), GeoHexError> {
        let geohex = GeoHex::with_cache();
        assert!(geohex.is_cache_enabled());

        let by_location = geohex.zone_by_location(39.931417738, -105.18518518, 4)?;
        let by_code = geohex.zone_by_code("RU6064")?;
        let by_grid = geohex.zone_by_grid(GridCoord::new(-60, 366), 4)?;

        assert_eq!(by_location.code(), "RU6064");
        assert!(Arc::ptr_eq(&by_location, &by_code));
        assert!(Arc::ptr_eq(&by_location, &by_grid));
        assert_eq!(geohex.cache_stats().entries, 1);
        Ok(())
    }

    #[test]
    fn test_toggle_cache() -> Result<(), GeoHexError> {
        let geohex = GeoHex::builder().build();
        geohex.set_cache_enabled(true);
        let cached = geohex.zone_by_code("XM4885546")?;

        geohex.set_cache_enabled(false);
        let fresh = geohex.zone_by_code("XM4885546")?;
        assert!(!Arc::ptr_eq(&cached, &fresh));
        assert_eq!(geohex.cache_stats().entries, 1);

        geohex.clear_cache();
        assert_eq!(geohex.cache_stats().entries, 0);
        Ok(())
    }

    #[test]
    fn test_errors_pass_through_cache() {
        let geohex = GeoHex::with_cache();
        assert_eq!(
            geohex.zone_by_code("R").map(|z| z.code().to_string()),
            Err(GeoHexError::InvalidCodeLength(1))
        );
        assert!(geohex.zone_by_location(0.0, 0.0, 99).is_err());
        assert_eq!(geohex.cache_stats().entries, 0);
    }

    #[test]
    fn test_grid_lookups() -> Result<(), GeoHexError> {
        let geohex = GeoHex::new();
        assert_eq!(geohex.grid_by_code("RU6064")?, GridCoord::new(-60, 366));
        assert_eq!(
            geohex.grid_by_location(39.931417738, -105.18518518, 4)?,
            GridCoord::new(-60, 366)
        );
        Ok(())
    }

    #[test]
    fn test_zones_by_locations_shares_instances() -> Result<(), GeoHexError> {
        let geohex = GeoHex::with_cache();
        let points = vec![(35.6895, 139.6917); 64];

        let zones = geohex.zones_by_locations(&points, 7)?;
        assert_eq!(zones.len(), 64);
        assert!(zones.iter().all(|z| Arc::ptr_eq(z, &zones[0])));
        assert_eq!(geohex.cache_stats().entries, 1);
        Ok(())
    }

    #[test]
    fn test_zones_by_locations_keeps_order() -> Result<(), GeoHexError> {
        let geohex = GeoHex::new();
        let points = [(35.6895, 139.6917), (39.7392, -104.9903), (0.0, 0.0)];

        let codes: Vec<String> = geohex
            .zones_by_locations(&points, 3)?
            .iter()
            .map(|z| z.code().to_string())
            .collect();
        assert_eq!(codes, vec!["XM488", "RU606", "OY444"]);
        Ok(())
    }

    #[test]
    fn test_hex_boundary() -> Result<(), GeoHexError> {
        let geohex = GeoHex::new();
        let zone = geohex.zone_by_code("RU6064")?;
        assert_eq!(geohex.hex_boundary(&zone), zone.hex_boundary());
        Ok(())
    }
}
