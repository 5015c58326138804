//! # geohex-rs
//!
//! GeoHex v3 hexagonal zone codes: map a latitude/longitude to the code of
//! the hexagon containing it at one of 16 levels, and decode a code back to
//! its hexagon.
//!
//! There are currently three main entry points.
//!
//! ### 1. `Zone` - Single Zone Operations
//!
//! ```
//! use geohex_rs::{Zone, zone_by_code, zone_by_location};
//!
//! # fn main() -> Result<(), geohex_rs::GeoHexError> {
//! let zone = zone_by_location(35.6895, 139.6917, 7)?;
//! assert_eq!(zone.code(), "XM4885546");
//!
//! let same = zone_by_code("XM4885546")?;
//! assert_eq!(zone, same);
//!
//! let polygon = zone.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `ZoneGrid` - Collections of Zones
//!
//! ```
//! use geohex_rs::ZoneGrid;
//! use geo_types::point;
//!
//! # fn main() -> Result<(), geohex_rs::GeoHexError> {
//! let grid = ZoneGrid::builder()
//!     .level(7)
//!     .extent(-105.0, 39.7, -104.9, 39.8)
//!     .build()?;
//!
//! let pt = point! { x: -104.95, y: 39.75 };
//! if let Some(zone) = grid.get_zone_at(&pt) {
//!     println!("{}", zone.code());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `GeoHex` - Cached Resolver
//!
//! Hands out shared zones and resolves batches of points in parallel:
//!
//! ```
//! use geohex_rs::GeoHex;
//!
//! # fn main() -> Result<(), geohex_rs::GeoHexError> {
//! let geohex = GeoHex::with_cache();
//! let zones = geohex.zones_by_locations(&[(35.6895, 139.6917), (0.0, 0.0)], 3)?;
//! assert_eq!(zones[1].code(), "OY444");
//! # Ok(())
//! # }
//! ```
//!

pub mod cache;
pub mod coord;
mod error;
pub mod geom;
pub mod index;
pub mod resolver;
pub mod zone;
pub mod zone_grid;

pub use cache::{CacheStats, ZoneCache};
pub use coord::{
    Coordinate, GeoPoint, ProjectedPoint, location_to_projected, projected_to_location,
};
pub use error::GeoHexError;
pub use index::{
    GridCoord, H_BASE, H_KEY, MAX_LEVEL, adjust_grid, adjust_xy, decode_zone_code, hex_size,
    location_to_grid,
};
pub use resolver::{GeoHex, GeoHexBuilder};
pub use zone::{
    Zone, grid_by_code, grid_by_location, hex_boundary, zone_by_code, zone_by_grid,
    zone_by_location,
};
pub use zone_grid::{ZoneGrid, ZoneGridBuilder};

pub use geo_types;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{Rect, coord, point};
    use proptest::prelude::*;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), GeoHexError> {
        let grid = ZoneGrid::builder()
            .level(7)
            .extent(-105.0, 39.7, -104.9, 39.8)
            .build()?;

        assert!(!grid.is_empty());
        assert_eq!(grid.level(), 7);

        let pt = point! { x: -104.95, y: 39.75 };
        let zone = grid.get_zone_at(&pt);
        assert!(zone.is_some());

        if let Some(zone) = zone {
            let (decoded, level) = decode_zone_code(zone.code())?;
            assert_eq!(decoded, zone.grid());
            assert_eq!(level, 7);
            assert!(zone.contains(&pt));

            let polygon = zone.to_polygon();
            assert_eq!(polygon.exterior().coords().count(), 7);
        }
        Ok(())
    }

    #[test]
    fn test_using_geo_types_macros() -> Result<(), GeoHexError> {
        let pt = point! { x: 139.6917, y: 35.6895 };
        let grid = location_to_grid(&pt, 7)?;
        assert_eq!(grid, GridCoord::new(11260, -4015));

        let rect = Rect::new(coord! { x: 139.6, y: 35.6 }, coord! { x: 139.8, y: 35.8 });
        let zones = ZoneGrid::from_rect(&rect, 6)?;
        assert!(!zones.is_empty());
        Ok(())
    }

    #[test]
    fn test_resolver_agrees_with_free_functions() -> Result<(), GeoHexError> {
        let geohex = GeoHex::with_cache();
        let shared = geohex.zone_by_location(-33.8688, 151.2093, 7)?;
        let plain = zone_by_location(-33.8688, 151.2093, 7)?;

        assert_eq!(*shared, plain);
        assert_eq!(shared.code(), "MW6143286");
        Ok(())
    }

    #[test]
    fn test_grid_consistency_with_zone() -> Result<(), GeoHexError> {
        let direct = zone_by_location(39.75, -104.95, 7)?;

        let grid = ZoneGrid::from_extent(-105.0, 39.7, -104.9, 39.8, 7)?;
        let pt = point! { x: -104.95, y: 39.75 };
        let from_grid = grid.get_zone_at(&pt);

        assert_eq!(from_grid, Some(&direct));
        Ok(())
    }

    #[test]
    fn test_zone_serializes_to_json() -> Result<(), Box<dyn std::error::Error>> {
        let zone = zone_by_code("RU6064")?;
        let value = serde_json::to_value(&zone)?;

        assert_eq!(value["code"], "RU6064");
        assert_eq!(value["grid"]["x"], -60);
        assert_eq!(value["grid"]["y"], 366);
        assert!(value["center"]["lat"].is_f64());
        Ok(())
    }

    #[test]
    fn test_grid_coord_json_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let grid = grid_by_code("XM4885546")?;
        let json = serde_json::to_string(&grid)?;
        let back: GridCoord = serde_json::from_str(&json)?;
        assert_eq!(back, grid);
        Ok(())
    }

    proptest! {
        #[test]
        fn code_roundtrips_to_grid(
            lat in -80.0f64..80.0,
            lon in -179.999f64..179.999,
            level in 0u8..=12,
        ) {
            let zone = zone_by_location(lat, lon, level).unwrap();
            prop_assert_eq!(zone.level(), level);
            prop_assert_eq!(zone.code().len(), level as usize + 2);
            prop_assert_eq!(grid_by_code(zone.code()).unwrap(), zone.grid());
            prop_assert_eq!(zone_by_code(zone.code()).unwrap(), zone);
        }

        #[test]
        fn resolution_is_deterministic(
            lat in -85.0f64..85.0,
            lon in -180.0f64..180.0,
            level in 0u8..=MAX_LEVEL,
        ) {
            let first = zone_by_location(lat, lon, level).unwrap();
            let second = zone_by_location(lat, lon, level).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
