use crate::coord::{Coordinate, GeoPoint, location_to_projected};
use crate::error::GeoHexError;
use crate::index::{GridCoord, adjust_grid, check_level, location_to_grid, projected_to_grid};
use crate::zone::Zone;
use geo_types::{Polygon, Rect};
use std::collections::HashSet;

/// The zones of one level whose centers fall inside a lon/lat extent.
///
/// Bounds are inclusive. Extents crossing the antimeridian are not split;
/// pass the two halves separately. An extent reaching the south pole projects
/// to infinity and yields an empty grid.
///
/// # Example
/// ```
/// use geohex_rs::ZoneGrid;
///
/// # fn main() -> Result<(), geohex_rs::GeoHexError> {
/// let grid = ZoneGrid::from_extent(-105.0, 39.7, -104.9, 39.8, 7)?;
/// for zone in &grid {
///     assert_eq!(zone.level(), 7);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ZoneGrid {
    level: u8,
    zones: Vec<Zone>,
}

impl ZoneGrid {
    pub fn builder() -> ZoneGridBuilder {
        ZoneGridBuilder::new()
    }

    /// Collects the zones of `level` centred in `[min_lon, max_lon] x [min_lat, max_lat]`.
    pub fn from_extent(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
        level: u8,
    ) -> Result<Self, GeoHexError> {
        let extent = Extent {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        };
        Ok(Self {
            level,
            zones: extent.zones(level)?,
        })
    }

    /// Same as [`ZoneGrid::from_extent`], with the extent given as a lon/lat `Rect`.
    pub fn from_rect(rect: &Rect<f64>, level: u8) -> Result<Self, GeoHexError> {
        let (min, max) = (rect.min(), rect.max());
        Self::from_extent(min.x, min.y, max.x, max.y, level)
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Number of zones in the grid.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zones in lattice scan order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    /// The zone of this grid containing a lon/lat location, if the grid holds it.
    pub fn get_zone_at(&self, coord: &impl Coordinate) -> Option<&Zone> {
        let grid = location_to_grid(coord, self.level).ok()?;
        self.iter().find(|zone| zone.grid() == grid)
    }

    /// Hexagon polygons of every zone, in grid order.
    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.iter().map(Zone::to_polygon).collect()
    }

    /// Zones matching `predicate`.
    pub fn filter<F>(&self, predicate: F) -> Vec<&Zone>
    where
        F: Fn(&Zone) -> bool,
    {
        self.iter().filter(|zone| predicate(zone)).collect()
    }
}

impl<'a> IntoIterator for &'a ZoneGrid {
    type Item = &'a Zone;
    type IntoIter = std::slice::Iter<'a, Zone>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder for [`ZoneGrid`]; both the level and the extent are required.
#[derive(Debug, Default)]
pub struct ZoneGridBuilder {
    level: Option<u8>,
    extent: Option<Extent>,
}

impl ZoneGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub fn extent(mut self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        self.extent = Some(Extent {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        });
        self
    }

    pub fn rect(self, rect: &Rect<f64>) -> Self {
        let (min, max) = (rect.min(), rect.max());
        self.extent(min.x, min.y, max.x, max.y)
    }

    /// Validates the level, then enumerates the extent.
    pub fn build(self) -> Result<ZoneGrid, GeoHexError> {
        let level = self
            .level
            .ok_or(GeoHexError::MissingGridParameter("level"))?;
        check_level(level)?;
        let extent = self
            .extent
            .ok_or(GeoHexError::MissingGridParameter("extent"))?;

        Ok(ZoneGrid {
            level,
            zones: extent.zones(level)?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Extent {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl Extent {
    fn contains(&self, center: GeoPoint) -> bool {
        (self.min_lon..=self.max_lon).contains(&center.lon)
            && (self.min_lat..=self.max_lat).contains(&center.lat)
    }

    /// Lattice bounds `(min_x, max_x, min_y, max_y)` of the corner cells, or
    /// `None` when a corner does not project to a finite point.
    fn lattice_bounds(&self, level: u8) -> Option<(i64, i64, i64, i64)> {
        let corners = [
            (self.min_lon, self.min_lat),
            (self.max_lon, self.min_lat),
            (self.max_lon, self.max_lat),
            (self.min_lon, self.max_lat),
        ];

        let mut bounds = (i64::MAX, i64::MIN, i64::MAX, i64::MIN);
        for (lon, lat) in corners {
            let projected = location_to_projected(lon, lat);
            if !projected.is_finite() {
                return None;
            }
            let grid = projected_to_grid(&projected, level);
            bounds.0 = bounds.0.min(grid.x);
            bounds.1 = bounds.1.max(grid.x);
            bounds.2 = bounds.2.min(grid.y);
            bounds.3 = bounds.3.max(grid.y);
        }
        Some(bounds)
    }

    fn zones(&self, level: u8) -> Result<Vec<Zone>, GeoHexError> {
        check_level(level)?;

        let Some((min_x, max_x, min_y, max_y)) = self.lattice_bounds(level) else {
            tracing::debug!(level, extent = ?self, "Extent does not project to finite bounds");
            return Ok(Vec::new());
        };

        // Corner cells are rounded, so widen by one to catch centers just inside.
        let mut seen: HashSet<GridCoord> = HashSet::new();
        let mut zones = Vec::new();
        for x in min_x.saturating_sub(1)..=max_x.saturating_add(1) {
            for y in min_y.saturating_sub(1)..=max_y.saturating_add(1) {
                let grid = adjust_grid(GridCoord::new(x, y), level)?;
                if !seen.insert(grid) {
                    continue;
                }

                let zone = Zone::from_canonical_grid(grid, level);
                if self.contains(zone.center()) {
                    zones.push(zone);
                }
            }
        }

        tracing::debug!(level, zones = zones.len(), "Generated zone grid");
        Ok(zones)
    }
}
