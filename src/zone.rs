use crate::coord::{
    Coordinate, GeoPoint, ProjectedPoint, location_to_projected, projected_to_location,
};
use crate::error::GeoHexError;
use crate::geom::{create_hexagon, hexagon_vertices};
use crate::index::{
    GridCoord, adjust_grid, cell_size, check_level, decode_zone_code, encode_zone_code,
    grid_to_projected, is_on_seam, location_to_grid, projected_to_grid,
};
use geo::Contains;
use geo_types::{LineString, Point, Polygon};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A single hexagonal zone of the GeoHex grid.
///
/// Each `Zone` carries its code, the geographic center of the hexagon and
/// its position on the hex lattice. The level is implied by the code length.
/// Zones are immutable once built.
///
/// # Example
///
/// ```
/// use geohex_rs::Zone;
///
/// # fn main() -> Result<(), geohex_rs::GeoHexError> {
/// // (lon, lat), like any other Coordinate
/// let zone = Zone::from_location(&(-105.18518518, 39.931417738), 4)?;
/// assert_eq!(zone.code(), "RU6064");
///
/// let polygon = zone.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    code: String,
    center: GeoPoint,
    grid: GridCoord,
}

impl Zone {
    /// Builds the zone for an already folded grid coordinate.
    ///
    /// Cells on the antimeridian seam get a center longitude of exactly -180.
    pub(crate) fn from_canonical_grid(grid: GridCoord, level: u8) -> Self {
        let projected = grid_to_projected(grid, level);
        let mut center = projected_to_location(projected.x, projected.y);
        if is_on_seam(grid, level) {
            center.lon = -180.0;
        }
        let code = encode_zone_code(grid, level, center.lon);

        Self { code, center, grid }
    }

    /// Create a Zone from a lon/lat location.
    ///
    /// # Example
    /// ```
    /// use geohex_rs::{GeoPoint, Zone};
    ///
    /// # fn main() -> Result<(), geohex_rs::GeoHexError> {
    /// // From tuple (lon, lat)
    /// let zone = Zone::from_location(&(139.6917, 35.6895), 7)?;
    /// // From GeoPoint
    /// let same = Zone::from_location(&GeoPoint::new(35.6895, 139.6917), 7)?;
    /// assert_eq!(zone, same);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_location(coord: &impl Coordinate, level: u8) -> Result<Self, GeoHexError> {
        let grid = location_to_grid(coord, level)?;
        Ok(Self::from_canonical_grid(grid, level))
    }

    /// Create a Zone from its code.
    ///
    /// # Example
    /// ```
    /// use geohex_rs::Zone;
    ///
    /// # fn main() -> Result<(), geohex_rs::GeoHexError> {
    /// let zone = Zone::from_code("RU6064")?;
    /// assert_eq!(zone.level(), 4);
    /// assert!((zone.lat() - 39.93141773898915).abs() < 1e-9);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_code(code: &str) -> Result<Self, GeoHexError> {
        let (grid, level) = decode_zone_code(code)?;
        Ok(Self::from_canonical_grid(grid, level))
    }

    /// Create a Zone from a grid coordinate.
    ///
    /// The coordinate is folded onto the valid diamond first, so both
    /// representations of a seam cell yield the same zone.
    pub fn from_grid(grid: GridCoord, level: u8) -> Result<Self, GeoHexError> {
        let grid = adjust_grid(grid, level)?;
        Ok(Self::from_canonical_grid(grid, level))
    }

    /// Create Zones along a lon/lat LineString.
    ///
    /// Samples the line in projected space and returns every distinct zone
    /// it passes through, in traversal order. Vertices at a pole project to
    /// infinity: they are dropped along with the segments touching them.
    pub fn from_line_string(line: &LineString, level: u8) -> Result<Vec<Self>, GeoHexError> {
        check_level(level)?;
        let step_size = cell_size(level) * 0.5;

        let projected: Vec<_> = line
            .0
            .iter()
            .map(|c| location_to_projected(c.x, c.y))
            .collect();

        let mut seen: HashSet<GridCoord> = HashSet::new();
        let mut zones: Vec<Zone> = Vec::new();
        let mut visit = |point: &ProjectedPoint| {
            let grid = projected_to_grid(point, level);
            if seen.insert(grid) {
                zones.push(Self::from_canonical_grid(grid, level));
            }
        };

        if let [only] = projected.as_slice() {
            if only.is_finite() {
                visit(only);
            }
            return Ok(zones);
        }

        for window in projected.windows(2) {
            let start = &window[0];
            let end = &window[1];

            if !(start.is_finite() && end.is_finite()) {
                for point in [start, end] {
                    if point.is_finite() {
                        visit(point);
                    }
                }
                continue;
            }

            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let segment_length = (dx * dx + dy * dy).sqrt();
            let steps = (segment_length / step_size).ceil() as usize;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                visit(&ProjectedPoint::new(start.x + t * dx, start.y + t * dy));
            }
        }

        tracing::trace!(level, zones = zones.len(), "Traced line string");
        Ok(zones)
    }

    /// The zone code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Level of the zone, `code.len() - 2`.
    pub fn level(&self) -> u8 {
        (self.code.len() - 2) as u8
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn lat(&self) -> f64 {
        self.center.lat
    }

    pub fn lon(&self) -> f64 {
        self.center.lon
    }

    pub fn grid(&self) -> GridCoord {
        self.grid
    }

    /// Hex size in projected units at this zone's level.
    pub fn hex_size(&self) -> f64 {
        cell_size(self.level())
    }

    /// The six hexagon vertices, west first and then clockwise.
    ///
    /// Recomputed on every call.
    pub fn hex_boundary(&self) -> [GeoPoint; 6] {
        hexagon_vertices(&self.center, self.hex_size())
    }

    /// Converts this zone to a hexagonal polygon.
    ///
    /// Returns a closed `geo_types::Polygon` in lon/lat, suitable for
    /// spatial operations or GeoJSON export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        create_hexagon(&self.hex_boundary())
    }

    /// Returns `true` if the lon/lat location lies inside this zone's hexagon.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.to_polygon().contains(&Point::new(coord.x(), coord.y()))
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Returns the zone containing `(lat, lon)` at `level`.
pub fn zone_by_location(lat: f64, lon: f64, level: u8) -> Result<Zone, GeoHexError> {
    Zone::from_location(&GeoPoint::new(lat, lon), level)
}

/// Returns the zone named by `code`.
pub fn zone_by_code(code: &str) -> Result<Zone, GeoHexError> {
    Zone::from_code(code)
}

/// Returns the zone at a grid coordinate.
pub fn zone_by_grid(grid: GridCoord, level: u8) -> Result<Zone, GeoHexError> {
    Zone::from_grid(grid, level)
}

/// Returns the grid coordinate of the zone containing `(lat, lon)` at `level`.
pub fn grid_by_location(lat: f64, lon: f64, level: u8) -> Result<GridCoord, GeoHexError> {
    location_to_grid(&GeoPoint::new(lat, lon), level)
}

/// Returns the grid coordinate named by `code`.
pub fn grid_by_code(code: &str) -> Result<GridCoord, GeoHexError> {
    decode_zone_code(code).map(|(grid, _)| grid)
}

/// The six vertices of `zone`, see [`Zone::hex_boundary`].
pub fn hex_boundary(zone: &Zone) -> [GeoPoint; 6] {
    zone.hex_boundary()
}
