use crate::coord::{GeoPoint, location_to_projected, projected_to_location};
use geo_types::{Coord, LineString, Polygon};
use std::f64::consts::PI;

/// Computes the six vertices of the hexagon centred on `center`.
///
/// `size` is the hex size in projected units. Vertices are returned in the
/// order west, north-west, north-east, east, south-east, south-west.
pub fn hexagon_vertices(center: &GeoPoint, size: f64) -> [GeoPoint; 6] {
    let p = location_to_projected(center.lon, center.lat);
    let rise = (PI * (60.0 / 180.0)).tan();

    let top = projected_to_location(p.x, p.y + rise * size).lat;
    let bottom = projected_to_location(p.x, p.y - rise * size).lat;
    let left = projected_to_location(p.x - 2.0 * size, p.y).lon;
    let right = projected_to_location(p.x + 2.0 * size, p.y).lon;
    let center_left = projected_to_location(p.x - size, p.y).lon;
    let center_right = projected_to_location(p.x + size, p.y).lon;

    [
        GeoPoint::new(center.lat, left),
        GeoPoint::new(top, center_left),
        GeoPoint::new(top, center_right),
        GeoPoint::new(center.lat, right),
        GeoPoint::new(bottom, center_right),
        GeoPoint::new(bottom, center_left),
    ]
}

/// Builds a closed lon/lat polygon from hexagon vertices.
pub fn create_hexagon(vertices: &[GeoPoint; 6]) -> Polygon<f64> {
    let mut coords: Vec<Coord<f64>> = vertices
        .iter()
        .map(|v| Coord { x: v.lon, y: v.lat })
        .collect();
    coords.push(coords[0]);

    Polygon::new(LineString::from(coords), vec![])
}
