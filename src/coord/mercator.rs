use crate::coord::{GeoPoint, ProjectedPoint};
use crate::index::constants::H_BASE;
use std::f64::consts::PI;

/// Projects a lon/lat location (degrees) onto the spherical pseudo-Mercator plane.
///
/// Latitudes near ±90 diverge (-90 gives an infinite `y`); nothing is validated.
///
/// # Example
/// ```
/// use geohex_rs::location_to_projected;
///
/// let p = location_to_projected(-105.0, 39.0);
/// assert!((p.x - -11688546.531666666).abs() < 1e-6);
/// ```
pub fn location_to_projected(lon: f64, lat: f64) -> ProjectedPoint {
    let x = lon * H_BASE / 180.0;
    let y = ((90.0 + lat) * PI / 360.0).tan().ln() / (PI / 180.0);
    ProjectedPoint::new(x, y * H_BASE / 180.0)
}

/// Inverse of [`location_to_projected`].
pub fn projected_to_location(x: f64, y: f64) -> GeoPoint {
    let lon = (x / H_BASE) * 180.0;
    let lat = (y / H_BASE) * 180.0;
    let lat = 180.0 / PI * (2.0 * (lat * PI / 180.0).exp().atan() - PI / 2.0);
    GeoPoint::new(lat, lon)
}
