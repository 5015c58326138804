use crate::coord::{Coordinate, ProjectedPoint, location_to_projected};
use crate::error::GeoHexError;
use crate::index::constants::{H_BASE, H_K, MAX_LEVEL, pow3};
use serde::{Deserialize, Serialize};

/// Integer position of a cell on the hex lattice at a given level.
///
/// A coordinate is canonical when `|x - y| <= 3^(level + 2)` and, on the
/// antimeridian seam (`|x - y| == 3^(level + 2)`), `x < y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i64,
    pub y: i64,
}

impl GridCoord {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

pub(crate) fn check_level(level: u8) -> Result<(), GeoHexError> {
    if level > MAX_LEVEL {
        return Err(GeoHexError::InvalidLevel(level));
    }
    Ok(())
}

/// Half-width of the diamond of valid grid coordinates.
#[inline]
pub(crate) fn max_steps(level: u8) -> i64 {
    pow3(level as u32 + 2)
}

#[inline]
pub(crate) fn cell_size(level: u8) -> f64 {
    H_BASE / pow3(level as u32 + 3) as f64
}

#[inline]
fn unit_vectors(level: u8) -> (f64, f64) {
    let size = cell_size(level);
    (6.0 * size, 6.0 * size * H_K)
}

/// Returns the hex size (in projected units) of cells at `level`.
///
/// Each level is three times finer than the previous one.
///
/// # Example
/// ```
/// use geohex_rs::hex_size;
///
/// # fn main() -> Result<(), geohex_rs::GeoHexError> {
/// let coarse = hex_size(3)?;
/// let fine = hex_size(4)?;
/// assert!((coarse / fine - 3.0).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
pub fn hex_size(level: u8) -> Result<f64, GeoHexError> {
    check_level(level)?;
    Ok(cell_size(level))
}

/// Resolves a lon/lat location to the grid coordinate of the cell containing it.
///
/// Returns `(x, y)` for the cell at the given level, already folded back
/// into the valid diamond.
pub fn location_to_grid<C: Coordinate>(coord: &C, level: u8) -> Result<GridCoord, GeoHexError> {
    check_level(level)?;
    let projected = location_to_projected(coord.x(), coord.y());
    let grid = projected_to_grid(&projected, level);
    tracing::trace!(level, x = grid.x, y = grid.y, "Resolved grid");
    Ok(grid)
}

/// Resolves a projected point to its cell.
///
/// Plain rounding of the two skewed axes misplaces points in the small
/// triangles where hexagon edges cross lattice cell boundaries; the two
/// inequality bands below pick the right neighbour there. Non-finite input
/// saturates on the integer cast.
pub(crate) fn projected_to_grid(point: &ProjectedPoint, level: u8) -> GridCoord {
    let (unit_x, unit_y) = unit_vectors(level);
    let pos_x = (point.x + point.y / H_K) / unit_x;
    let pos_y = (point.y - H_K * point.x) / unit_y;

    let x0 = pos_x.floor();
    let y0 = pos_y.floor();
    let qx = pos_x - x0;
    let qy = pos_y - y0;

    let mut x = pos_x.round();
    let mut y = pos_y.round();

    if qy > -qx + 1.0 {
        if qy < 2.0 * qx && qy > 0.5 * qx {
            x = x0 + 1.0;
            y = y0 + 1.0;
        }
    } else if qy < -qx + 1.0 && qy > (2.0 * qx) - 1.0 && qy < (0.5 * qx) + 0.5 {
        x = x0;
        y = y0;
    }

    let (x, y) = fold_xy(x, y, level);
    GridCoord::new(x as i64, y as i64)
}

/// Projected center of a cell.
pub(crate) fn grid_to_projected(grid: GridCoord, level: u8) -> ProjectedPoint {
    let (unit_x, unit_y) = unit_vectors(level);
    let x = grid.x as f64;
    let y = grid.y as f64;

    let lat = (H_K * x * unit_x + y * unit_y) / 2.0;
    let lon = (lat - y * unit_y) / H_K;
    ProjectedPoint::new(lon, lat)
}

/// True when the cell sits exactly on the antimeridian seam.
pub(crate) fn is_on_seam(grid: GridCoord, level: u8) -> bool {
    grid.x.abs_diff(grid.y) == max_steps(level) as u64
}

/// Folds an `(x, y)` pair into the diamond `|x - y| <= 3^(level + 2)`.
///
/// Seam cells are canonicalised to `x < y`. A pair past the diamond is
/// mirrored once across its edge, which brings back anything that
/// overshoots by less than twice the diamond width.
fn fold_xy(x: f64, y: f64, level: u8) -> (f64, f64) {
    let max = max_steps(level) as f64;
    let steps = (x - y).abs();

    if steps == max && x > y {
        return (y, x);
    }

    if steps > max {
        let diff = steps - max;
        let diff_x = (diff / 2.0).floor();
        let diff_y = diff - diff_x;

        if x > y {
            let (edge_x, edge_y) = (y + diff_y, x - diff_x);
            return (edge_x + diff_x, edge_y - diff_y);
        } else {
            let (edge_x, edge_y) = (y - diff_y, x + diff_x);
            return (edge_x - diff_x, edge_y + diff_y);
        }
    }

    (x, y)
}

pub(crate) fn fold_grid(grid: GridCoord, level: u8) -> GridCoord {
    let (x, y) = fold_xy(grid.x as f64, grid.y as f64, level);
    GridCoord::new(x as i64, y as i64)
}

/// Normalises a grid coordinate onto the valid diamond for `level`.
///
/// # Example
/// ```
/// use geohex_rs::{GridCoord, adjust_grid};
///
/// # fn main() -> Result<(), geohex_rs::GeoHexError> {
/// // On the seam, the two representations collapse to x < y.
/// let grid = adjust_grid(GridCoord::new(81, 0), 2)?;
/// assert_eq!(grid, GridCoord::new(0, 81));
/// # Ok(())
/// # }
/// ```
pub fn adjust_grid(grid: GridCoord, level: u8) -> Result<GridCoord, GeoHexError> {
    check_level(level)?;
    Ok(fold_grid(grid, level))
}

/// Float form of [`adjust_grid`], for pairs that have not been rounded to the lattice.
pub fn adjust_xy(x: f64, y: f64, level: u8) -> Result<(f64, f64), GeoHexError> {
    check_level(level)?;
    Ok(fold_xy(x, y, level))
}
