pub mod constants;
mod identifier;
mod indexing;

pub use constants::{H_BASE, H_KEY, MAX_LEVEL};
pub use identifier::decode_zone_code;
pub(crate) use identifier::encode_zone_code;
pub use indexing::{GridCoord, adjust_grid, adjust_xy, hex_size, location_to_grid};
pub(crate) use indexing::{
    cell_size, check_level, grid_to_projected, is_on_seam, projected_to_grid,
};
