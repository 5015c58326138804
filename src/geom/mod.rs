mod hexagon;

pub use hexagon::{create_hexagon, hexagon_vertices};
