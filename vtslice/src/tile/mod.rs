//! Tiles of the pyramid: coordinates, packed features, packing and the tile-space transform.

mod coord;
mod feature;
#[allow(clippy::module_inception)]
mod tile;
mod transform;

pub use coord::*;
pub use feature::*;
pub use tile::*;
