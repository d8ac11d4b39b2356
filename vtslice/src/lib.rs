//! Slices GeoJSON into a pyramid of clipped and simplified vector tiles.
//!
//! The input is projected into unit-square web mercator space, simplified once, wrapped
//! across the antimeridian and then split top-down into tiles. Only the upper part of
//! the pyramid is built eagerly (see [`TilerOptions::index_max_zoom`] and
//! [`TilerOptions::index_max_points`]); deeper tiles are cut on demand when requested
//! through [`TileIndex::get_tile`].
//!
//! ```
//! use vtslice::{TileIndex, TilerOptions};
//!
//! let json = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[0,0]},"properties":{}}"#;
//! let mut index = TileIndex::from_json_str(json, TilerOptions::default()).unwrap();
//! let tile = index.get_tile(0, 0, 0).unwrap();
//! assert_eq!(tile.features.len(), 1);
//! ```
//!
//! Packed tiles are plain in-memory structures; encoding them into a wire format is left
//! to the caller.

pub mod clip;
pub mod convert;
mod index;
mod options;
pub mod tile;
pub mod wrap;

pub use index::*;
pub use options::*;
pub use tile::{Tile, TileCoord, TileFeature, TileFeatureType, TileGeometry};
pub use vtslice_geometry as geometry;
