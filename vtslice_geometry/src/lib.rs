//! Geometry model for the `vtslice` tiler.
//!
//! Input coordinates are projected into a unit square (web mercator, `[0, 1]` on both axes)
//! and stored as [`Vertex`] buffers grouped into [`Ring`]s. A [`Feature`] wraps a
//! [`Geometry`] together with its id, tags and a precomputed [`BBox`].
//!
//! The [`math`] module holds the projection, ring area and the vertex importance
//! simplifier used while converting GeoJSON.

mod geo;
pub mod math;

pub use geo::*;
