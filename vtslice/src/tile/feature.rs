use std::{fmt::Debug, sync::Arc};
use vtslice_geometry::{GeoProperties, GeoValue};

/// Geometry type of a packed feature, numbered like in vector tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileFeatureType {
	Point = 1,
	Line = 2,
	Polygon = 3,
}

impl TileFeatureType {
	pub fn as_u64(&self) -> u64 {
		*self as u64
	}
}

impl From<&TileGeometry> for TileFeatureType {
	fn from(geometry: &TileGeometry) -> Self {
		match geometry {
			TileGeometry::Point(_) => TileFeatureType::Point,
			TileGeometry::LineString(_) => TileFeatureType::Line,
			TileGeometry::Polygon(_) => TileFeatureType::Polygon,
		}
	}
}

/// Packed coordinates of a tile feature.
///
/// Coordinates are in unit-square space until the tile is transformed, and integral tile
/// coordinates afterwards. Polygon rings of all parts are stored in one list; outer rings
/// run clockwise in tile space and holes counter-clockwise.
#[derive(Clone, PartialEq)]
pub enum TileGeometry {
	Point(Vec<[f64; 2]>),
	LineString(Vec<Vec<[f64; 2]>>),
	Polygon(Vec<Vec<[f64; 2]>>),
}

impl TileGeometry {
	pub fn is_empty(&self) -> bool {
		match self {
			TileGeometry::Point(points) => points.is_empty(),
			TileGeometry::LineString(rings) | TileGeometry::Polygon(rings) => rings.is_empty(),
		}
	}

	pub(crate) fn for_each_point_mut(&mut self, mut callback: impl FnMut(&mut [f64; 2])) {
		match self {
			TileGeometry::Point(points) => points.iter_mut().for_each(callback),
			TileGeometry::LineString(rings) | TileGeometry::Polygon(rings) => {
				rings.iter_mut().flatten().for_each(&mut callback);
			}
		}
	}
}

impl Debug for TileGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			TileGeometry::Point(g) => f.debug_tuple("Point").field(g).finish(),
			TileGeometry::LineString(g) => f.debug_tuple("LineString").field(g).finish(),
			TileGeometry::Polygon(g) => f.debug_tuple("Polygon").field(g).finish(),
		}
	}
}

/// A feature packed into a tile, ready for an encoder.
#[derive(Clone, Debug, PartialEq)]
pub struct TileFeature {
	pub id: Option<GeoValue>,
	pub geometry: TileGeometry,
	pub tags: Arc<GeoProperties>,
}

impl TileFeature {
	pub fn geom_type(&self) -> TileFeatureType {
		TileFeatureType::from(&self.geometry)
	}
}
