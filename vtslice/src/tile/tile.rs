use super::{TileCoord, TileFeature, TileGeometry};
use crate::TilerOptions;
use std::{fmt::Debug, sync::Arc};
use vtslice_geometry::{BBox, Feature, GeoProperties, GeoValue, Geometry, Ring, math::rewind_ring};

/// Bounding box of a tile without features. It lies outside the unit square, so that the
/// first feature replaces it.
const EMPTY_TILE_BBOX: BBox = BBox {
	x_min: 2.0,
	y_min: 1.0,
	x_max: -1.0,
	y_max: 0.0,
};

/// One tile of the pyramid.
///
/// Features are packed when the tile is created and mapped into tile coordinates
/// when the tile is read for the first time.
pub struct Tile {
	coord: TileCoord,
	pub features: Vec<TileFeature>,
	/// Number of vertices in the input features, including culled rings.
	pub num_points: usize,
	/// Number of vertices kept after simplification.
	pub num_simplified: usize,
	/// Number of input features.
	pub num_features: usize,
	/// Union of the bounding boxes of the input features, in unit-square space.
	pub bbox: BBox,
	pub(crate) transformed: bool,
	/// Input features, kept while the tile may have to be split on demand.
	pub(crate) source: Option<Vec<Arc<Feature>>>,
}

impl Tile {
	/// Packs `features` into the tile at `coord`.
	///
	/// Tiles below `max_zoom` drop rings smaller than the zoom's tolerance and vertices with
	/// a lower importance. Polygon rings are rewound, so that outer rings run clockwise.
	pub fn new(features: &[Arc<Feature>], coord: TileCoord, options: &TilerOptions) -> Tile {
		let tolerance = if coord.level == options.max_zoom {
			0.0
		} else {
			options.tolerance / (f64::from(coord.size()) * f64::from(options.extent))
		};

		let mut tile = Tile {
			coord,
			features: Vec::new(),
			num_points: 0,
			num_simplified: 0,
			num_features: features.len(),
			bbox: EMPTY_TILE_BBOX,
			transformed: false,
			source: None,
		};

		for feature in features {
			tile.add_feature(feature, tolerance, options.line_metrics);
			tile.bbox.extend(feature.bbox());
		}

		tile
	}

	pub fn coord(&self) -> &TileCoord {
		&self.coord
	}

	pub fn is_transformed(&self) -> bool {
		self.transformed
	}

	/// Whether the tile still holds its input features for splitting on demand.
	pub fn has_source(&self) -> bool {
		self.source.is_some()
	}

	fn add_feature(&mut self, feature: &Feature, tolerance: f64, line_metrics: bool) {
		let mut tags = Arc::clone(feature.tags());

		let geometry = match feature.geometry() {
			Geometry::Point(vertex) => {
				self.num_points += 1;
				self.num_simplified += 1;
				TileGeometry::Point(vec![vertex.as_pair()])
			}
			Geometry::MultiPoint(vertices) => {
				self.num_points += vertices.len();
				self.num_simplified += vertices.len();
				TileGeometry::Point(vertices.iter().map(|v| v.as_pair()).collect())
			}
			Geometry::LineString(line) => {
				if line_metrics {
					tags = Arc::new(with_line_metrics(feature.tags(), line));
				}
				TileGeometry::LineString(self.pack_ring(line, tolerance, false, false).into_iter().collect())
			}
			Geometry::MultiLineString(lines) => TileGeometry::LineString(
				lines
					.iter()
					.filter_map(|line| self.pack_ring(line, tolerance, false, false))
					.collect(),
			),
			Geometry::Polygon(rings) => TileGeometry::Polygon(self.pack_polygon(rings, tolerance)),
			Geometry::MultiPolygon(polygons) => TileGeometry::Polygon(
				polygons
					.iter()
					.flat_map(|rings| self.pack_polygon(rings, tolerance))
					.collect(),
			),
		};

		if !geometry.is_empty() {
			self.features.push(TileFeature {
				id: feature.id().cloned(),
				geometry,
				tags,
			});
		}
	}

	fn pack_polygon(&mut self, rings: &[Ring], tolerance: f64) -> Vec<Vec<[f64; 2]>> {
		rings
			.iter()
			.enumerate()
			.filter_map(|(i, ring)| self.pack_ring(ring, tolerance, true, i == 0))
			.collect()
	}

	/// Packs the retained vertices of one ring. Returns `None` if the ring is culled or
	/// nothing is left.
	fn pack_ring(&mut self, ring: &Ring, tolerance: f64, is_polygon: bool, is_outer: bool) -> Option<Vec<[f64; 2]>> {
		let sq_tolerance = tolerance * tolerance;
		self.num_points += ring.len();

		if tolerance > 0.0 && ring.metrics.size < if is_polygon { sq_tolerance } else { tolerance } {
			return None;
		}

		let mut packed: Vec<[f64; 2]> = ring
			.iter()
			.filter(|v| tolerance == 0.0 || v.is_retained(sq_tolerance))
			.map(|v| v.as_pair())
			.collect();
		self.num_simplified += packed.len();

		if packed.is_empty() {
			return None;
		}
		if is_polygon {
			rewind_ring(&mut packed, is_outer);
		}
		Some(packed)
	}
}

/// Copies `tags` and adds the position of the slice `line` within its original line, as
/// fractions of the line length.
fn with_line_metrics(tags: &GeoProperties, line: &Ring) -> GeoProperties {
	let metrics = &line.metrics;
	let (start, end) = if metrics.size > 0.0 {
		(metrics.start / metrics.size, metrics.end / metrics.size)
	} else {
		(0.0, 0.0)
	};
	let mut tags = tags.clone();
	tags.insert("mapbox_clip_start".to_string(), GeoValue::from(start));
	tags.insert("mapbox_clip_end".to_string(), GeoValue::from(end));
	tags
}

impl Debug for Tile {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Tile")
			.field("coord", &self.coord)
			.field("features", &self.features)
			.field("num_points", &self.num_points)
			.field("num_simplified", &self.num_simplified)
			.field("num_features", &self.num_features)
			.field("bbox", &self.bbox)
			.field("transformed", &self.transformed)
			.finish_non_exhaustive()
	}
}
