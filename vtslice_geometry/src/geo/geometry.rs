use super::*;
use std::fmt::Debug;

/// Projected geometry of a feature.
///
/// Polygons are lists of rings where the first ring is the outer ring and every following
/// ring is a hole.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(Vertex),
	MultiPoint(Vec<Vertex>),
	LineString(Ring),
	MultiLineString(Vec<Ring>),
	Polygon(Vec<Ring>),
	MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
	pub fn get_type_name(&self) -> &str {
		match self {
			Geometry::Point(_) => "Point",
			Geometry::MultiPoint(_) => "MultiPoint",
			Geometry::LineString(_) => "LineString",
			Geometry::MultiLineString(_) => "MultiLineString",
			Geometry::Polygon(_) => "Polygon",
			Geometry::MultiPolygon(_) => "MultiPolygon",
		}
	}

	/// Computes the bounding box.
	///
	/// Holes never reach outside of their outer ring, so only the first ring of every
	/// polygon is scanned.
	pub fn compute_bbox(&self) -> BBox {
		let mut bbox = BBox::empty();
		match self {
			Geometry::Point(v) => bbox.include(v.x, v.y),
			Geometry::MultiPoint(vertices) => {
				for v in vertices {
					bbox.include(v.x, v.y);
				}
			}
			Geometry::LineString(line) => line.extend_bbox(&mut bbox),
			Geometry::MultiLineString(lines) => {
				for line in lines {
					line.extend_bbox(&mut bbox);
				}
			}
			Geometry::Polygon(rings) => {
				if let Some(outer) = rings.first() {
					outer.extend_bbox(&mut bbox);
				}
			}
			Geometry::MultiPolygon(polygons) => {
				for outer in polygons.iter().filter_map(|rings| rings.first()) {
					outer.extend_bbox(&mut bbox);
				}
			}
		}
		bbox
	}

	/// Returns a copy moved by `dx` along the x axis, used to build neighbouring world copies.
	pub fn shifted(&self, dx: f64) -> Geometry {
		match self {
			Geometry::Point(v) => Geometry::Point(v.shifted(dx)),
			Geometry::MultiPoint(vertices) => Geometry::MultiPoint(vertices.iter().map(|v| v.shifted(dx)).collect()),
			Geometry::LineString(line) => Geometry::LineString(line.shifted(dx)),
			Geometry::MultiLineString(lines) => Geometry::MultiLineString(shift_rings(lines, dx)),
			Geometry::Polygon(rings) => Geometry::Polygon(shift_rings(rings, dx)),
			Geometry::MultiPolygon(polygons) => {
				Geometry::MultiPolygon(polygons.iter().map(|rings| shift_rings(rings, dx)).collect())
			}
		}
	}
}

fn shift_rings(rings: &[Ring], dx: f64) -> Vec<Ring> {
	rings.iter().map(|ring| ring.shifted(dx)).collect()
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner: &dyn Debug = match self {
			Geometry::Point(g) => g,
			Geometry::MultiPoint(g) => g,
			Geometry::LineString(g) => g,
			Geometry::MultiLineString(g) => g,
			Geometry::Polygon(g) => g,
			Geometry::MultiPolygon(g) => g,
		};
		f.debug_tuple(self.get_type_name()).field(inner).finish()
	}
}
