//! Converts GeoJSON into projected, importance-tagged [`Feature`]s.
//!
//! Every position is projected into unit-square web mercator space. Lines and polygon rings
//! get their length or area recorded in [`RingMetrics`] and are tagged once by a
//! [`Simplify`] implementation, so that tiles at any zoom level can drop vertices by
//! comparing importances against their own tolerance.

use crate::TilerOptions;
use anyhow::{Context, Result, ensure};
use geojson::{GeoJson, Geometry as JsonGeometry, JsonObject, LineStringType, Position, Value, feature::Id};
use std::sync::Arc;
use vtslice_geometry::{
	Feature, GeoProperties, GeoValue, Geometry, Ring, RingMetrics, Vertex,
	math::{Simplify, project_x, project_y},
};

/// Converts a parsed GeoJSON value into projected features.
///
/// Features without geometry are skipped. A geometry collection turns into one feature per
/// member geometry, all sharing id and tags.
pub fn convert(data: &GeoJson, options: &TilerOptions, simplifier: &dyn Simplify) -> Result<Vec<Arc<Feature>>> {
	let converter = Converter::new(options, simplifier);
	let mut features = Vec::new();

	match data {
		GeoJson::FeatureCollection(collection) => {
			for (index, feature) in collection.features.iter().enumerate() {
				let Some(geometry) = &feature.geometry else {
					continue;
				};
				let id = converter.feature_id(feature.id.as_ref(), feature.properties.as_ref(), Some(index));
				let tags = Arc::new(properties(feature.properties.as_ref()));
				converter
					.convert_geometry(&mut features, geometry, id.as_ref(), &tags)
					.with_context(|| format!("converting feature {index}"))?;
			}
		}
		GeoJson::Feature(feature) => {
			if let Some(geometry) = &feature.geometry {
				let id = converter.feature_id(feature.id.as_ref(), feature.properties.as_ref(), None);
				let tags = Arc::new(properties(feature.properties.as_ref()));
				converter.convert_geometry(&mut features, geometry, id.as_ref(), &tags)?;
			}
		}
		GeoJson::Geometry(geometry) => {
			let id = converter.feature_id(None, None, None);
			converter.convert_geometry(&mut features, geometry, id.as_ref(), &Arc::new(GeoProperties::new()))?;
		}
	}

	Ok(features)
}

struct Converter<'a> {
	options: &'a TilerOptions,
	simplifier: &'a dyn Simplify,
	sq_tolerance: f64,
}

impl<'a> Converter<'a> {
	fn new(options: &'a TilerOptions, simplifier: &'a dyn Simplify) -> Self {
		let tolerance = options.tolerance / (2f64.powi(i32::from(options.max_zoom)) * f64::from(options.extent));
		Self {
			options,
			simplifier,
			sq_tolerance: tolerance * tolerance,
		}
	}

	fn feature_id(&self, id: Option<&Id>, properties: Option<&JsonObject>, index: Option<usize>) -> Option<GeoValue> {
		if let Some(key) = &self.options.promote_id {
			properties.and_then(|p| p.get(key)).map(GeoValue::from)
		} else if self.options.generate_id {
			Some(GeoValue::from(index.unwrap_or(0)))
		} else {
			id.map(|id| match id {
				Id::String(s) => GeoValue::from(s.as_str()),
				Id::Number(n) => GeoValue::from(n),
			})
		}
	}

	fn convert_geometry(
		&self,
		features: &mut Vec<Arc<Feature>>,
		geometry: &JsonGeometry,
		id: Option<&GeoValue>,
		tags: &Arc<GeoProperties>,
	) -> Result<()> {
		let push = |features: &mut Vec<Arc<Feature>>, geometry: Geometry| {
			features.push(Arc::new(Feature::new(id.cloned(), geometry, Arc::clone(tags))));
		};

		let geometry = match &geometry.value {
			Value::Point(position) => Geometry::Point(project(position)?),
			Value::MultiPoint(positions) => {
				Geometry::MultiPoint(positions.iter().map(project).collect::<Result<_>>()?)
			}
			Value::LineString(line) => Geometry::LineString(self.convert_ring(line, false)?),
			Value::MultiLineString(lines) => {
				if self.options.line_metrics {
					// every line becomes its own feature so that it keeps its own metrics
					for line in lines {
						push(features, Geometry::LineString(self.convert_ring(line, false)?));
					}
					return Ok(());
				}
				Geometry::MultiLineString(self.convert_rings(lines, false)?)
			}
			Value::Polygon(rings) => Geometry::Polygon(self.convert_rings(rings, true)?),
			Value::MultiPolygon(polygons) => Geometry::MultiPolygon(
				polygons
					.iter()
					.map(|rings| self.convert_rings(rings, true))
					.collect::<Result<_>>()?,
			),
			Value::GeometryCollection(geometries) => {
				for geometry in geometries {
					self.convert_geometry(features, geometry, id, tags)?;
				}
				return Ok(());
			}
		};

		push(features, geometry);
		Ok(())
	}

	fn convert_rings(&self, rings: &[LineStringType], is_polygon: bool) -> Result<Vec<Ring>> {
		rings.iter().map(|ring| self.convert_ring(ring, is_polygon)).collect()
	}

	/// Projects a line or polygon ring, records its length or area and tags vertex importances.
	fn convert_ring(&self, positions: &[Position], is_polygon: bool) -> Result<Ring> {
		let mut vertices: Vec<Vertex> = Vec::with_capacity(positions.len());
		let mut size = 0.0;

		for position in positions {
			let vertex = project(position)?;
			if let Some(prev) = vertices.last() {
				if is_polygon {
					size += (prev.x * vertex.y - vertex.x * prev.y) / 2.0;
				} else {
					size += (vertex.x - prev.x).hypot(vertex.y - prev.y);
				}
			}
			vertices.push(vertex);
		}

		self.simplifier.simplify(&mut vertices, self.sq_tolerance);
		Ok(Ring::new(vertices, RingMetrics::whole(f64::abs(size))))
	}
}

fn project(position: &Position) -> Result<Vertex> {
	ensure!(
		position.len() >= 2,
		"position must have at least two coordinates, but has {}",
		position.len()
	);
	Ok(Vertex::new(project_x(position[0]), project_y(position[1])))
}

fn properties(properties: Option<&JsonObject>) -> GeoProperties {
	properties.map(GeoProperties::from).unwrap_or_default()
}
