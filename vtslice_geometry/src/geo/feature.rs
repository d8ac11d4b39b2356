use super::*;
use std::{fmt::Debug, sync::Arc};

/// A projected feature: geometry, optional id, tags and the bounding box of the geometry.
///
/// Features are immutable once created. Clipping, wrapping and shifting always produce new
/// features, while tags are shared between all features derived from the same input.
#[derive(Clone, PartialEq)]
pub struct Feature {
	id: Option<GeoValue>,
	geometry: Geometry,
	tags: Arc<GeoProperties>,
	bbox: BBox,
}

impl Feature {
	pub fn new(id: Option<GeoValue>, geometry: Geometry, tags: Arc<GeoProperties>) -> Self {
		let bbox = geometry.compute_bbox();
		Self {
			id,
			geometry,
			tags,
			bbox,
		}
	}

	/// Creates a feature that reuses id and tags of `self` with a new geometry.
	pub fn with_geometry(&self, geometry: Geometry) -> Self {
		Feature::new(self.id.clone(), geometry, Arc::clone(&self.tags))
	}

	/// Returns a copy moved by `dx` along the x axis.
	pub fn shifted(&self, dx: f64) -> Self {
		self.with_geometry(self.geometry.shifted(dx))
	}

	pub fn id(&self) -> Option<&GeoValue> {
		self.id.as_ref()
	}

	pub fn geometry(&self) -> &Geometry {
		&self.geometry
	}

	pub fn tags(&self) -> &Arc<GeoProperties> {
		&self.tags
	}

	pub fn bbox(&self) -> &BBox {
		&self.bbox
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		Feature::new(
			Some(GeoValue::from(13)),
			Geometry::LineString(Ring::from(&[[0.25, 0.25], [0.75, 0.5]])),
			Arc::new(GeoProperties::from(vec![
				("name", GeoValue::from("Nice")),
				("population", GeoValue::from(348085)),
			])),
		)
	}
}

impl Debug for Feature {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Feature")
			.field("id", &self.id)
			.field("geometry", &self.geometry)
			.field("tags", &self.tags)
			.field("bbox", &self.bbox)
			.finish()
	}
}
