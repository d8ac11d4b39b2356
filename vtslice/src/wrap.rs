//! Antimeridian handling.
//!
//! Geometry reaching past the left or right edge of the world (including the tile buffer)
//! is copied into the neighbouring world copy, so that tiles on both sides of the ±180°
//! seam see it.

use crate::clip::{Stripe, clip};
use std::sync::Arc;
use vtslice_geometry::{Axis, Feature};

/// Wraps `features` around the antimeridian.
///
/// `buffer` is the tile buffer relative to the tile size. Returns the input unchanged if no
/// feature reaches into a neighbouring world copy. Otherwise the result is the left part
/// shifted by `+1`, the clipped center part and the right part shifted by `-1`, in that
/// order.
pub fn wrap(features: Vec<Arc<Feature>>, buffer: f64, line_metrics: bool) -> Vec<Arc<Feature>> {
	let world = |k1: f64, k2: f64| Stripe::new(1.0, k1, k2, Axis::X);

	let left = clip(&features, &world(-1.0 - buffer, buffer), -1.0, 2.0, line_metrics).map(|f| shift_features(&f, 1.0));
	let right =
		clip(&features, &world(1.0 - buffer, 2.0 + buffer), -1.0, 2.0, line_metrics).map(|f| shift_features(&f, -1.0));

	if left.is_none() && right.is_none() {
		return features;
	}

	let mut merged = left.unwrap_or_default();
	if let Some(center) = clip(&features, &world(-buffer, 1.0 + buffer), -1.0, 2.0, line_metrics) {
		merged.extend(center.iter().cloned());
	}
	merged.extend(right.into_iter().flatten());
	merged
}

fn shift_features(features: &[Arc<Feature>], dx: f64) -> Vec<Arc<Feature>> {
	features.iter().map(|feature| Arc::new(feature.shifted(dx))).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use pretty_assertions::assert_eq;
	use vtslice_geometry::{GeoProperties, Geometry, Ring, RingMetrics, Vertex};

	const BUFFER: f64 = 0.0625;

	fn line(coords: &[[f64; 2]]) -> Arc<Feature> {
		let ring = Ring::new(coords.iter().map(|c| Vertex::from(*c)).collect(), RingMetrics::whole(1.0));
		Arc::new(Feature::new(None, Geometry::LineString(ring), Arc::new(GeoProperties::new())))
	}

	fn bboxes(features: &[Arc<Feature>]) -> Vec<[f64; 4]> {
		features.iter().map(|f| f.bbox().as_array()).collect()
	}

	#[test]
	fn inside_adds_nothing() {
		let features = vec![line(&[[0.25, 0.5], [0.75, 0.5]])];
		let wrapped = wrap(features.clone(), BUFFER, false);
		assert_eq!(wrapped.len(), 1);
		assert!(Arc::ptr_eq(&wrapped[0], &features[0]));
	}

	#[test]
	fn crossing_right_edge() {
		let features = vec![line(&[[0.75, 0.5], [1.25, 0.5]])];
		let wrapped = wrap(features, BUFFER, false);
		assert_eq!(
			bboxes(&wrapped),
			vec![[0.75, 0.5, 1.0625, 0.5], [-0.0625, 0.5, 0.25, 0.5]]
		);
	}

	#[test]
	fn crossing_left_edge() {
		let features = vec![line(&[[-0.25, 0.5], [0.25, 0.5]])];
		let wrapped = wrap(features, BUFFER, false);
		assert_eq!(
			bboxes(&wrapped),
			vec![[0.75, 0.5, 1.0625, 0.5], [-0.0625, 0.5, 0.25, 0.5]]
		);
	}

	#[test]
	fn shifted_copy_keeps_metrics() {
		let features = vec![line(&[[0.9, 0.5], [1.1, 0.5]])];
		let wrapped = wrap(features, BUFFER, false);
		assert_eq!(wrapped.len(), 2);
		let Geometry::LineString(ring) = wrapped[1].geometry() else {
			panic!("expected a line string");
		};
		assert_eq!(ring.metrics, RingMetrics::whole(1.0));
		assert_eq!(wrapped[1].bbox().x_min, -0.0625);
		assert_relative_eq!(wrapped[1].bbox().x_max, 0.1, epsilon = 1e-12);
	}

	#[test]
	fn entirely_in_neighbour_world() {
		let features = vec![line(&[[1.5, 0.5], [1.75, 0.5]])];
		let wrapped = wrap(features, BUFFER, false);
		assert_eq!(bboxes(&wrapped), vec![[0.5, 0.5, 0.75, 0.5]]);
	}
}
