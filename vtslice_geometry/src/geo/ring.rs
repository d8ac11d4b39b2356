use super::{BBox, Vertex};
use anyhow::{Result, ensure};
use std::fmt::Debug;

/// Length/area bookkeeping attached to every ring.
///
/// `size` is the length of a line or the absolute area of a polygon ring, measured in
/// projected units. `start` and `end` are cumulative distances along the original line
/// and are only refined by the clipper when line metrics are tracked.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RingMetrics {
	pub size: f64,
	pub start: f64,
	pub end: f64,
}

impl RingMetrics {
	/// Metrics of an unclipped ring of the given size.
	pub fn whole(size: f64) -> Self {
		Self {
			size,
			start: 0.0,
			end: size,
		}
	}
}

/// A connected sequence of vertices: a line, a polygon ring or a slice of either.
#[derive(Clone, Default, PartialEq)]
pub struct Ring {
	pub vertices: Vec<Vertex>,
	pub metrics: RingMetrics,
}

impl Ring {
	pub fn new(vertices: Vec<Vertex>, metrics: RingMetrics) -> Self {
		Self { vertices, metrics }
	}

	/// An empty ring inheriting the metrics of `self`. Used to start a new clip slice.
	pub fn empty_slice(&self) -> Self {
		Self {
			vertices: Vec::new(),
			metrics: self.metrics,
		}
	}

	pub fn len(&self) -> usize {
		self.vertices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty()
	}

	pub fn push(&mut self, vertex: Vertex) {
		self.vertices.push(vertex);
	}

	pub fn first(&self) -> Option<&Vertex> {
		self.vertices.first()
	}

	pub fn last(&self) -> Option<&Vertex> {
		self.vertices.last()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
		self.vertices.iter()
	}

	/// Returns a copy moved by `dx` along the x axis; metrics are kept.
	pub fn shifted(&self, dx: f64) -> Self {
		Self {
			vertices: self.vertices.iter().map(|v| v.shifted(dx)).collect(),
			metrics: self.metrics,
		}
	}

	/// Grows `bbox` to include every vertex of this ring.
	pub fn extend_bbox(&self, bbox: &mut BBox) {
		for vertex in &self.vertices {
			bbox.include(vertex.x, vertex.y);
		}
	}

	/// Checks that the ring is closed, i.e. the first and last vertex share a position.
	pub fn verify_closed(&self) -> Result<()> {
		ensure!(!self.vertices.is_empty(), "ring must not be empty");
		let (first, last) = (&self.vertices[0], &self.vertices[self.vertices.len() - 1]);
		ensure!(
			first.same_position(last),
			"ring must be closed, but starts at {first:?} and ends at {last:?}"
		);
		Ok(())
	}
}

impl<T> From<Vec<T>> for Ring
where
	Vertex: From<T>,
{
	fn from(value: Vec<T>) -> Self {
		Ring::new(value.into_iter().map(Vertex::from).collect(), RingMetrics::default())
	}
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Ring
where
	Vertex: From<&'a T>,
{
	fn from(value: &'a [T; N]) -> Self {
		Ring::new(value.iter().map(Vertex::from).collect(), RingMetrics::default())
	}
}

impl Debug for Ring {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.vertices).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn square() -> Ring {
		Ring::from(&[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]])
	}

	#[test]
	fn verify_closed() {
		assert!(square().verify_closed().is_ok());
		assert!(Ring::from(&[[0, 0], [1, 0], [1, 1]]).verify_closed().is_err());
		assert!(Ring::default().verify_closed().is_err());
	}

	#[test]
	fn empty_slice_inherits_metrics() {
		let ring = Ring::new(vec![Vertex::new(0.0, 0.0)], RingMetrics::whole(4.0));
		let slice = ring.empty_slice();
		assert!(slice.is_empty());
		assert_eq!(slice.metrics, RingMetrics::whole(4.0));
	}

	#[test]
	fn shifted() {
		let ring = square().shifted(1.0);
		assert_eq!(ring.first().unwrap().x, 1.0);
		assert_eq!(ring.vertices[1].x, 11.0);
		assert_eq!(ring.len(), 5);
	}

	#[test]
	fn extend_bbox() {
		let mut bbox = BBox::empty();
		square().extend_bbox(&mut bbox);
		assert_eq!(bbox, BBox::new(0.0, 0.0, 10.0, 10.0));
	}

	#[test]
	fn debug_format() {
		let ring = Ring::from(&[[1, 2]]);
		assert_eq!(format!("{ring:?}"), "[[1.0, 2.0, 0.0]]");
	}
}
