use super::Axis;
use std::fmt::Debug;

/// An axis-aligned bounding box in projected space.
///
/// An empty box has its minimum at `+∞` and its maximum at `-∞`, so that including the
/// first point makes it collapse onto that point.
#[derive(Clone, Copy, PartialEq)]
pub struct BBox {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl BBox {
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
		Self {
			x_min,
			y_min,
			x_max,
			y_max,
		}
	}

	pub fn empty() -> Self {
		Self::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY)
	}

	pub fn include(&mut self, x: f64, y: f64) {
		self.x_min = self.x_min.min(x);
		self.y_min = self.y_min.min(y);
		self.x_max = self.x_max.max(x);
		self.y_max = self.y_max.max(y);
	}

	/// Grows this box so that it also covers `other`.
	pub fn extend(&mut self, other: &BBox) {
		self.x_min = self.x_min.min(other.x_min);
		self.y_min = self.y_min.min(other.y_min);
		self.x_max = self.x_max.max(other.x_max);
		self.y_max = self.y_max.max(other.y_max);
	}

	/// Minimum and maximum along `axis`.
	pub fn range(&self, axis: Axis) -> (f64, f64) {
		match axis {
			Axis::X => (self.x_min, self.x_max),
			Axis::Y => (self.y_min, self.y_max),
		}
	}

	pub fn as_array(&self) -> [f64; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}
}

impl Default for BBox {
	fn default() -> Self {
		Self::empty()
	}
}

impl Debug for BBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "BBox({:?})", self.as_array())
	}
}
