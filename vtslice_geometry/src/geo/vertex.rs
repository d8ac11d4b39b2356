use super::Axis;
use std::fmt::Debug;

/// A projected vertex in unit-square space.
///
/// Besides the position a vertex carries the bookkeeping of the pipeline stages that
/// touched it: the simplifier stores the squared distance that made the vertex
/// significant in `importance`, the stripe clipper marks the vertices it inserts on a
/// clip boundary with `on_edge`.
#[derive(Clone, Copy, PartialEq)]
pub struct Vertex {
	pub x: f64,
	pub y: f64,
	/// Squared distance assigned by the simplifier, `0` if never selected.
	pub importance: f64,
	/// Set for intersection vertices inserted on a clip boundary.
	pub on_edge: bool,
}

impl Vertex {
	/// Importance of ring endpoints. Larger than any squared distance inside the unit square
	/// relevant for tolerances, so endpoints always survive simplification.
	pub const MAX_IMPORTANCE: f64 = 1.0;

	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			importance: 0.0,
			on_edge: false,
		}
	}

	#[must_use]
	pub fn with_importance(x: f64, y: f64, importance: f64) -> Self {
		Self {
			x,
			y,
			importance,
			on_edge: false,
		}
	}

	/// Creates a vertex lying on a clip boundary.
	#[must_use]
	pub fn edge(x: f64, y: f64) -> Self {
		Self {
			x,
			y,
			importance: 0.0,
			on_edge: true,
		}
	}

	#[inline]
	pub fn along(&self, axis: Axis) -> f64 {
		axis.pick(self.x, self.y)
	}

	/// Returns a copy moved by `dx` along the x axis.
	#[must_use]
	pub fn shifted(&self, dx: f64) -> Self {
		Self { x: self.x + dx, ..*self }
	}

	/// Whether the vertex survives simplification at the given squared tolerance.
	pub fn is_retained(&self, sq_tolerance: f64) -> bool {
		self.on_edge || self.importance > sq_tolerance
	}

	pub fn same_position(&self, other: &Vertex) -> bool {
		self.x == other.x && self.y == other.y
	}

	pub fn as_pair(&self) -> [f64; 2] {
		[self.x, self.y]
	}
}

impl From<[f64; 2]> for Vertex {
	fn from(value: [f64; 2]) -> Self {
		Vertex::new(value[0], value[1])
	}
}

impl<'a, T> From<&'a [T; 2]> for Vertex
where
	T: Copy + Into<f64>,
{
	fn from(value: &'a [T; 2]) -> Self {
		Vertex::new(value[0].into(), value[1].into())
	}
}

impl Debug for Vertex {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.on_edge {
			write!(f, "[{:?}, {:?}, edge]", self.x, self.y)
		} else {
			write!(f, "[{:?}, {:?}, {:?}]", self.x, self.y, self.importance)
		}
	}
}
