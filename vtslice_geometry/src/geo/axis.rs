/// Axis of a clip stripe: `X` is horizontal, `Y` is vertical.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
	X,
	Y,
}

impl Axis {
	/// Picks the component of `(x, y)` that lies along this axis.
	#[inline]
	pub fn pick(self, x: f64, y: f64) -> f64 {
		match self {
			Axis::X => x,
			Axis::Y => y,
		}
	}
}
