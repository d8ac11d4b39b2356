use super::Tile;

impl Tile {
	/// Maps all packed coordinates from unit-square space into integral tile coordinates in
	/// `[0, extent]`, plus the buffer. Only the first call has an effect.
	pub(crate) fn transform(&mut self, extent: u32) {
		if self.transformed {
			return;
		}

		let scale = f64::from(self.coord().size());
		let (tx, ty) = (f64::from(self.coord().x), f64::from(self.coord().y));
		let extent = f64::from(extent);
		// halves round towards positive infinity
		let round = |v: f64| (v + 0.5).floor();

		for feature in &mut self.features {
			feature.geometry.for_each_point_mut(|point| {
				point[0] = round(extent * (point[0] * scale - tx));
				point[1] = round(extent * (point[1] * scale - ty));
			});
		}

		self.transformed = true;
	}
}
