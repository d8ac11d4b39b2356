use std::f64::consts::PI;

/// Projects a longitude in degrees onto `[0, 1]`; values outside `[-180, 180]` land
/// outside the unit interval and are handled by antimeridian wrapping.
#[inline]
pub fn project_x(lng: f64) -> f64 {
	lng / 360.0 + 0.5
}

/// Projects a latitude in degrees with web mercator, clamped to `[0, 1]`.
/// `0` is the northern edge, `1` the southern edge.
#[inline]
pub fn project_y(lat: f64) -> f64 {
	let sin = (lat * PI / 180.0).sin();
	let y = 0.5 - 0.25 * ((1.0 + sin) / (1.0 - sin)).ln() / PI;
	y.clamp(0.0, 1.0)
}
