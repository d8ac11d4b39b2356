/// Signed area of a ring of coordinate pairs, using the shoelace formula.
///
/// The result is twice the geometric area. It is positive for rings that run
/// counter-clockwise in a y-up system, which is clockwise in tile space where y points down.
pub fn area_ring(ring: &[[f64; 2]]) -> f64 {
	let mut sum = 0f64;
	if let Some(mut p2) = ring.last() {
		for p1 in ring {
			sum += (p2[0] - p1[0]) * (p1[1] + p2[1]);
			p2 = p1;
		}
	}
	sum
}

/// Reverses `ring` if necessary, so that outer rings get a positive and holes a negative
/// [`area_ring`].
pub fn rewind_ring(ring: &mut [[f64; 2]], is_outer: bool) {
	if (area_ring(ring) < 0.0) == is_outer {
		ring.reverse();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const CCW: [[f64; 2]; 5] = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]];

	#[test]
	fn area_sign() {
		assert_eq!(area_ring(&CCW), 200.0);
		let mut cw = CCW;
		cw.reverse();
		assert_eq!(area_ring(&cw), -200.0);
		assert_eq!(area_ring(&[]), 0.0);
	}

	#[test]
	fn rewind_outer() {
		let mut ring = CCW;
		ring.reverse();
		rewind_ring(&mut ring, true);
		assert_eq!(ring, CCW);
		rewind_ring(&mut ring, true);
		assert_eq!(ring, CCW);
	}

	#[test]
	fn rewind_inner() {
		let mut ring = CCW;
		rewind_ring(&mut ring, false);
		assert!(area_ring(&ring) < 0.0);
	}
}
