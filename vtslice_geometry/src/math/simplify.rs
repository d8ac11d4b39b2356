use crate::Vertex;

/// Assigns a retain-importance to every vertex of a ring.
///
/// Implementations must give both endpoints [`Vertex::MAX_IMPORTANCE`], so that they are
/// never dropped, and must leave vertex positions untouched. Vertices whose importance is
/// not above a tile's squared tolerance are dropped when the tile is packed.
pub trait Simplify {
	fn simplify(&self, vertices: &mut [Vertex], sq_tolerance: f64);
}

/// Douglas–Peucker importance tagging.
///
/// Every vertex picked as a split point stores the squared distance to the segment it was
/// split from. The split is done with an explicit stack of index ranges.
#[derive(Clone, Copy, Debug, Default)]
pub struct DouglasPeucker;

impl Simplify for DouglasPeucker {
	fn simplify(&self, vertices: &mut [Vertex], sq_tolerance: f64) {
		let Some(last) = vertices.len().checked_sub(1) else {
			return;
		};
		vertices[0].importance = Vertex::MAX_IMPORTANCE;
		vertices[last].importance = Vertex::MAX_IMPORTANCE;

		let mut ranges = vec![(0, last)];
		while let Some((first, last)) = ranges.pop() {
			let mut max_sq_dist = sq_tolerance;
			let mid = first + ((last - first) >> 1);
			let mut min_pos_to_mid = last - first;
			let mut index = None;

			let (a, b) = (vertices[first], vertices[last]);
			for (i, p) in vertices.iter().enumerate().take(last).skip(first + 1) {
				let d = sq_seg_dist(p, &a, &b);
				if d > max_sq_dist {
					index = Some(i);
					max_sq_dist = d;
				} else if d == max_sq_dist {
					// prefer a pivot close to the middle to keep ranges balanced on degenerate input
					let pos_to_mid = i.abs_diff(mid);
					if pos_to_mid < min_pos_to_mid {
						index = Some(i);
						min_pos_to_mid = pos_to_mid;
					}
				}
			}

			if max_sq_dist > sq_tolerance
				&& let Some(index) = index
			{
				vertices[index].importance = max_sq_dist;
				if index - first > 1 {
					ranges.push((first, index));
				}
				if last - index > 1 {
					ranges.push((index, last));
				}
			}
		}
	}
}

/// Squared distance from `p` to the segment `a`–`b`.
fn sq_seg_dist(p: &Vertex, a: &Vertex, b: &Vertex) -> f64 {
	let (mut x, mut y) = (a.x, a.y);
	let dx = b.x - x;
	let dy = b.y - y;

	if dx != 0.0 || dy != 0.0 {
		let t = ((p.x - x) * dx + (p.y - y) * dy) / (dx * dx + dy * dy);
		if t > 1.0 {
			x = b.x;
			y = b.y;
		} else if t > 0.0 {
			x += dx * t;
			y += dy * t;
		}
	}

	let dx = p.x - x;
	let dy = p.y - y;
	dx * dx + dy * dy
}
