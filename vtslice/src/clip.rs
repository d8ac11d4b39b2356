//! Stripe clipping: clips features against the interval between two axis-parallel lines.
//!
//! ```text
//!      |        |
//!   ___|___     |     /
//!  /   |   \____|____/
//!      |        |
//!      k1       k2
//! ```
//!
//! Lines are cut into slices at every boundary crossing. Polygon rings are never cut;
//! the clipped ring follows the boundary and is closed again if needed. Every vertex
//! inserted on a boundary is marked with [`Vertex::on_edge`] so that simplification
//! never removes it.

use std::{borrow::Cow, sync::Arc};
use vtslice_geometry::{Axis, Feature, Geometry, Ring, Vertex};

/// The interval `[k1, k2]` along `axis`, in unit-square coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stripe {
	pub k1: f64,
	pub k2: f64,
	pub axis: Axis,
}

impl Stripe {
	/// Creates a stripe from boundaries given in units of `1 / scale`.
	pub fn new(scale: f64, k1: f64, k2: f64, axis: Axis) -> Self {
		Self {
			k1: k1 / scale,
			k2: k2 / scale,
			axis,
		}
	}

	#[inline]
	fn contains(&self, value: f64) -> bool {
		value >= self.k1 && value <= self.k2
	}

	#[inline]
	fn accepts(&self, min: f64, max: f64) -> bool {
		min >= self.k1 && max < self.k2
	}

	#[inline]
	fn rejects(&self, min: f64, max: f64) -> bool {
		max < self.k1 || min >= self.k2
	}
}

/// Clips `features` to `stripe`.
///
/// `min_all` and `max_all` bound all features along the stripe axis. If they show that
/// every feature lies inside the stripe, the input is returned as is. Returns `None` if no
/// feature touches the stripe.
///
/// With `line_metrics`, every line slice becomes a feature of its own and carries the
/// distance along the original line at which it starts and ends.
pub fn clip<'a>(
	features: &'a [Arc<Feature>],
	stripe: &Stripe,
	min_all: f64,
	max_all: f64,
	line_metrics: bool,
) -> Option<Cow<'a, [Arc<Feature>]>> {
	if stripe.accepts(min_all, max_all) {
		return Some(Cow::Borrowed(features));
	} else if stripe.rejects(min_all, max_all) {
		return None;
	}

	let mut clipped = Vec::new();

	for feature in features {
		let (min, max) = feature.bbox().range(stripe.axis);

		if stripe.accepts(min, max) {
			clipped.push(Arc::clone(feature));
			continue;
		} else if stripe.rejects(min, max) {
			continue;
		}

		match feature.geometry() {
			Geometry::Point(vertex) => {
				let vertices = clip_points(std::slice::from_ref(vertex), stripe);
				push_points(&mut clipped, feature, vertices);
			}
			Geometry::MultiPoint(vertices) => {
				let vertices = clip_points(vertices, stripe);
				push_points(&mut clipped, feature, vertices);
			}
			Geometry::LineString(line) => {
				let mut slices = Vec::new();
				clip_line(line, &mut slices, stripe, false, line_metrics);
				push_lines(&mut clipped, feature, slices, line_metrics);
			}
			Geometry::MultiLineString(lines) => {
				// only single line strings carry line metrics
				let slices = clip_lines(lines, stripe, false, false);
				push_lines(&mut clipped, feature, slices, false);
			}
			Geometry::Polygon(rings) => {
				let rings = clip_lines(rings, stripe, true, false);
				if !rings.is_empty() {
					clipped.push(Arc::new(feature.with_geometry(Geometry::Polygon(rings))));
				}
			}
			Geometry::MultiPolygon(polygons) => {
				let polygons: Vec<Vec<Ring>> = polygons
					.iter()
					.map(|rings| clip_lines(rings, stripe, true, false))
					.filter(|rings| !rings.is_empty())
					.collect();
				if !polygons.is_empty() {
					clipped.push(Arc::new(feature.with_geometry(Geometry::MultiPolygon(polygons))));
				}
			}
		}
	}

	if clipped.is_empty() {
		None
	} else {
		Some(Cow::Owned(clipped))
	}
}

fn push_points(out: &mut Vec<Arc<Feature>>, feature: &Feature, mut vertices: Vec<Vertex>) {
	let geometry = match vertices.len() {
		0 => return,
		1 => Geometry::Point(vertices.remove(0)),
		_ => Geometry::MultiPoint(vertices),
	};
	out.push(Arc::new(feature.with_geometry(geometry)));
}

fn push_lines(out: &mut Vec<Arc<Feature>>, feature: &Feature, mut slices: Vec<Ring>, line_metrics: bool) {
	if line_metrics {
		for slice in slices {
			out.push(Arc::new(feature.with_geometry(Geometry::LineString(slice))));
		}
		return;
	}
	let geometry = match slices.len() {
		0 => return,
		1 => Geometry::LineString(slices.remove(0)),
		_ => Geometry::MultiLineString(slices),
	};
	out.push(Arc::new(feature.with_geometry(geometry)));
}

fn clip_points(vertices: &[Vertex], stripe: &Stripe) -> Vec<Vertex> {
	vertices
		.iter()
		.filter(|v| stripe.contains(v.along(stripe.axis)))
		.copied()
		.collect()
}

fn clip_lines(lines: &[Ring], stripe: &Stripe, is_polygon: bool, track_metrics: bool) -> Vec<Ring> {
	let mut out = Vec::new();
	for line in lines {
		clip_line(line, &mut out, stripe, is_polygon, track_metrics);
	}
	out
}

/// Clips one line or ring, appending the resulting slices to `out`.
fn clip_line(line: &Ring, out: &mut Vec<Ring>, stripe: &Stripe, is_polygon: bool, track_metrics: bool) {
	let Stripe { k1, k2, axis } = *stripe;
	let mut slice = line.empty_slice();
	let mut len = line.metrics.start;
	let mut seg_len = 0.0;

	for pair in line.vertices.windows(2) {
		let (va, vb) = (&pair[0], &pair[1]);
		let a = va.along(axis);
		let b = vb.along(axis);
		let mut exit = None;

		if track_metrics {
			seg_len = (va.x - vb.x).hypot(va.y - vb.y);
		}

		if a < k1 {
			// ---|-->  |
			if b > k1 {
				let t = intersect(&mut slice, va, vb, k1, axis);
				if track_metrics {
					slice.metrics.start = len + seg_len * t;
				}
			}
		} else if a > k2 {
			// |  <--|---
			if b < k2 {
				let t = intersect(&mut slice, va, vb, k2, axis);
				if track_metrics {
					slice.metrics.start = len + seg_len * t;
				}
			}
		} else {
			slice.push(*va);
		}

		if b < k1 && a >= k1 {
			// <--|---  | or <--|-----|---
			exit = Some(intersect(&mut slice, va, vb, k1, axis));
		}
		if b > k2 && a <= k2 {
			// |  ---|--> or ---|-----|-->
			exit = Some(intersect(&mut slice, va, vb, k2, axis));
		}

		if !is_polygon && let Some(t) = exit {
			if track_metrics {
				slice.metrics.end = len + seg_len * t;
			}
			out.push(std::mem::replace(&mut slice, line.empty_slice()));
		}

		len += seg_len;
	}

	if let Some(last) = line.last()
		&& stripe.contains(last.along(axis))
	{
		slice.push(*last);
	}

	if is_polygon
		&& slice.len() >= 2
		&& let (Some(first), Some(last)) = (slice.first(), slice.last())
		&& !first.same_position(last)
	{
		let first = *first;
		slice.push(first);
	}

	if !slice.is_empty() {
		out.push(slice);
	}
}

/// Appends the intersection of segment `a`–`b` with the boundary `k` and returns its
/// position `t` along the segment.
fn intersect(out: &mut Ring, a: &Vertex, b: &Vertex, k: f64, axis: Axis) -> f64 {
	match axis {
		Axis::X => {
			let t = (k - a.x) / (b.x - a.x);
			out.push(Vertex::edge(k, a.y + (b.y - a.y) * t));
			t
		}
		Axis::Y => {
			let t = (k - a.y) / (b.y - a.y);
			out.push(Vertex::edge(a.x + (b.x - a.x) * t, k));
			t
		}
	}
}
