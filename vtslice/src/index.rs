//! The tile index: builds the upper part of the pyramid eagerly and cuts deeper tiles on
//! demand.

use crate::{
	LogLevel, MAX_SUPPORTED_ZOOM, TileCoord, TilerOptions,
	clip::{Stripe, clip},
	convert::convert,
	tile::Tile,
	wrap::wrap,
};
use anyhow::{Context, Result};
use geojson::GeoJson;
use log::{debug, trace};
use std::{
	borrow::Cow,
	collections::{BTreeMap, HashMap, hash_map::Entry},
	sync::Arc,
	time::Instant,
};
use vtslice_geometry::{
	Axis, Feature,
	math::{DouglasPeucker, Simplify},
};

/// A lazily built pyramid of vector tiles.
///
/// Creating the index converts the input and splits it top-down until tiles are small
/// enough or [`TilerOptions::index_max_zoom`] is reached. Every tile where splitting stopped
/// keeps its input features, so that [`TileIndex::get_tile`] can cut deeper tiles from it
/// later. Tiles are cached for the lifetime of the index.
pub struct TileIndex {
	options: TilerOptions,
	tiles: HashMap<u64, Tile>,
	tile_coords: Vec<TileCoord>,
	stats: BTreeMap<u8, usize>,
	total: usize,
}

/// One pending split: the features of a tile and its coordinate.
type SplitJob = (Vec<Arc<Feature>>, TileCoord);

impl TileIndex {
	/// Builds an index using the default [`DouglasPeucker`] simplifier.
	pub fn new(data: &GeoJson, options: TilerOptions) -> Result<TileIndex> {
		Self::with_simplifier(data, options, &DouglasPeucker)
	}

	/// Parses `json` as GeoJSON and builds an index from it.
	pub fn from_json_str(json: &str, options: TilerOptions) -> Result<TileIndex> {
		let data = json.parse::<GeoJson>().context("parsing GeoJSON")?;
		Self::new(&data, options)
	}

	/// Builds an index, tagging vertex importances with `simplifier`.
	pub fn with_simplifier(data: &GeoJson, options: TilerOptions, simplifier: &dyn Simplify) -> Result<TileIndex> {
		options.validate()?;
		let log_level = options.debug;

		let start = Instant::now();
		let features = convert(data, &options, simplifier)?;
		if log_level > LogLevel::None {
			debug!("preprocess data: {:?}", start.elapsed());
			debug!(
				"index: max_zoom: {}, max_points: {}",
				options.index_max_zoom, options.index_max_points
			);
		}

		let start = Instant::now();
		let features = wrap(features, options.relative_buffer(), options.line_metrics);

		let mut index = TileIndex {
			options,
			tiles: HashMap::new(),
			tile_coords: Vec::new(),
			stats: BTreeMap::new(),
			total: 0,
		};

		if !features.is_empty() {
			index.split_tile(features, TileCoord::ROOT, None);
		}

		if log_level > LogLevel::None {
			if let Some(root) = index.tiles.get(&TileCoord::ROOT.id()) {
				debug!("features: {}, points: {}", root.num_features, root.num_points);
			}
			debug!("generate tiles: {:?}", start.elapsed());
			debug!("tiles generated: {} {:?}", index.total, index.stats);
		}

		Ok(index)
	}

	/// Splits `features` of the tile at `coord` into sub-tiles.
	///
	/// Without a `target`, splitting stops at `index_max_zoom` (capped at
	/// [`MAX_SUPPORTED_ZOOM`]) or at tiles with at most `index_max_points` points. With a `target`, only ancestors of the target are split,
	/// down to the target or `max_zoom`.
	fn split_tile(&mut self, features: Vec<Arc<Feature>>, coord: TileCoord, target: Option<TileCoord>) {
		let options = &self.options;
		let log_level = options.debug;

		let k1 = 0.5 * options.relative_buffer();
		let k2 = 0.5 - k1;
		let k3 = 0.5 + k1;
		let k4 = 1.0 + k1;
		let index_max_zoom = options.index_max_zoom.min(MAX_SUPPORTED_ZOOM);

		let mut stack: Vec<SplitJob> = vec![(features, coord)];

		while let Some((features, coord)) = stack.pop() {
			let tile = match self.tiles.entry(coord.id()) {
				Entry::Occupied(entry) => entry.into_mut(),
				Entry::Vacant(entry) => {
					let start = Instant::now();
					let tile = Tile::new(&features, coord, options);
					self.tile_coords.push(coord);

					if log_level > LogLevel::None {
						if log_level >= LogLevel::All {
							trace!(
								"tile {coord:?} (features: {}, points: {}, simplified: {}): {:?}",
								tile.num_features,
								tile.num_points,
								tile.num_simplified,
								start.elapsed()
							);
						}
						*self.stats.entry(coord.level).or_default() += 1;
						self.total += 1;
					}
					entry.insert(tile)
				}
			};

			let stop = match &target {
				None => coord.level >= index_max_zoom || tile.num_points <= options.index_max_points,
				Some(target) => {
					coord.level == options.max_zoom || coord.level == target.level || !coord.is_ancestor_of(target)
				}
			};

			if stop {
				// keep the features, so that the tile can be split on demand
				tile.source = Some(features);
				continue;
			}

			tile.source = None;
			if features.is_empty() {
				continue;
			}

			let start = Instant::now();
			let bbox = tile.bbox;
			let scale = f64::from(coord.size());
			let (x, y) = (f64::from(coord.x), f64::from(coord.y));
			let line_metrics = options.line_metrics;

			let left = clip(&features, &Stripe::new(scale, x - k1, x + k3, Axis::X), bbox.x_min, bbox.x_max, line_metrics);
			let right =
				clip(&features, &Stripe::new(scale, x + k2, x + k4, Axis::X), bbox.x_min, bbox.x_max, line_metrics);
			let rows = [
				Stripe::new(scale, y - k1, y + k3, Axis::Y),
				Stripe::new(scale, y + k2, y + k4, Axis::Y),
			];
			let [top_left, bottom_left] = clip_rows(left.as_deref(), rows, bbox.y_min, bbox.y_max, line_metrics);
			let [top_right, bottom_right] = clip_rows(right.as_deref(), rows, bbox.y_min, bbox.y_max, line_metrics);

			if log_level >= LogLevel::All {
				trace!("clipping {coord:?}: {:?}", start.elapsed());
			}

			let [tl, bl, tr, br] = coord.children();
			stack.push((top_left, tl));
			stack.push((bottom_left, bl));
			stack.push((top_right, tr));
			stack.push((bottom_right, br));
		}
	}

	/// Returns the tile at `z`/`x`/`y` in tile coordinates, cutting it from the nearest
	/// ancestor if it does not exist yet.
	///
	/// `x` wraps around the antimeridian. Returns `None` if `z` or `y` are out of range or the
	/// tile cannot be derived from any retained ancestor.
	pub fn get_tile(&mut self, z: u8, x: i64, y: u32) -> Option<&Tile> {
		if z > MAX_SUPPORTED_ZOOM {
			return None;
		}
		let x = u32::try_from(x.rem_euclid(1i64 << z)).ok()?;
		let coord = TileCoord::new(z, x, y).ok()?;
		let id = coord.id();

		if !self.tiles.contains_key(&id) {
			let log_level = self.options.debug;
			if log_level >= LogLevel::All {
				trace!("drilling down to {coord:?}");
			}

			let mut parent = coord.parent();
			while let Some(p) = parent
				&& !self.tiles.contains_key(&p.id())
			{
				parent = p.parent();
			}
			let parent = parent?;
			let source = self.tiles.get_mut(&parent.id())?.source.take()?;

			let start = Instant::now();
			if log_level >= LogLevel::All {
				trace!("found parent tile {parent:?}");
			}
			self.split_tile(source, parent, Some(coord));
			if log_level >= LogLevel::All {
				trace!("drilling down: {:?}", start.elapsed());
			}
		}

		let extent = self.options.extent;
		let tile = self.tiles.get_mut(&id)?;
		tile.transform(extent);
		Some(tile)
	}

	/// Coordinates of all tiles created so far, in creation order.
	pub fn tile_coords(&self) -> &[TileCoord] {
		&self.tile_coords
	}

	/// Number of created tiles per zoom level. Only counted if `debug` is enabled.
	pub fn stats(&self) -> &BTreeMap<u8, usize> {
		&self.stats
	}

	/// Total number of created tiles. Only counted if `debug` is enabled.
	pub fn total(&self) -> usize {
		self.total
	}
}

/// Clips `features` to the top and bottom row of a split. Missing results become empty
/// feature sets.
fn clip_rows(
	features: Option<&[Arc<Feature>]>,
	rows: [Stripe; 2],
	min: f64,
	max: f64,
	line_metrics: bool,
) -> [Vec<Arc<Feature>>; 2] {
	rows.map(|row| {
		features
			.and_then(|features| clip(features, &row, min, max, line_metrics))
			.map(Cow::into_owned)
			.unwrap_or_default()
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{TileFeatureType, TileGeometry};
	use pretty_assertions::assert_eq;
	use vtslice_geometry::math::{project_x, project_y};

	const POINT: &str = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[0,0]},"properties":{}}"#;

	fn index(json: &str, options: TilerOptions) -> TileIndex {
		TileIndex::from_json_str(json, options).unwrap()
	}

	#[test]
	fn point_in_root_tile() {
		let mut index = index(POINT, TilerOptions::default());
		let tile = index.get_tile(0, 0, 0).unwrap();
		assert_eq!(tile.features.len(), 1);
		assert_eq!(tile.features[0].geom_type(), TileFeatureType::Point);
		assert_eq!(tile.features[0].geometry, TileGeometry::Point(vec![[2048.0, 2048.0]]));
	}

	#[test]
	fn get_tile_is_idempotent() {
		let mut index = index(POINT, TilerOptions::default());
		let first = format!("{:?}", index.get_tile(7, 64, 64).unwrap());
		let count = index.tile_coords().len();
		let second = format!("{:?}", index.get_tile(7, 64, 64).unwrap());
		assert_eq!(first, second);
		assert_eq!(index.tile_coords().len(), count);
	}

	#[test]
	fn eager_pass_stops_at_small_tiles() {
		let index = index(POINT, TilerOptions::default());
		assert_eq!(index.tile_coords(), &[TileCoord::ROOT]);
		assert!(index.tiles[&TileCoord::ROOT.id()].has_source());
	}

	#[test]
	fn eager_pass_stops_at_index_max_zoom() {
		let options = TilerOptions {
			index_max_zoom: 2,
			index_max_points: 0,
			..TilerOptions::default()
		};
		let index = index(POINT, options);
		assert_eq!(index.tile_coords().len(), 1 + 4 + 4 * 4);
		assert!(index.tile_coords().iter().all(|c| c.level <= 2));
	}

	#[test]
	fn eager_pass_stops_at_supported_zoom() {
		let options = TilerOptions {
			index_max_zoom: 40,
			index_max_points: 0,
			..TilerOptions::default()
		};
		assert!(options.validate().is_ok());
		let json = r#"{"type":"Point","coordinates":[10,10]}"#;
		let mut index = index(json, options);

		let deepest = index.tile_coords().iter().map(|c| c.level).max();
		assert_eq!(deepest, Some(MAX_SUPPORTED_ZOOM));

		let size = f64::from(1u32 << MAX_SUPPORTED_ZOOM);
		let x = (project_x(10.0) * size).floor() as i64;
		let y = (project_y(10.0) * size).floor() as u32;
		let tile = index.get_tile(MAX_SUPPORTED_ZOOM, x, y).unwrap();
		assert_eq!(tile.features.len(), 1);
		assert!(tile.has_source());
	}

	#[test]
	fn drill_down_keeps_siblings_splittable() {
		let options = TilerOptions {
			index_max_zoom: 0,
			..TilerOptions::default()
		};
		let mut index = index(POINT, options);
		assert!(index.get_tile(3, 4, 4).is_some());

		// the path to the target gave up its source, the target and its siblings kept it
		assert!(!index.tiles[&TileCoord::ROOT.id()].has_source());
		assert!(!index.tiles[&TileCoord::new(2, 2, 2).unwrap().id()].has_source());
		assert!(index.tiles[&TileCoord::new(3, 4, 4).unwrap().id()].has_source());
		assert!(index.tiles[&TileCoord::new(3, 5, 5).unwrap().id()].has_source());
		assert!(index.tiles[&TileCoord::new(1, 0, 0).unwrap().id()].has_source());
		assert_eq!(index.tile_coords().len(), 1 + 4 + 4 + 4);
	}

	#[test]
	fn exhausted_ancestor() {
		// the point lies in the top-left quadrant
		let json = r#"{"type":"Point","coordinates":[-90,45]}"#;
		let options = TilerOptions {
			index_max_zoom: 0,
			..TilerOptions::default()
		};
		let mut index = index(json, options);
		assert!(index.get_tile(2, 3, 3).is_none());
		assert!(!index.tiles[&TileCoord::new(1, 1, 1).unwrap().id()].has_source());
		assert!(index.get_tile(2, 3, 3).is_none());
		assert!(index.get_tile(5, 31, 31).is_none());
		assert_eq!(index.get_tile(1, 0, 0).unwrap().features.len(), 1);
	}

	#[test]
	fn out_of_range() {
		let mut index = index(POINT, TilerOptions::default());
		assert!(index.get_tile(25, 0, 0).is_none());
		assert!(index.get_tile(1, 0, 2).is_none());
	}

	#[test]
	fn x_wraps_around() {
		let mut index = index(POINT, TilerOptions::default());
		let coord = *index.get_tile(1, -1, 0).unwrap().coord();
		assert_eq!(coord, TileCoord::new(1, 1, 0).unwrap());
		let coord = *index.get_tile(1, 2, 1).unwrap().coord();
		assert_eq!(coord, TileCoord::new(1, 0, 1).unwrap());
	}

	#[test]
	fn stats_are_counted_with_debug() {
		let options = TilerOptions {
			index_max_zoom: 2,
			index_max_points: 0,
			debug: LogLevel::Basic,
			..TilerOptions::default()
		};
		let mut index = index(POINT, options);
		assert_eq!(index.stats(), &BTreeMap::from([(0, 1), (1, 4), (2, 16)]));
		assert_eq!(index.total(), 21);
		index.get_tile(3, 4, 4);
		assert_eq!(index.total(), 25);

		let index = self::index(POINT, TilerOptions::default());
		assert_eq!(index.total(), 0);
		assert!(index.stats().is_empty());
	}

	#[test]
	fn empty_input() {
		let mut index = index(r#"{"type":"FeatureCollection","features":[]}"#, TilerOptions::default());
		assert!(index.tile_coords().is_empty());
		assert!(index.get_tile(0, 0, 0).is_none());
	}

	#[test]
	fn invalid_options() {
		let options = TilerOptions {
			max_zoom: 30,
			..TilerOptions::default()
		};
		assert!(TileIndex::from_json_str(POINT, options).is_err());
	}

	#[test]
	fn invalid_geojson() {
		let json = r#"{"type":"Feature","geometry":{"type":"Circle","coordinates":[0,0]},"properties":{}}"#;
		assert!(TileIndex::from_json_str(json, TilerOptions::default()).is_err());
		assert!(TileIndex::from_json_str("{", TilerOptions::default()).is_err());
	}
}
