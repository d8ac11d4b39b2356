//! Tiling options and their validation.

use anyhow::{Result, bail, ensure};
use serde::Deserialize;
use std::io::Read;

/// Highest zoom level the tile id scheme can address.
pub const MAX_SUPPORTED_ZOOM: u8 = 24;

/// Verbosity of the diagnostics the index emits through the `log` facade.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8")]
pub enum LogLevel {
	/// No diagnostics.
	#[default]
	None,
	/// Timings and summary statistics at `debug` level, tile counters per zoom.
	Basic,
	/// Additionally every created tile, clip timing and drill-down at `trace` level.
	All,
}

impl TryFrom<u8> for LogLevel {
	type Error = anyhow::Error;

	fn try_from(value: u8) -> Result<Self> {
		Ok(match value {
			0 => LogLevel::None,
			1 => LogLevel::Basic,
			2 => LogLevel::All,
			_ => bail!("debug level must be 0, 1 or 2, but is {value}"),
		})
	}
}

/// Options controlling projection, simplification, clipping and the pyramid shape.
///
/// All fields have defaults, so a partial YAML document is enough:
///
/// ```
/// use vtslice::TilerOptions;
///
/// let options = TilerOptions::from_yaml_str("max_zoom: 10\nline_metrics: true").unwrap();
/// assert_eq!(options.max_zoom, 10);
/// assert_eq!(options.extent, 4096);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TilerOptions {
	/// Highest zoom level tiles are simplified for. Tiles at this zoom keep every vertex.
	pub max_zoom: u8,
	/// Deepest zoom level built eagerly by the initial pass.
	pub index_max_zoom: u8,
	/// The eager pass stops splitting tiles with at most this many points.
	pub index_max_points: usize,
	/// Simplification tolerance in tile pixels.
	pub tolerance: f64,
	/// Tile coordinate resolution.
	pub extent: u32,
	/// Overlap around each tile, in tile pixels.
	pub buffer: u32,
	/// Track cumulative line distances through clipping and expose them as tags.
	pub line_metrics: bool,
	/// Use the index of the input feature as feature id.
	pub generate_id: bool,
	/// Use the named property as feature id.
	pub promote_id: Option<String>,
	pub debug: LogLevel,
}

impl Default for TilerOptions {
	fn default() -> Self {
		Self {
			max_zoom: 14,
			index_max_zoom: 5,
			index_max_points: 100_000,
			tolerance: 3.0,
			extent: 4096,
			buffer: 64,
			line_metrics: false,
			generate_id: false,
			promote_id: None,
			debug: LogLevel::None,
		}
	}
}

impl TilerOptions {
	pub fn from_yaml_str(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	/// Checks the options for values the index cannot work with.
	pub fn validate(&self) -> Result<()> {
		ensure!(
			self.max_zoom <= MAX_SUPPORTED_ZOOM,
			"max_zoom should be in the 0-{MAX_SUPPORTED_ZOOM} range, but is {}",
			self.max_zoom
		);
		ensure!(
			!(self.promote_id.is_some() && self.generate_id),
			"promote_id and generate_id cannot be used together"
		);
		ensure!(self.extent > 0, "extent must be positive");
		Ok(())
	}

	/// Width of the tile buffer relative to the tile size.
	pub(crate) fn relative_buffer(&self) -> f64 {
		f64::from(self.buffer) / f64::from(self.extent)
	}
}
