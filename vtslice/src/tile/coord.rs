//! Tile coordinates in the pyramid.
//!
//! ```
//! use vtslice::TileCoord;
//!
//! let coord = TileCoord::new(3, 5, 2).unwrap();
//! assert_eq!(coord.parent(), Some(TileCoord::new(2, 2, 1).unwrap()));
//! assert!(TileCoord::new(1, 1, 0).unwrap().is_ancestor_of(&coord));
//! ```

use crate::MAX_SUPPORTED_ZOOM;
use anyhow::{Result, ensure};
use std::fmt::{self, Debug};

/// Zoom level and x/y index of a tile.
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	pub level: u8,
	pub x: u32,
	pub y: u32,
}

impl TileCoord {
	/// Creates a new `TileCoord`.
	///
	/// # Errors
	/// Returns an error if `level` is above the supported maximum or `x`/`y` are out of
	/// bounds for the level.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(
			level <= MAX_SUPPORTED_ZOOM,
			"level ({level}) must be <= {MAX_SUPPORTED_ZOOM}"
		);
		let max = 1u32 << level;
		ensure!(x < max, "x ({x}) out of bounds for level {level}");
		ensure!(y < max, "y ({y}) out of bounds for level {level}");
		Ok(TileCoord { level, x, y })
	}

	/// The root tile covering the whole world.
	pub const ROOT: TileCoord = TileCoord { level: 0, x: 0, y: 0 };

	/// Unique key of this tile, `((2^level * y + x) * 32) + level`.
	#[must_use]
	pub fn id(&self) -> u64 {
		((u64::from(self.y) << self.level) + u64::from(self.x)) * 32 + u64::from(self.level)
	}

	/// Number of tiles along one axis at this level.
	#[must_use]
	pub fn size(&self) -> u32 {
		1u32 << self.level
	}

	/// The tile one level up that contains this one.
	#[must_use]
	pub fn parent(&self) -> Option<TileCoord> {
		(self.level > 0).then(|| TileCoord {
			level: self.level - 1,
			x: self.x >> 1,
			y: self.y >> 1,
		})
	}

	/// The four tiles one level down: top-left, bottom-left, top-right, bottom-right.
	#[must_use]
	pub fn children(&self) -> [TileCoord; 4] {
		let (level, x, y) = (self.level + 1, self.x * 2, self.y * 2);
		[
			TileCoord { level, x, y },
			TileCoord { level, x, y: y + 1 },
			TileCoord { level, x: x + 1, y },
			TileCoord {
				level,
				x: x + 1,
				y: y + 1,
			},
		]
	}

	/// Whether `other` lies strictly below this tile.
	#[must_use]
	pub fn is_ancestor_of(&self, other: &TileCoord) -> bool {
		if other.level <= self.level {
			return false;
		}
		let steps = other.level - self.level;
		other.x >> steps == self.x && other.y >> steps == self.y
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}
