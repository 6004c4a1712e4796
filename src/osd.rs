pub mod duration;
pub mod file;
pub mod frame;
pub mod glyph;
pub mod position;

use getset::CopyGetters;

pub use duration::EstimateDurationError;
pub use file::FileOsd;
pub use frame::Frame;
pub use glyph::{Glyph, GlyphIndex};
pub use position::{Coordinate, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Dimensions {
	pub width: Coordinate,
	pub height: Coordinate,
}

impl Dimensions {
	pub const fn new(width: Coordinate, height: Coordinate) -> Self {
		Self { width, height }
	}

	pub const fn count(&self) -> usize {
		self.width as usize * self.height as usize
	}
}

// Walksnail Avatar recordings always use a 53x20 grid, other firmware families may differ
pub const DIMENSIONS: Dimensions = Dimensions::new(53, 20);
pub const GLYPH_SLOT_COUNT: usize = DIMENSIONS.count();
