use getset::CopyGetters;

use super::Position;

pub type GlyphIndex = u16;

/// Codes the firmware writes into slots with nothing to display
pub const BLANK_GLYPH_INDICES: [GlyphIndex; 2] = [0x0000, 0x0020];

pub fn is_blank(index: GlyphIndex) -> bool {
	BLANK_GLYPH_INDICES.contains(&index)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Glyph {
	index: GlyphIndex,
	position: Position,
}

impl Glyph {
	pub fn new(index: GlyphIndex, position: Position) -> Self {
		Self { index, position }
	}
}
