use std::time::Duration;

use derive_more::Deref;
use getset::{CopyGetters, Getters};

use super::{glyph, Glyph, GlyphIndex, Position};

pub type TimeMillis = u32;

#[derive(Debug, CopyGetters, Getters, Deref, Clone, PartialEq, Eq)]
pub struct Frame {
	#[getset(get_copy = "pub")]
	time_millis: TimeMillis,

	#[getset(get = "pub")]
	#[deref]
	glyphs: Vec<Glyph>,
}

impl Frame {
	pub fn new(time_millis: TimeMillis, glyphs: Vec<Glyph>) -> Self {
		Self { time_millis, glyphs }
	}

	/// Builds a frame from the raw payload codes in slot order, dropping blank codes.
	/// Slots are numbered from 1 and every slot, blank or not, advances the position.
	pub fn from_glyph_indices(time_millis: TimeMillis, indices: impl IntoIterator<Item = GlyphIndex>) -> Self {
		let glyphs = indices
			.into_iter()
			.enumerate()
			.filter(|(_, index)| !glyph::is_blank(*index))
			.filter_map(|(slot_index, index)| {
				let position = Position::from_slot(slot_index + 1);
				if position.is_on_grid() {
					Some(Glyph::new(index, position))
				} else {
					log::debug!("dropping glyph {index:#06x} from slot {} outside of the grid", slot_index + 1);
					None
				}
			})
			.collect();
		Self::new(time_millis, glyphs)
	}

	pub fn timestamp(&self) -> Duration {
		Duration::from_millis(self.time_millis as u64)
	}

	pub fn glyph_at(&self, position: Position) -> Option<&Glyph> {
		self.glyphs.iter().find(|glyph| glyph.position() == position)
	}
}
