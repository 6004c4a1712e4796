pub mod export;
pub mod mcm;
pub mod pixel;

use derive_more::From;
use image::{ImageBuffer, Rgba};
use thiserror::Error;

pub use mcm::{LoadError, McmFont};
pub use pixel::Pixel;

/// 12x18 image of one character
pub type GlyphBitmap = ImageBuffer<Rgba<u8>, Vec<u8>>;

/// Glyph bitmaps indexed by character code
pub type Charset = Vec<GlyphBitmap>;

#[derive(Debug, Error, From)]
pub enum GlyphLookupError {
	#[error(transparent)]
	LoadError(LoadError),
	#[error("glyph {index} not found, font has {count} glyphs")]
	#[from(ignore)]
	NotFound { index: usize, count: usize },
}

pub trait Font {
	fn charset(&self) -> Result<&Charset, LoadError>;

	fn glyph(&self, index: usize) -> Result<&GlyphBitmap, GlyphLookupError> {
		let charset = self.charset()?;
		charset.get(index).ok_or(GlyphLookupError::NotFound {
			index,
			count: charset.len(),
		})
	}
}

pub fn request_glyph_image<F: Font>(font: &F, index: usize) -> Result<&GlyphBitmap, GlyphLookupError> {
	font.glyph(index)
}
