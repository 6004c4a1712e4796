pub use crate::{
	cli::font_options::FontOptions,
	font::{
		export::{save_glyphs_to_dir, SaveGlyphsToDirError},
		request_glyph_image, Charset, Font, GlyphBitmap, GlyphLookupError, LoadError as FontLoadError, McmFont,
	},
	log_level::LogLevel,
	osd::{
		self,
		file::{FileOsd, OpenError as OSDFileOpenError, ParseError as OSDFileParseError, Reader as OSDFileReader},
		Frame, Glyph, GlyphIndex, Position,
	},
};
