//! MAX7456 `.mcm` font files
//!
//! The file starts with a `MAX7456` line followed, for each character, by the pixel data as a
//! stream of `0`/`1` characters spread over several lines, 2 characters per pixel, then by a
//! few padding lines which are ignored.

use std::path::{Path, PathBuf};

use derive_more::From;
use getset::Getters;
use image::ImageBuffer;
use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::file::{self, Error as FileError, LinesWithPath};

use super::{Charset, Font, GlyphBitmap, Pixel};

pub const SIGNATURE: &str = "MAX7456";

pub const GLYPH_WIDTH: u32 = 12;
pub const GLYPH_HEIGHT: u32 = 18;
pub const GLYPH_DATA_LEN: usize = (GLYPH_WIDTH * GLYPH_HEIGHT) as usize * Pixel::TOKEN_LEN;

// the line following the pixel data plus 9 more
const PADDING_LINE_COUNT: usize = 10;

#[derive(Debug, Error, From)]
pub enum LoadError {
	#[error(transparent)]
	FileError(FileError),
	#[error("invalid MCM font file signature in {}, expected {SIGNATURE}", .file_path.display())]
	#[from(ignore)]
	InvalidSignature { file_path: PathBuf },
	#[error("truncated data for glyph {glyph_index} in {}: {read_len}/{GLYPH_DATA_LEN} characters", .file_path.display())]
	#[from(ignore)]
	TruncatedGlyph {
		file_path: PathBuf,
		glyph_index: usize,
		read_len: usize,
	},
	#[error("invalid pixel `{token}` at {x},{y} of glyph {glyph_index} in {}", .file_path.display())]
	#[from(ignore)]
	InvalidPixelToken {
		file_path: PathBuf,
		glyph_index: usize,
		x: u32,
		y: u32,
		token: String,
	},
}

impl LoadError {
	fn invalid_signature<P: AsRef<Path>>(file_path: P) -> Self {
		Self::InvalidSignature {
			file_path: file_path.as_ref().to_path_buf(),
		}
	}

	pub fn because_file_is_missing(&self) -> bool {
		matches!(self, Self::FileError(error) if error.because_file_is_missing())
	}
}

struct InvalidToken {
	x: u32,
	y: u32,
	token: String,
}

fn read_glyph_data(first_line: String, lines: &mut LinesWithPath, glyph_index: usize) -> Result<String, LoadError> {
	let mut data = first_line;
	while data.len() < GLYPH_DATA_LEN {
		match lines.next().transpose()? {
			Some(line) => data.push_str(&line),
			None => {
				return Err(LoadError::TruncatedGlyph {
					file_path: lines.path().to_path_buf(),
					glyph_index,
					read_len: data.len(),
				})
			},
		}
	}
	Ok(data)
}

fn decode_glyph(data: &[u8]) -> Result<GlyphBitmap, InvalidToken> {
	let mut bitmap = ImageBuffer::new(GLYPH_WIDTH, GLYPH_HEIGHT);
	for y in 0..GLYPH_HEIGHT {
		for x in 0..GLYPH_WIDTH {
			let offset = (y * GLYPH_WIDTH + x) as usize * Pixel::TOKEN_LEN;
			let token = &data[offset..offset + Pixel::TOKEN_LEN];
			let pixel = Pixel::from_token(token).ok_or_else(|| InvalidToken {
				x,
				y,
				token: String::from_utf8_lossy(token).into_owned(),
			})?;
			bitmap.put_pixel(x, y, pixel.rgba());
		}
	}
	Ok(bitmap)
}

fn skip_padding(lines: &mut LinesWithPath) -> Result<(), FileError> {
	for _ in 0..PADDING_LINE_COUNT {
		if lines.next().transpose()?.is_none() {
			break;
		}
	}
	Ok(())
}

/// Decodes the whole charset of a `.mcm` file
pub fn load<P: AsRef<Path>>(path: P) -> Result<Charset, LoadError> {
	let mut lines = file::open(&path)?.lines();

	match lines.next().transpose()? {
		Some(line) if line == SIGNATURE => {},
		_ => return Err(LoadError::invalid_signature(&path)),
	}

	let mut charset = Charset::new();
	while let Some(first_line) = lines.next().transpose()? {
		let glyph_index = charset.len();
		let data = read_glyph_data(first_line, &mut lines, glyph_index)?;
		let bitmap = decode_glyph(data.as_bytes()).map_err(|InvalidToken { x, y, token }| LoadError::InvalidPixelToken {
			file_path: path.as_ref().to_path_buf(),
			glyph_index,
			x,
			y,
			token,
		})?;
		charset.push(bitmap);
		skip_padding(&mut lines)?;
	}

	log::debug!("loaded {} glyphs from {}", charset.len(), path.as_ref().display());
	Ok(charset)
}

/// Font backed by a `.mcm` file, decoded on the first glyph lookup
#[derive(Debug, Getters)]
pub struct McmFont {
	#[getset(get = "pub")]
	path: PathBuf,
	charset: OnceCell<Charset>,
}

impl McmFont {
	pub fn new<P: AsRef<Path>>(path: P) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			charset: OnceCell::new(),
		}
	}
}

impl Font for McmFont {
	fn charset(&self) -> Result<&Charset, LoadError> {
		self.charset.get_or_try_init(|| load(&self.path))
	}
}
