use std::{
	io::Error as IOError,
	path::{Path, PathBuf},
};

use derive_more::From;
use image::ImageError;
use indicatif::{ParallelProgressIterator, ProgressStyle};
use rayon::prelude::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use thiserror::Error;

use super::{Font, GlyphBitmap, LoadError};

#[derive(Debug, Error)]
#[error("failed to write image file {}: {error}", .file_path.display())]
pub struct WriteError {
	file_path: PathBuf,
	error: ImageError,
}

impl WriteError {
	pub fn new<P: AsRef<Path>>(path: P, error: ImageError) -> Self {
		Self {
			file_path: path.as_ref().to_path_buf(),
			error,
		}
	}
}

pub trait WriteImageFile {
	fn write_image_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WriteError>;
}

impl WriteImageFile for GlyphBitmap {
	fn write_image_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WriteError> {
		self.save(&path).map_err(|error| WriteError::new(&path, error))
	}
}

#[derive(Debug, Error, From)]
pub enum SaveGlyphsToDirError {
	#[error(transparent)]
	LoadError(LoadError),
	#[error("failed to create directory {}: {error}", .dir_path.display())]
	#[from(ignore)]
	CreateDirError { dir_path: PathBuf, error: IOError },
	#[error(transparent)]
	WriteError(WriteError),
}

pub fn glyph_file_name(index: usize) -> String {
	format!("{index:03}.png")
}

pub fn make_glyph_file_path<P: AsRef<Path>>(dir_path: P, index: usize) -> PathBuf {
	dir_path.as_ref().join(glyph_file_name(index))
}

/// Writes every glyph of the font as a PNG file named after its index, returns the number of glyphs written
pub fn save_glyphs_to_dir<F, P>(font: &F, dir_path: P) -> Result<usize, SaveGlyphsToDirError>
where
	F: Font,
	P: AsRef<Path>,
{
	let charset = font.charset()?;
	let dir_path = dir_path.as_ref();
	std::fs::create_dir_all(dir_path).map_err(|error| SaveGlyphsToDirError::CreateDirError {
		dir_path: dir_path.to_path_buf(),
		error,
	})?;
	log::info!("saving {} glyphs into directory: {}", charset.len(), dir_path.display());

	let progress_style = ProgressStyle::with_template("{wide_bar} {pos:>4}/{len}").unwrap_or_else(|_| ProgressStyle::default_bar());
	charset
		.par_iter()
		.enumerate()
		.progress_with_style(progress_style)
		.try_for_each(|(index, glyph)| glyph.write_image_file(make_glyph_file_path(dir_path, index)))?;

	Ok(charset.len())
}
