use std::{
	borrow::Cow,
	path::{Path, PathBuf},
	time::Duration,
};

use byte_struct::*;
use derive_more::From;
use getset::{CopyGetters, Getters};
use thiserror::Error;

use crate::file::{self, Error as FileError, FileWithPath};

use super::{
	duration::{self, EstimateDurationError},
	Frame, GlyphIndex, DIMENSIONS,
};

#[derive(Debug, Error, From)]
pub enum OpenError {
	#[error(transparent)]
	FileError(FileError),
	#[error("invalid OSD file header in {}: expected {expected} bytes, got {actual}", .file_path.display())]
	#[from(ignore)]
	InvalidHeader {
		file_path: PathBuf,
		expected: usize,
		actual: usize,
	},
}

impl OpenError {
	fn invalid_header<P: AsRef<Path>>(file_path: P, actual: usize) -> Self {
		Self::InvalidHeader {
			file_path: file_path.as_ref().to_path_buf(),
			expected: FileHeaderRaw::BYTE_LEN,
			actual,
		}
	}
}

#[derive(Debug, Error, From)]
pub enum ParseError {
	#[error(transparent)]
	OpenError(OpenError),
	#[error(transparent)]
	ReadError(FileError),
	#[error("OSD file {} does not contain any frame", .file_path.display())]
	#[from(ignore)]
	NoFrames { file_path: PathBuf },
}

#[derive(Debug, Error)]
#[error("OSD frame {index} not found, file has {count} frames")]
pub struct FrameNotFound {
	pub index: usize,
	pub count: usize,
}

#[derive(ByteStruct, Debug)]
#[byte_struct_le]
pub struct FileHeaderRaw {
	fc_id: [u8; 4],
	unused: [u8; 36],
}

impl FileHeaderRaw {
	pub fn fc_id(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.fc_id)
	}
}

#[derive(Debug, Clone, Getters)]
pub struct FileHeader {
	/// flight controller firmware identifier, e.g. `BTFL` or `INAV`
	#[getset(get = "pub")]
	fc_id: String,
}

impl From<FileHeaderRaw> for FileHeader {
	fn from(fhr: FileHeaderRaw) -> Self {
		Self {
			fc_id: fhr.fc_id().to_string(),
		}
	}
}

#[derive(ByteStruct, Debug)]
#[byte_struct_le]
pub struct FrameRaw {
	time_millis: u32,
	glyph_indices: [[GlyphIndex; DIMENSIONS.width as usize]; DIMENSIONS.height as usize],
}

impl FrameRaw {
	fn into_frame(self) -> Frame {
		Frame::from_glyph_indices(self.time_millis, self.glyph_indices.into_iter().flatten())
	}
}

pub struct Reader {
	file: FileWithPath,
	header: FileHeader,
}

impl Reader {
	fn read_header(file: &mut FileWithPath) -> Result<FileHeaderRaw, OpenError> {
		let mut header_bytes = [0; FileHeaderRaw::BYTE_LEN];
		match file.read_full(&mut header_bytes)? {
			FileHeaderRaw::BYTE_LEN => Ok(FileHeaderRaw::read_bytes(&header_bytes)),
			actual => Err(OpenError::invalid_header(file.path(), actual)),
		}
	}

	pub fn open<P: AsRef<Path>>(file_path: P) -> Result<Self, OpenError> {
		let mut file = file::open(&file_path)?;
		let header: FileHeader = Self::read_header(&mut file)?.into();
		log::debug!("opened OSD file {}, FC: {}", file_path.as_ref().display(), header.fc_id());
		Ok(Self { file, header })
	}

	pub fn header(&self) -> &FileHeader {
		&self.header
	}

	pub fn path(&self) -> &Path {
		self.file.path()
	}

	/// Reads the next frame record, `None` at the end of the file.
	/// An incomplete trailing record is dropped.
	pub fn read_frame(&mut self) -> Result<Option<Frame>, FileError> {
		let mut frame_raw_bytes = [0; FrameRaw::BYTE_LEN];
		match self.file.read_full(&mut frame_raw_bytes)? {
			0 => Ok(None),
			FrameRaw::BYTE_LEN => Ok(Some(FrameRaw::read_bytes(&frame_raw_bytes).into_frame())),
			read => {
				log::debug!(
					"dropping incomplete trailing frame record in {}: {read}/{} bytes",
					self.path().display(),
					FrameRaw::BYTE_LEN
				);
				Ok(None)
			},
		}
	}

	pub fn iter(&mut self) -> Iter<'_> {
		self.into_iter()
	}

	pub fn into_file_osd(mut self) -> Result<FileOsd, ParseError> {
		let frames = self.iter().collect::<Result<Vec<_>, _>>()?;
		let (duration, frame_interval) = match (duration::estimate(&frames), duration::frame_interval(&frames)) {
			(Ok(duration), Ok(frame_interval)) => (duration, Some(frame_interval)),
			(Err(EstimateDurationError::SingleFrame), _) => {
				log::warn!(
					"{} contains a single frame, cannot estimate the frame interval",
					self.path().display()
				);
				(frames[0].timestamp(), None)
			},
			_ => {
				return Err(ParseError::NoFrames {
					file_path: self.path().to_path_buf(),
				})
			},
		};
		log::info!(
			"parsed {} OSD frames from {}, estimated duration {:.3}s",
			frames.len(),
			self.path().display(),
			duration.as_secs_f64()
		);
		Ok(FileOsd {
			fc: self.header.fc_id,
			duration,
			frame_interval,
			frames,
		})
	}
}

pub struct IntoIter {
	reader: Reader,
}

impl Iterator for IntoIter {
	type Item = Result<Frame, FileError>;

	fn next(&mut self) -> Option<Self::Item> {
		self.reader.read_frame().transpose()
	}
}

impl IntoIterator for Reader {
	type Item = Result<Frame, FileError>;

	type IntoIter = IntoIter;

	fn into_iter(self) -> Self::IntoIter {
		Self::IntoIter { reader: self }
	}
}

pub struct Iter<'a> {
	reader: &'a mut Reader,
}

impl Iterator for Iter<'_> {
	type Item = Result<Frame, FileError>;

	fn next(&mut self) -> Option<Self::Item> {
		self.reader.read_frame().transpose()
	}
}

impl<'a> IntoIterator for &'a mut Reader {
	type Item = Result<Frame, FileError>;

	type IntoIter = Iter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		Self::IntoIter { reader: self }
	}
}

/// Whole decoded OSD recording
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct FileOsd {
	#[getset(get = "pub")]
	fc: String,
	#[getset(get_copy = "pub")]
	duration: Duration,
	/// `None` when the recording holds a single frame
	#[getset(get_copy = "pub")]
	frame_interval: Option<Duration>,
	#[getset(get = "pub")]
	frames: Vec<Frame>,
}

impl FileOsd {
	pub fn frame(&self, index: usize) -> Result<&Frame, FrameNotFound> {
		self.frames.get(index).ok_or(FrameNotFound {
			index,
			count: self.frames.len(),
		})
	}

	pub fn max_used_glyph_index(&self) -> Option<GlyphIndex> {
		self.frames
			.iter()
			.flat_map(|frame| frame.glyphs().iter().map(|glyph| glyph.index()))
			.max()
	}
}

pub fn open<P: AsRef<Path>>(path: P) -> Result<Reader, OpenError> {
	Reader::open(path)
}

pub fn parse<P: AsRef<Path>>(path: P) -> Result<FileOsd, ParseError> {
	Reader::open(path)?.into_file_osd()
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use tempfile::NamedTempFile;

	use super::*;
	use crate::osd::{Glyph, Position, GLYPH_SLOT_COUNT};

	fn header(fc_id: &[u8; 4]) -> Vec<u8> {
		let mut bytes = fc_id.to_vec();
		bytes.extend_from_slice(&[0; 36]);
		bytes
	}

	fn frame_record(time_millis: u32, glyph_indices: &[(usize, GlyphIndex)]) -> Vec<u8> {
		let mut slots = vec![0u16; GLYPH_SLOT_COUNT];
		for &(slot_index, glyph_index) in glyph_indices {
			slots[slot_index] = glyph_index;
		}
		let mut bytes = time_millis.to_le_bytes().to_vec();
		bytes.extend(slots.iter().flat_map(|slot| slot.to_le_bytes()));
		bytes
	}

	fn osd_file(bytes: &[u8]) -> NamedTempFile {
		let mut temp_file = NamedTempFile::new().unwrap();
		temp_file.write_all(bytes).unwrap();
		temp_file.flush().unwrap();
		temp_file
	}

	#[test]
	fn record_sizes() {
		assert_eq!(FileHeaderRaw::BYTE_LEN, 40);
		assert_eq!(FrameRaw::BYTE_LEN, 2124);
	}

	#[test]
	fn single_frame_with_one_glyph() {
		let mut bytes = header(b"BTFL");
		let mut record = vec![0xe8, 0x03, 0x00, 0x00, 0x41, 0x00];
		record.resize(FrameRaw::BYTE_LEN, 0);
		bytes.extend(record);
		let file = osd_file(&bytes);

		let file_osd = parse(file.path()).unwrap();
		assert_eq!(file_osd.fc(), "BTFL");
		assert_eq!(file_osd.frames().len(), 1);
		let frame = file_osd.frame(0).unwrap();
		assert_eq!(frame.time_millis(), 1000);
		assert_eq!(frame.glyphs(), &vec![Glyph::new(0x0041, Position::new(1, 0))]);
		assert_eq!(file_osd.frame_interval(), None);
		assert_eq!(file_osd.duration(), Duration::from_millis(1000));
	}

	#[test]
	fn frame_count_ignores_incomplete_trailing_record() {
		let mut bytes = header(b"INAV");
		for time_millis in [0, 100, 200] {
			bytes.extend(frame_record(time_millis, &[(10, 0x30)]));
		}
		bytes.extend(&frame_record(300, &[])[..1000]);
		let file = osd_file(&bytes);

		let file_osd = parse(file.path()).unwrap();
		assert_eq!(file_osd.frames().len(), (bytes.len() - 40) / 2124);
		assert_eq!(file_osd.frames().len(), 3);
		assert_eq!(file_osd.frame_interval(), Some(Duration::from_millis(100)));
		assert_eq!(file_osd.duration(), Duration::from_millis(300));
	}

	#[test]
	fn glyphs_are_never_blank_and_stay_on_grid() {
		let mut bytes = header(b"ARDU");
		let slots: Vec<_> = (0..GLYPH_SLOT_COUNT)
			.map(|slot_index| (slot_index, [0x00, 0x20, 0x41, 0x7f][slot_index % 4]))
			.collect();
		bytes.extend(frame_record(0, &slots));
		bytes.extend(frame_record(33, &slots));
		let file = osd_file(&bytes);

		let file_osd = parse(file.path()).unwrap();
		for frame in file_osd.frames() {
			assert!(!frame.is_empty());
			for glyph in frame.iter() {
				assert!(glyph.index() != 0x0000 && glyph.index() != 0x0020);
				assert!(glyph.position().x() < 53);
				assert!(glyph.position().y() < 20);
			}
		}
		assert_eq!(file_osd.max_used_glyph_index(), Some(0x7f));
	}

	#[test]
	fn frames_keep_file_order() {
		let mut bytes = header(b"BTFL");
		for time_millis in [300, 100, 200] {
			bytes.extend(frame_record(time_millis, &[]));
		}
		let file = osd_file(&bytes);

		let file_osd = parse(file.path()).unwrap();
		let timestamps: Vec<_> = file_osd.frames().iter().map(Frame::time_millis).collect();
		assert_eq!(timestamps, vec![300, 100, 200]);
	}

	#[test]
	fn short_header() {
		let file = osd_file(b"BTFL\x00\x00");
		assert!(matches!(
			parse(file.path()),
			Err(ParseError::OpenError(OpenError::InvalidHeader { actual: 6, .. }))
		));
	}

	#[test]
	fn header_only_has_no_frames() {
		let file = osd_file(&header(b"BTFL"));
		assert!(matches!(parse(file.path()), Err(ParseError::NoFrames { .. })));
	}

	#[test]
	fn missing_file() {
		assert!(matches!(
			parse("/nonexistent/capture.osd"),
			Err(ParseError::OpenError(OpenError::FileError(_)))
		));
	}

	#[test]
	fn frame_out_of_range() {
		let mut bytes = header(b"BTFL");
		bytes.extend(frame_record(0, &[]));
		let file = osd_file(&bytes);

		let file_osd = parse(file.path()).unwrap();
		let error = file_osd.frame(1).unwrap_err();
		assert_eq!((error.index, error.count), (1, 1));
	}

	#[test]
	fn streaming_reader() {
		let mut bytes = header(b"BTFL");
		bytes.extend(frame_record(5, &[(0, 0x100)]));
		bytes.extend(frame_record(10, &[]));
		let file = osd_file(&bytes);

		let mut reader = open(file.path()).unwrap();
		assert_eq!(reader.header().fc_id(), "BTFL");
		let first = reader.read_frame().unwrap().unwrap();
		assert_eq!(first.glyphs(), &vec![Glyph::new(0x100, Position::new(1, 0))]);
		let rest = reader.into_iter().collect::<Result<Vec<_>, _>>().unwrap();
		assert_eq!(rest.len(), 1);
		assert_eq!(rest[0].time_millis(), 10);
	}
}
