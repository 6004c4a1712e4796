use std::{
	fmt::Display,
	fs::File,
	io::{BufRead, BufReader, Error as IOError, ErrorKind, Lines, Read},
	path::{Path, PathBuf},
};

use getset::Getters;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	Open,
	Read,
}

impl Display for Action {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use Action::*;
		let action_str = match self {
			Open => "opening",
			Read => "reading",
		};
		f.write_str(action_str)
	}
}

#[derive(Debug, Error, Getters)]
#[getset(get = "pub")]
#[error("failed {action} {}: {error}", .path.display())]
pub struct Error {
	action: Action,
	path: PathBuf,
	error: IOError,
}

impl Error {
	pub fn new<P: AsRef<Path>>(action: Action, path: P, error: IOError) -> Self {
		Self {
			action,
			path: path.as_ref().to_path_buf(),
			error,
		}
	}

	pub fn because_file_is_missing(&self) -> bool {
		self.action == Action::Open && self.error.kind() == ErrorKind::NotFound
	}
}

/// Buffered file reader which remembers its path so that every I/O error can be reported with it
#[derive(Debug, Getters)]
pub struct FileWithPath {
	#[getset(get = "pub")]
	path: PathBuf,
	reader: BufReader<File>,
}

impl FileWithPath {
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
		let file = File::open(&path).map_err(|error| Error::new(Action::Open, &path, error))?;
		Ok(Self {
			path: path.as_ref().to_path_buf(),
			reader: BufReader::new(file),
		})
	}

	/// Fills `buf` as much as possible, stopping early only at the end of the file.
	/// Returns the number of bytes actually read.
	pub fn read_full(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
		let mut filled = 0;
		while filled < buf.len() {
			match self.reader.read(&mut buf[filled..]) {
				Ok(0) => break,
				Ok(read) => filled += read,
				Err(error) if error.kind() == ErrorKind::Interrupted => continue,
				Err(error) => return Err(Error::new(Action::Read, &self.path, error)),
			}
		}
		Ok(filled)
	}

	pub fn lines(self) -> LinesWithPath {
		LinesWithPath {
			path: self.path,
			lines: self.reader.lines(),
		}
	}
}

pub struct LinesWithPath {
	path: PathBuf,
	lines: Lines<BufReader<File>>,
}

impl LinesWithPath {
	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl Iterator for LinesWithPath {
	type Item = Result<String, Error>;

	fn next(&mut self) -> Option<Self::Item> {
		self.lines
			.next()
			.map(|line| line.map_err(|error| Error::new(Action::Read, &self.path, error)))
	}
}

pub fn open<P: AsRef<Path>>(path: P) -> Result<FileWithPath, Error> {
	FileWithPath::open(path)
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use tempfile::NamedTempFile;

	use super::*;

	#[test]
	fn open_missing_file_reports_action_and_path() {
		let error = open("/nonexistent/dir/capture.osd").unwrap_err();
		assert_eq!(*error.action(), Action::Open);
		assert!(error.because_file_is_missing());
		assert!(error.to_string().starts_with("failed opening /nonexistent/dir/capture.osd"));
	}

	#[test]
	fn read_full_stops_at_end_of_file() {
		let mut temp_file = NamedTempFile::new().unwrap();
		temp_file.write_all(&[1, 2, 3, 4, 5]).unwrap();
		let mut file = open(temp_file.path()).unwrap();
		let mut buf = [0; 4];
		assert_eq!(file.read_full(&mut buf).unwrap(), 4);
		assert_eq!(buf, [1, 2, 3, 4]);
		assert_eq!(file.read_full(&mut buf).unwrap(), 1);
		assert_eq!(file.read_full(&mut buf).unwrap(), 0);
	}

	#[test]
	fn lines_strip_line_endings() {
		let mut temp_file = NamedTempFile::new().unwrap();
		temp_file.write_all(b"MAX7456\r\n01010101\n").unwrap();
		let lines = open(temp_file.path())
			.unwrap()
			.lines()
			.collect::<Result<Vec<_>, _>>()
			.unwrap();
		assert_eq!(lines, vec!["MAX7456".to_owned(), "01010101".to_owned()]);
	}
}
