use std::path::PathBuf;

use clap::Args;

const DEFAULT_FONT_FILE: &str = "font.mcm";
pub const FONT_FILE_ENV_VAR_NAME: &str = "OSD_FONT_FILE";

#[derive(Args)]
pub struct FontOptions {
	/// path to the MAX7456 .mcm font file
	#[clap(short, long, value_parser, value_name = "filepath")]
	font_file: Option<PathBuf>,
}

impl FontOptions {
	pub fn new(font_file: Option<PathBuf>) -> Self {
		Self { font_file }
	}

	/// Font file from the command line, then from the environment, then `font.mcm` in the current directory
	pub fn font_file(&self) -> PathBuf {
		self.font_file.clone().unwrap_or_else(|| {
			PathBuf::from(std::env::var(FONT_FILE_ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_FONT_FILE.to_owned()))
		})
	}
}
