use std::path::PathBuf;

use clap::{Parser, Subcommand};
use getset::CopyGetters;
use wsa_osd_tool::prelude::*;

/// wsa_osd_tool is a command line tool to inspect OSD files recorded by Walksnail Avatar FPV systems
/// and the MAX7456 fonts used to render them
///
/// Each command is aliased to the concatenation of the first letter of each word of the command{n}
/// Example: the `export-font-glyphs` command is aliased to `efg`
#[derive(Parser, CopyGetters)]
#[clap(version, about, long_about)]
pub struct Cli {
	#[clap(short, long, value_parser, default_value_t = LogLevel::Info)]
	#[arg(value_enum)]
	#[getset(get_copy = "pub")]
	log_level: LogLevel,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Display information about the specified OSD file
	#[clap(alias = "dofi")]
	DisplayOSDFileInfo { osd_file: PathBuf },

	/// Display the glyphs of one frame of the specified OSD file
	///
	/// Frames are numbered from 0 in file order. Each non blank glyph is printed with its
	/// character code and its position on the 53x20 grid.
	#[clap(alias = "dof")]
	DumpOSDFrame {
		/// only display the glyph at this grid position, format: <x>,<y>
		#[clap(long, value_parser, value_name = "x,y")]
		at: Option<Position>,

		osd_file: PathBuf,

		frame_index: usize,
	},

	/// Display information about a MAX7456 font file
	///
	/// The font file is taken from the --font-file option or
	/// from the environment variable OSD_FONT_FILE or
	/// if neither of these are available it falls back to `font.mcm` inside the current directory.
	#[clap(alias = "dfi")]
	DisplayFontInfo {
		#[clap(flatten)]
		font_options: FontOptions,
	},

	/// Export every glyph of a MAX7456 font file as PNG files
	///
	/// Glyph images are named after the character code they represent (e.g. `065.png`)
	/// and are written into the output directory which is created if needed.
	#[clap(alias = "efg")]
	ExportFontGlyphs {
		#[clap(flatten)]
		font_options: FontOptions,

		/// directory in which the glyph images will be written
		output_dir: PathBuf,
	},
}
