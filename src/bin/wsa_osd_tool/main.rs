#![forbid(unsafe_code)]

use std::{io::Write, path::Path, process::exit};

use clap::Parser;
use env_logger::fmt::Color;

use wsa_osd_tool::{cli::font_options::FONT_FILE_ENV_VAR_NAME, prelude::*};

mod cli;

use cli::*;

fn display_osd_file_info_command<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
	let file_osd = osd::file::parse(path)?;
	let frames = file_osd.frames();

	println!();
	println!("FC firmware: {}", file_osd.fc());
	println!("Number of OSD frames: {}", frames.len());
	if let (Some(first_frame), Some(last_frame)) = (frames.first(), frames.last()) {
		println!("First frame timestamp: {} ms", first_frame.time_millis());
		println!("Last frame timestamp: {} ms", last_frame.time_millis());
	}
	match file_osd.frame_interval() {
		Some(frame_interval) if !frame_interval.is_zero() => {
			let refresh_freq = 1.0 / frame_interval.as_secs_f64();
			println!(
				"Estimated frame interval: {} ms ({refresh_freq:.1}Hz)",
				frame_interval.as_millis()
			);
		},
		Some(frame_interval) => println!("Estimated frame interval: {} ms", frame_interval.as_millis()),
		None => println!("Estimated frame interval: unknown"),
	}
	println!("Estimated duration: {:.3}s", file_osd.duration().as_secs_f64());
	match file_osd.max_used_glyph_index() {
		Some(max_index) => println!("Highest glyph code used: {max_index} ({max_index:#06x})"),
		None => println!("Highest glyph code used: none, all frames are blank"),
	}
	Ok(())
}

fn dump_osd_frame_command(command: &Commands) -> anyhow::Result<()> {
	if let Commands::DumpOSDFrame {
		at,
		osd_file,
		frame_index,
	} = command
	{
		let file_osd = osd::file::parse(osd_file)?;
		let frame = file_osd.frame(*frame_index)?;
		println!("Frame {frame_index} at {} ms", frame.time_millis());
		match at {
			Some(position) => match frame.glyph_at(*position) {
				Some(glyph) => println!("{position}: {} ({:#06x})", glyph.index(), glyph.index()),
				None => println!("{position}: blank"),
			},
			None => {
				for glyph in frame.iter() {
					println!("{}: {} ({:#06x})", glyph.position(), glyph.index(), glyph.index());
				}
			},
		}
	}
	Ok(())
}

fn display_font_info_command(font_options: &FontOptions) -> anyhow::Result<()> {
	let font = McmFont::new(font_options.font_file());
	let charset = font.charset()?;
	println!();
	println!("Font file: {}", font.path().to_string_lossy());
	println!("Number of glyphs: {}", charset.len());
	if let Some(glyph) = charset.first() {
		let (width, height) = glyph.dimensions();
		println!("Glyph dimensions: {width}x{height} px");
	}
	Ok(())
}

fn export_font_glyphs_command(font_options: &FontOptions, output_dir: &Path) -> anyhow::Result<()> {
	let font = McmFont::new(font_options.font_file());
	let glyph_count = save_glyphs_to_dir(&font, output_dir)?;
	log::info!("glyph export completed: {glyph_count} glyphs");
	Ok(())
}

fn font_file_is_missing(error: &anyhow::Error) -> bool {
	let load_error = match (error.downcast_ref::<FontLoadError>(), error.downcast_ref::<SaveGlyphsToDirError>()) {
		(Some(load_error), _) | (_, Some(SaveGlyphsToDirError::LoadError(load_error))) => load_error,
		_ => return false,
	};
	load_error.because_file_is_missing()
}

fn main() {
	let cli = Cli::parse();

	env_logger::builder()
		.format(|buf, record| {
			let level_style = buf.default_level_style(record.level());
			write!(buf, "{:<5}", level_style.value(record.level()))?;
			let mut style = buf.style();
			style.set_color(Color::White).set_bold(true);
			write!(buf, "{}", style.value(" > "))?;
			writeln!(buf, "{}", record.args())
		})
		.filter_level(cli.log_level().into())
		.parse_default_env()
		.init();

	let command_result = match &cli.command {
		Commands::DisplayOSDFileInfo { osd_file } => display_osd_file_info_command(osd_file),
		command @ Commands::DumpOSDFrame { .. } => dump_osd_frame_command(command),
		Commands::DisplayFontInfo { font_options } => display_font_info_command(font_options),
		Commands::ExportFontGlyphs {
			font_options,
			output_dir,
		} => export_font_glyphs_command(font_options, output_dir),
	};

	if let Err(error) = command_result {
		log::error!("{}", error);
		if font_file_is_missing(&error) {
			log::error!("use the --font-file option or the {FONT_FILE_ENV_VAR_NAME} environment variable to select the font file");
		}
		exit(1);
	}
}
