use clap::ValueEnum;
use log::LevelFilter;
use strum::Display;

#[derive(Copy, Clone, Display, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
	Off,
	Error,
	Warn,
	Info,
	Debug,
	Trace,
}

impl From<LogLevel> for LevelFilter {
	fn from(log_level: LogLevel) -> Self {
		use LogLevel::*;
		match log_level {
			Off => LevelFilter::Off,
			Error => LevelFilter::Error,
			Warn => LevelFilter::Warn,
			Info => LevelFilter::Info,
			Debug => LevelFilter::Debug,
			Trace => LevelFilter::Trace,
		}
	}
}
