use std::{fmt::Display, str::FromStr};

use derive_more::From;
use getset::CopyGetters;
use thiserror::Error;

use super::DIMENSIONS;

pub type Coordinate = u32;

#[derive(Debug, Error)]
#[error("invalid grid position format: {0}")]
pub struct FormatError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, CopyGetters, From)]
#[getset(get_copy = "pub")]
pub struct Position {
	pub x: Coordinate,
	pub y: Coordinate,
}

impl Position {
	pub fn new(x: Coordinate, y: Coordinate) -> Self {
		Self { x, y }
	}

	/// Position of the glyph stored in the 1-based `slot` of a frame payload
	pub fn from_slot(slot: usize) -> Self {
		let width = DIMENSIONS.width as usize;
		Self::new((slot % width) as Coordinate, (slot / width) as Coordinate)
	}

	pub fn is_on_grid(&self) -> bool {
		self.x < DIMENSIONS.width && self.y < DIMENSIONS.height
	}
}

impl Display for Position {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{},{}", self.x, self.y)
	}
}

impl FromStr for Position {
	type Err = FormatError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let format_error = || FormatError(s.to_owned());
		let (x, y) = s.split_once(',').ok_or_else(format_error)?;
		let x = x.trim().parse().map_err(|_| format_error())?;
		let y = y.trim().parse().map_err(|_| format_error())?;
		let position = Self::new(x, y);
		if !position.is_on_grid() {
			return Err(format_error());
		}
		Ok(position)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn slots_are_one_based() {
		assert_eq!(Position::from_slot(1), Position::new(1, 0));
		assert_eq!(Position::from_slot(52), Position::new(52, 0));
		assert_eq!(Position::from_slot(53), Position::new(0, 1));
		assert_eq!(Position::from_slot(1059), Position::new(52, 19));
	}

	#[test]
	fn last_slot_falls_off_the_grid() {
		let position = Position::from_slot(1060);
		assert_eq!(position, Position::new(0, 20));
		assert!(!position.is_on_grid());
	}

	#[test]
	fn parse_position() {
		assert_eq!("3,7".parse::<Position>().unwrap(), Position::new(3, 7));
		assert_eq!(" 52 , 19 ".parse::<Position>().unwrap(), Position::new(52, 19));
		assert!("53,0".parse::<Position>().is_err());
		assert!("1;2".parse::<Position>().is_err());
		assert!("a,2".parse::<Position>().is_err());
	}
}
