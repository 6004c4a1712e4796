use image::Rgba;
use strum::{Display, EnumIter};

/// The four states a MAX7456 character pixel can take
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Pixel {
	Black,
	Transparent,
	White,
	/// white color channels with a zero alpha
	WhiteTransparent,
}

impl Pixel {
	pub const TOKEN_LEN: usize = 2;

	pub fn from_token(token: &[u8]) -> Option<Self> {
		use Pixel::*;
		match token {
			b"00" => Some(Black),
			b"01" => Some(Transparent),
			b"10" => Some(White),
			b"11" => Some(WhiteTransparent),
			_ => None,
		}
	}

	pub const fn rgba(&self) -> Rgba<u8> {
		use Pixel::*;
		match self {
			Black => Rgba([0, 0, 0, 255]),
			Transparent => Rgba([0, 0, 0, 0]),
			White => Rgba([255, 255, 255, 255]),
			WhiteTransparent => Rgba([255, 255, 255, 0]),
		}
	}
}

impl From<Pixel> for Rgba<u8> {
	fn from(pixel: Pixel) -> Self {
		pixel.rgba()
	}
}
