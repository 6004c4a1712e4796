use std::time::Duration;

use thiserror::Error;

use super::Frame;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EstimateDurationError {
	#[error("cannot estimate duration: no frames")]
	NoFrames,
	#[error("cannot estimate frame interval from a single frame")]
	SingleFrame,
}

/// Average interval between two frames, truncated to whole milliseconds
pub fn frame_interval(frames: &[Frame]) -> Result<Duration, EstimateDurationError> {
	let (first, last) = match frames {
		[] => return Err(EstimateDurationError::NoFrames),
		[_] => return Err(EstimateDurationError::SingleFrame),
		[first, .., last] => (first, last),
	};
	let span_millis = last.time_millis().wrapping_sub(first.time_millis());
	let interval_millis = span_millis as f32 / (frames.len() - 1) as f32;
	Ok(Duration::from_millis(interval_millis as u64))
}

/// Estimated duration of the overlay: the last frame timestamp plus one average frame interval
pub fn estimate(frames: &[Frame]) -> Result<Duration, EstimateDurationError> {
	let last = frames.last().ok_or(EstimateDurationError::NoFrames)?;
	Ok(last.timestamp() + frame_interval(frames)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn frames(timestamps: &[u32]) -> Vec<Frame> {
		timestamps.iter().map(|&time_millis| Frame::new(time_millis, vec![])).collect()
	}

	#[test]
	fn no_frames() {
		assert_eq!(estimate(&[]), Err(EstimateDurationError::NoFrames));
		assert_eq!(frame_interval(&[]), Err(EstimateDurationError::NoFrames));
	}

	#[test]
	fn single_frame() {
		assert_eq!(estimate(&frames(&[1000])), Err(EstimateDurationError::SingleFrame));
	}

	#[test]
	fn adds_one_interval_to_last_timestamp() {
		let frames = frames(&[100, 200, 300, 400]);
		assert_eq!(frame_interval(&frames), Ok(Duration::from_millis(100)));
		assert_eq!(estimate(&frames), Ok(Duration::from_millis(500)));
	}

	#[test]
	fn interval_is_truncated_to_milliseconds() {
		// (1000 - 0) / 3 = 333.33ms
		let frames = frames(&[0, 10, 990, 1000]);
		assert_eq!(frame_interval(&frames), Ok(Duration::from_millis(333)));
		assert_eq!(estimate(&frames), Ok(Duration::from_millis(1333)));
	}

	#[test]
	fn interval_ignores_irregular_spacing_in_between() {
		let frames = frames(&[500, 2500, 2600]);
		assert_eq!(estimate(&frames), Ok(Duration::from_millis(3650)));
	}
}
