//! Reading the text description of a black and white image.
//!
//! The format is line oriented: the image width, then the number of black
//! pixels, then one `x y` pair per black pixel. Numbers are runs of ASCII
//! digits; anything else on a line separates them.

use std::path::Path;

use tracing::debug;

use crate::error::InputError;
use crate::{Color, Raster};

pub const MIN_WIDTH: u32 = 1;
pub const MAX_WIDTH: u32 = 64;

/// Every run of digits in `line`. Runs too long for a `u64` saturate.
fn numbers(line: &str) -> Vec<u64> {
	line.split(|c: char| !c.is_ascii_digit())
		.filter(|run| !run.is_empty())
		.map(|run| run.parse().unwrap_or(u64::MAX))
		.collect()
}

/// Parses and validates an image description into a raster holding at
/// least one black and one white cell.
pub fn parse(source: &str) -> Result<Raster, InputError> {
	let source = source.strip_suffix('\n').unwrap_or(source);
	if source.trim().is_empty() {
		return Err(InputError::Empty);
	}
	let mut lines = source.split('\n');

	let width = lines.next()
		.and_then(|l| numbers(l).first().copied())
		.ok_or(InputError::MissingWidth)?;
	if !width.is_power_of_two() {
		return Err(InputError::NotPowerOfTwo(width));
	}
	if width < MIN_WIDTH as u64 {
		return Err(InputError::TooSmall { width, min: MIN_WIDTH });
	}
	if width > MAX_WIDTH as u64 {
		return Err(InputError::TooLarge { width, max: MAX_WIDTH });
	}
	let width = width as u32;

	let declared = lines.next()
		.and_then(|l| numbers(l).first().copied())
		.ok_or(InputError::MissingCount)?;
	let total = width as u64 * width as u64;
	if declared > total {
		return Err(InputError::TooManyBlack { count: declared, total });
	}
	if declared == total {
		return Err(InputError::AllBlack);
	}
	if declared == 0 {
		return Err(InputError::AllWhite);
	}

	let mut raster = Raster::new(width)?;
	let mut counted = 0;
	// Lines are numbered from 1 and the first two are already consumed.
	for (line, text) in (3..).zip(lines) {
		if text.trim().is_empty() {
			continue;
		}
		let (x, y) = match numbers(text)[..] {
			[x, y] => (x, y),
			_ => return Err(InputError::MalformedLine { line }),
		};
		if x >= width as u64 || y >= width as u64 {
			return Err(InputError::OutOfBounds { x, y, width });
		}
		raster.set(x as u32, y as u32, Color::Black);
		counted += 1;
	}
	if counted != declared {
		return Err(InputError::CountMismatch { declared, counted });
	}
	debug!(width, black = raster.count_black(), "read image description");
	Ok(raster)
}

/// Reads and parses the image description stored at `path`.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Raster, InputError> {
	let source = std::fs::read_to_string(path)?;
	parse(&source)
}
