use std::ops::RangeInclusive;

use super::raster::{Color, Raster};

/// Uniformity verdict for a region of a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
	Black,
	White,
	/// Holds at least one cell of each color.
	Mixed,
}

impl From<Color> for Classification {
	fn from(color: Color) -> Classification {
		match color {
			Color::Black => Classification::Black,
			Color::White => Classification::White,
		}
	}
}

/// Counts the black and white cells in the inclusive window given by
/// `rows` and `cols` and classifies it.
///
/// A window of a single cell is never `Mixed`.
pub fn classify(raster: &Raster, rows: RangeInclusive<u32>, cols: RangeInclusive<u32>) -> Classification {
	let (mut black, mut white) = (0usize, 0usize);
	for y in rows {
		for x in cols.clone() {
			match raster.get(x, y) {
				Color::Black => black += 1,
				Color::White => white += 1,
			}
		}
	}
	if white == 0 {
		Classification::Black
	} else if black == 0 {
		Classification::White
	} else {
		Classification::Mixed
	}
}
