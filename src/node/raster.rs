use bitvec::prelude::*;

use std::ops::RangeInclusive;

use super::error::RasterError;

/// Bit storage for a `Raster`; a set bit is a black cell.
pub type RasterBits = BitVec<u8, Msb0>;

/// Value of a single raster cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
	Black,
	White,
}

impl Color {
	fn from_bit(bit: bool) -> Color {
		if bit { Color::Black } else { Color::White }
	}
}

/// Square grid of black and white cells, addressed by `(x, y)`.
///
/// The side length is always a non-zero power of two. Cells are stored
/// column by column, so `(x, y)` lives at bit `x * side + y`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
	side: u32,
	bits: RasterBits,
}

impl Raster {
	/// Creates an all-white raster.
	pub fn new(side: u32) -> Result<Raster, RasterError> {
		if !side.is_power_of_two() {
			return Err(RasterError::NonPowerOfTwo(side));
		}
		let cells = side.checked_mul(side).ok_or(RasterError::TooLarge(side))? as usize;
		Ok(Raster {
			side,
			bits: RasterBits::repeat(false, cells),
		})
	}

	/// Creates a raster by asking `f` for the color of every `(x, y)`.
	pub fn from_fn<F: FnMut(u32, u32) -> Color>(side: u32, mut f: F) -> Result<Raster, RasterError> {
		let mut raster = Raster::new(side)?;
		for x in 0..side {
			for y in 0..side {
				raster.set(x, y, f(x, y));
			}
		}
		Ok(raster)
	}

	pub fn side(&self) -> u32 {
		self.side
	}

	fn index(&self, x: u32, y: u32) -> usize {
		debug_assert!(x < self.side && y < self.side, "({}, {}) outside raster of side {}", x, y, self.side);
		(x * self.side + y) as usize
	}

	/// Color of the cell at column `x`, row `y`.
	///
	/// Panics if the coordinate is outside the raster.
	pub fn get(&self, x: u32, y: u32) -> Color {
		Color::from_bit(self.bits[self.index(x, y)])
	}

	pub fn set(&mut self, x: u32, y: u32, color: Color) {
		let index = self.index(x, y);
		self.bits.set(index, color == Color::Black);
	}

	/// Number of black cells in the whole raster.
	pub fn count_black(&self) -> usize {
		self.bits.count_ones()
	}

	/// The single color of the raster, or `None` if it holds both.
	pub fn uniform_color(&self) -> Option<Color> {
		if self.bits.not_any() {
			Some(Color::White)
		} else if self.bits.all() {
			Some(Color::Black)
		} else {
			None
		}
	}

	/// Iterates over every cell as `((x, y), color)`, column by column.
	pub fn cells(&self) -> impl Iterator<Item = ((u32, u32), Color)> + '_ {
		let side = self.side;
		self.bits.iter().by_vals().enumerate().map(move |(i, bit)| {
			let i = i as u32;
			((i / side, i % side), Color::from_bit(bit))
		})
	}

	/// Copies the cells under `window` into a new raster, re-indexed so
	/// that the window's top-left cell becomes `(0, 0)`.
	///
	/// The window must be square with a power-of-two side and lie inside
	/// this raster.
	pub fn crop(&self, window: Window) -> Raster {
		debug_assert_eq!(window.width(), window.height());
		let side = window.width();
		let mut bits = RasterBits::with_capacity((side * side) as usize);
		for x in window.cols() {
			for y in window.rows() {
				bits.push(self.bits[self.index(x, y)]);
			}
		}
		Raster { side, bits }
	}

	/// Paints every cell under `window`.
	pub fn fill(&mut self, window: Window, color: Color) {
		for x in window.cols() {
			for y in window.rows() {
				self.set(x, y, color);
			}
		}
	}
}

/// Rectangular selection of a raster: inclusive row range `top..=bottom`
/// and inclusive column range `left..=right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
	pub top: u32,
	pub bottom: u32,
	pub left: u32,
	pub right: u32,
}

impl Window {
	/// The window covering a whole `side × side` grid.
	pub fn square(side: u32) -> Window {
		Window { top: 0, bottom: side - 1, left: 0, right: side - 1 }
	}

	pub fn rows(&self) -> RangeInclusive<u32> {
		self.top..=self.bottom
	}

	pub fn cols(&self) -> RangeInclusive<u32> {
		self.left..=self.right
	}

	pub fn width(&self) -> u32 {
		self.right - self.left + 1
	}

	pub fn height(&self) -> u32 {
		self.bottom - self.top + 1
	}

	pub fn contains(&self, x: u32, y: u32) -> bool {
		self.cols().contains(&x) && self.rows().contains(&y)
	}

	/// Splits the window at its midpoint on both axes, giving the
	/// NW, NE, SW and SE parts in that order.
	///
	/// Only meaningful for square windows of even side.
	pub fn quadrants(&self) -> [Window; 4] {
		let half = self.width() / 2;
		let (mid_row, mid_col) = (self.top + half - 1, self.left + half - 1);
		[
			Window { top: self.top, bottom: mid_row, left: self.left, right: mid_col },
			Window { top: self.top, bottom: mid_row, left: mid_col + 1, right: self.right },
			Window { top: mid_row + 1, bottom: self.bottom, left: self.left, right: mid_col },
			Window { top: mid_row + 1, bottom: self.bottom, left: mid_col + 1, right: self.right },
		]
	}
}
