pub mod classify;
pub mod error;
pub mod raster;

use std::fmt;

use tracing::{debug, debug_span, trace};

pub use classify::{classify, Classification};
pub use raster::{Color, Raster, Window};

use error::{BuildError, ExpandError};

/// One of the four equal parts a square region splits into.
///
/// Rows grow downwards, so the north quadrants hold the lower row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
	NorthWest,
	NorthEast,
	SouthWest,
	SouthEast,
}

impl Quadrant {
	/// Every quadrant, in the order regions are visited.
	pub const ALL: [Quadrant; 4] = [
		Quadrant::NorthWest,
		Quadrant::NorthEast,
		Quadrant::SouthWest,
		Quadrant::SouthEast,
	];

	/// The part of a `width × width` grid this quadrant covers.
	pub fn window(self, width: u32) -> Window {
		Window::square(width).quadrants()[self as usize]
	}

	/// Anchor of this quadrant of a region anchored at `parent` whose
	/// quadrants are `half` cells wide.
	///
	/// The north quadrants move the anchor up by `half` rows, the south
	/// ones keep the parent's row; anchors always sit on a region's
	/// bottom row.
	pub fn anchor(self, parent: (i32, i32), half: u32) -> (i32, i32) {
		let half = half as i32;
		match self {
			Quadrant::NorthWest => (parent.0, parent.1 - half),
			Quadrant::NorthEast => (parent.0 + half, parent.1 - half),
			Quadrant::SouthWest => (parent.0, parent.1),
			Quadrant::SouthEast => (parent.0 + half, parent.1),
		}
	}
}

/// A maximal all-black region found while building a quadtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Discovery {
	/// Leftmost column and bottom row of the region.
	pub position: (i32, i32),
	pub width: u32,
}

impl Discovery {
	/// The cells this region covers, if they have non-negative coordinates.
	pub fn window(&self) -> Option<Window> {
		let (x, y) = self.position;
		if x < 0 || self.width == 0 || (y as i64) + 1 < self.width as i64 {
			return None;
		}
		let (x, y) = (x as u32, y as u32);
		Some(Window {
			top: y + 1 - self.width,
			bottom: y,
			left: x,
			right: x + self.width - 1,
		})
	}
}

impl fmt::Display for Discovery {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Position ({},{}), Width {}, is all black", self.position.0, self.position.1, self.width)
	}
}

/// Structure of a finished quadtree.
///
/// A leaf is a uniformly colored square; a branch holds exactly four
/// subsections, in `Quadrant::ALL` order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Quadtree {
	Leaf(Color),
	Branch(Box<[Quadtree; 4]>),
}

/// A square region of an image, holding its own copy of the region's
/// cells.
#[derive(Clone, Debug)]
pub struct QuadNode {
	position: (i32, i32),
	width: u32,
	classification: Classification,
	pixels: Raster,
}

impl QuadNode {
	/// Makes the node covering the whole of `raster`, anchored at the
	/// bottom-left cell `(0, side - 1)`.
	///
	/// A raster of a single color has no quadrants to report and is
	/// rejected.
	pub fn root(raster: Raster) -> Result<QuadNode, BuildError> {
		if let Some(color) = raster.uniform_color() {
			return Err(BuildError::Uniform(color));
		}
		Ok(QuadNode {
			position: (0, raster.side() as i32 - 1),
			width: raster.side(),
			classification: Classification::Mixed,
			pixels: raster,
		})
	}

	/// Cuts `quadrant` out of this node and classifies it.
	fn child(&self, quadrant: Quadrant) -> QuadNode {
		let half = self.width / 2;
		let window = quadrant.window(self.width);
		QuadNode {
			position: quadrant.anchor(self.position, half),
			width: half,
			classification: classify(&self.pixels, window.rows(), window.cols()),
			pixels: self.pixels.crop(window),
		}
	}

	pub fn position(&self) -> (i32, i32) {
		self.position
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn classification(&self) -> Classification {
		self.classification
	}

	pub fn pixels(&self) -> &Raster {
		&self.pixels
	}

	/// Subdivides a mixed node, reporting every all-black quadrant to
	/// `emit` and recursing into mixed ones, depth first in
	/// `Quadrant::ALL` order.
	///
	/// The node is consumed; its cells are released once every quadrant
	/// has been visited.
	pub fn expand<F: FnMut(Discovery)>(self, emit: &mut F) -> Result<Quadtree, ExpandError> {
		match self.classification {
			Classification::Mixed => Ok(self.expand_mixed(emit)),
			c => Err(ExpandError::NotMixed(c)),
		}
	}

	fn expand_mixed<F: FnMut(Discovery)>(self, emit: &mut F) -> Quadtree {
		debug_assert!(self.width >= 2, "mixed node of width {}", self.width);
		trace!(x = self.position.0, y = self.position.1, width = self.width, "expanding");
		let sections = Quadrant::ALL.map(|quadrant| {
			let child = self.child(quadrant);
			match child.classification {
				Classification::Black => {
					let found = Discovery { position: child.position, width: child.width };
					debug!(%found, "black region");
					emit(found);
					Quadtree::Leaf(Color::Black)
				},
				Classification::White => Quadtree::Leaf(Color::White),
				Classification::Mixed => child.expand_mixed(emit),
			}
		});
		Quadtree::Branch(Box::new(sections))
	}
}

impl Quadtree {
	/// Builds the quadtree of a non-uniform raster, also returning the
	/// all-black regions in the order they were found.
	pub fn from_raster(raster: Raster) -> Result<(Quadtree, Vec<Discovery>), BuildError> {
		let span = debug_span!("build", side = raster.side());
		let _enter = span.enter();
		let root = QuadNode::root(raster)?;
		let mut found = Vec::new();
		let tree = root.expand_mixed(&mut |d| found.push(d));
		debug!(regions = found.len(), "built quadtree");
		Ok((tree, found))
	}
}

pub mod image;
pub mod qtb;
