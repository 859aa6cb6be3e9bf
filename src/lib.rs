pub mod input;
pub mod node;

pub use node::*;

impl node::Quadtree {
	/// Number of levels in the tree, counting the leaves.
	pub fn depth(&self) -> u32 {
		match self {
			Quadtree::Leaf(_) => 1,
			Quadtree::Branch(sects) => 1 + sects.iter().map(Quadtree::depth).max().unwrap_or(0),
		}
	}

	/// Cells per side needed for the smallest leaf to cover one cell.
	pub fn resolution(&self) -> u32 {
		1 << (self.depth() - 1)
	}

	pub fn leaf_count(&self) -> usize {
		match self {
			Quadtree::Leaf(_) => 1,
			Quadtree::Branch(sects) => sects.iter().map(Quadtree::leaf_count).sum(),
		}
	}

	/// Number of black cells the tree covers in a raster of `side` cells
	/// per side.
	pub fn black_area(&self, side: u32) -> u64 {
		match self {
			Quadtree::Leaf(Color::Black) => side as u64 * side as u64,
			Quadtree::Leaf(Color::White) => 0,
			Quadtree::Branch(sects) => sects.iter().map(|s| s.black_area(side / 2)).sum(),
		}
	}

	/// Lists the black leaves as they would be reported while building
	/// the tree from a raster of `side` cells per side.
	pub fn discoveries(&self, side: u32) -> Vec<Discovery> {
		let mut found = Vec::new();
		self.collect_black((0, side as i32 - 1), side, &mut found);
		found
	}

	fn collect_black(&self, position: (i32, i32), width: u32, found: &mut Vec<Discovery>) {
		match self {
			Quadtree::Leaf(Color::Black) => found.push(Discovery { position, width }),
			Quadtree::Leaf(Color::White) => (),
			Quadtree::Branch(sects) => {
				let half = width / 2;
				for (quadrant, section) in Quadrant::ALL.iter().zip(sects.iter()) {
					section.collect_black(quadrant.anchor(position, half), half, found);
				}
			}
		}
	}
}
