use bitvec::prelude::*;

use super::error::*;
use super::raster::Color;
use super::Quadtree;

/// A `BitVec` variant ideal for encoding and decoding quadtrees.
pub type QuadtreeEncodeBitVec = BitVec<u8, Msb0>;

const MAGIC: &[u8; 4] = b"QuBw";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 6;

impl Quadtree {
	/// Converts the tree into a pre-order bit stream.
	///
	/// Each node starts with a bit telling whether it has subsections.
	/// A branch is immediately followed by its four subsections; a leaf by
	/// one bit that is set for black.
	pub fn encode(&self, buffer: &mut QuadtreeEncodeBitVec) {
		match self {
			Quadtree::Leaf(color) => {
				buffer.push(false);
				buffer.push(*color == Color::Black);
			},
			Quadtree::Branch(sects) => {
				buffer.push(true);
				for section in sects.iter() {
					section.encode(buffer);
				}
			}
		}
	}

	/// Reads a bit stream of the sort `.encode()` writes, starting at
	/// `curr_ind`, allowing at most `levels` further subdivisions.
	///
	/// Successful return value holds the index to which the parser has
	/// progressed.
	pub fn decode(
		buffer: &BitSlice<u8, Msb0>,
		curr_ind: usize,
		levels: u8
	) -> Result<(Quadtree, usize), DecodeError> {
		let is_branch = *buffer.get(curr_ind).ok_or(DecodeError::InsufficientData)?;
		if !is_branch {
			let black = *buffer.get(curr_ind + 1).ok_or(DecodeError::InsufficientData)?;
			let color = if black { Color::Black } else { Color::White };
			return Ok((Quadtree::Leaf(color), curr_ind + 2));
		}
		if levels == 0 {
			return Err(DecodeError::TooDeep);
		}
		let (nw, curr_ind) = Quadtree::decode(buffer, curr_ind + 1, levels - 1)?;
		let (ne, curr_ind) = Quadtree::decode(buffer, curr_ind, levels - 1)?;
		let (sw, curr_ind) = Quadtree::decode(buffer, curr_ind, levels - 1)?;
		let (se, curr_ind) = Quadtree::decode(buffer, curr_ind, levels - 1)?;
		Ok((Quadtree::Branch(Box::new([nw, ne, sw, se])), curr_ind))
	}

	/// Encodes the tree, for a raster of `side` cells per side, into QTB
	/// data: a header, the side as a power of two, then the bit stream
	/// padded to whole bytes.
	pub fn to_qtb(&self, side: u32) -> Result<Vec<u8>, EncodeError> {
		if !side.is_power_of_two() {
			return Err(EncodeError::NonPowerOfTwo(side));
		}
		if side < self.resolution() {
			return Err(EncodeError::SideTooSmall { side, resolution: self.resolution() });
		}
		let mut ret = Vec::new();
		ret.extend_from_slice(MAGIC);
		ret.push(VERSION);
		ret.push(side.trailing_zeros() as u8);
		let mut bit_buf = QuadtreeEncodeBitVec::new();
		self.encode(&mut bit_buf);
		bit_buf.set_uninitialized(false);
		ret.extend_from_slice(bit_buf.as_raw_slice());
		Ok(ret)
	}

	/// Reads QTB data back into a tree and its raster side.
	///
	/// Sides are limited to `input::MAX_WIDTH`, like text descriptions.
	pub fn from_qtb(source: &[u8]) -> Result<(Quadtree, u32), DecodeError> {
		if source.len() < HEADER_LEN || &source[..4] != MAGIC {
			return Err(DecodeError::MissingHeader);
		}
		if source[4] != VERSION {
			return Err(DecodeError::UnsupportedVersion(source[4]));
		}
		let levels = source[5];
		if levels as u32 > crate::input::MAX_WIDTH.trailing_zeros() {
			return Err(DecodeError::InvalidSize(levels));
		}
		let tree_bits = BitSlice::<u8, Msb0>::from_slice(&source[HEADER_LEN..]);
		let (tree, _) = Quadtree::decode(tree_bits, 0, levels)?;
		Ok((tree, 1 << levels))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn leaf(black: bool) -> Quadtree {
		Quadtree::Leaf(if black { Color::Black } else { Color::White })
	}

	#[test]
	fn bit_layout() {
		let tree = Quadtree::Branch(Box::new([leaf(true), leaf(false), leaf(false), leaf(true)]));
		let mut bits = QuadtreeEncodeBitVec::new();
		tree.encode(&mut bits);
		assert_eq!(bits, bitvec![u8, Msb0; 1, 0, 1, 0, 0, 0, 0, 0, 1]);
		let data = tree.to_qtb(2).unwrap();
		assert_eq!(data, vec![b'Q', b'u', b'B', b'w', 1, 1, 0b1010_0000, 0b1000_0000]);
		assert_eq!(Quadtree::from_qtb(&data).unwrap(), (tree, 2));
	}

	#[test]
	fn nested_tree_survives() {
		let inner = Quadtree::Branch(Box::new([leaf(false), leaf(true), leaf(true), leaf(false)]));
		let tree = Quadtree::Branch(Box::new([leaf(true), inner, leaf(false), leaf(false)]));
		let data = tree.to_qtb(8).unwrap();
		assert_eq!(data[5], 3);
		assert_eq!(Quadtree::from_qtb(&data).unwrap(), (tree.clone(), 8));
		let widest = tree.to_qtb(64).unwrap();
		assert_eq!(widest[5], 6);
		assert_eq!(Quadtree::from_qtb(&widest).unwrap(), (tree, 64));
	}

	#[test]
	fn encode_rejects_small_sides() {
		let tree = Quadtree::Branch(Box::new([leaf(true), leaf(false), leaf(false), leaf(false)]));
		assert!(matches!(tree.to_qtb(1), Err(EncodeError::SideTooSmall { side: 1, resolution: 2 })));
		assert!(matches!(tree.to_qtb(3), Err(EncodeError::NonPowerOfTwo(3))));
	}

	#[test]
	fn decode_errors() {
		assert!(matches!(Quadtree::from_qtb(b"QuB"), Err(DecodeError::MissingHeader)));
		assert!(matches!(Quadtree::from_qtb(b"QTI\x01\x01\x01\x00"), Err(DecodeError::MissingHeader)));
		assert!(matches!(Quadtree::from_qtb(b"QuBw\x02\x01\x00"), Err(DecodeError::UnsupportedVersion(2))));
		assert!(matches!(Quadtree::from_qtb(b"QuBw\x01\x40\x00"), Err(DecodeError::InvalidSize(64))));
		// sides past the 64 cell limit
		assert!(matches!(Quadtree::from_qtb(b"QuBw\x01\x07\x00"), Err(DecodeError::InvalidSize(7))));
		assert!(matches!(Quadtree::from_qtb(b"QuBw\x01\x1f\x00"), Err(DecodeError::InvalidSize(31))));
		assert!(matches!(Quadtree::from_qtb(b"QuBw\x01\x01"), Err(DecodeError::InsufficientData)));
		// branch, then a branch where only single cells fit
		assert!(matches!(Quadtree::from_qtb(b"QuBw\x01\x01\xc0"), Err(DecodeError::TooDeep)));
		// branch whose last leaf is cut off
		assert!(matches!(Quadtree::from_qtb(b"QuBw\x01\x01\x88"), Err(DecodeError::InsufficientData)));
	}
}
