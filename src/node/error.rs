use thiserror::Error;

use super::classify::Classification;
use super::raster::Color;

/// Reason why a raster couldn't be created.
#[derive(Debug, Error)]
pub enum RasterError {
	/// The side length is not a power of two.
	#[error("raster side {0} is not a power of two")]
	NonPowerOfTwo(u32),
	/// The cell count does not fit in memory addressing.
	#[error("raster side {0} is too large")]
	TooLarge(u32),
}

/// Reason why a raster couldn't be turned into a quadtree.
#[derive(Debug, Error)]
pub enum BuildError {
	/// Every cell has the same color, so there is nothing to subdivide.
	#[error("raster is uniformly {0:?}")]
	Uniform(Color),
}

/// Reason why a node couldn't be expanded.
#[derive(Debug, Error)]
pub enum ExpandError {
	/// Only mixed nodes have quadrants worth visiting.
	#[error("cannot expand a node classified {0:?}")]
	NotMixed(Classification),
}

/// Reason why discovery records couldn't be turned back into a raster.
#[derive(Debug, Error)]
pub enum ReconstructError {
	#[error(transparent)]
	Raster(#[from] RasterError),
	/// A record covers cells outside the raster.
	#[error("region at ({x},{y}) of width {width} lies outside the raster")]
	OutOfBounds { x: i32, y: i32, width: u32 },
}

/// Reason why a quadtree couldn't be rendered to an image buffer.
#[derive(Debug, Error)]
pub enum DrawError {
	/// The image buffer's dimensions are not equal; the image is not a square.
	#[error("image is not square")]
	NonSquare,
	/// The image buffer's dimensions are not powers of two.
	#[error("image side is not a power of two")]
	NonPowerOfTwo,
	/// The image has fewer pixels per side than the tree has leaves.
	#[error("image side {side} is smaller than the tree resolution {resolution}")]
	TooSmall { side: u32, resolution: u32 },
	/// Scaling the raster would give an image too wide to allocate.
	#[error("a raster of side {side} scaled by {scale} is too large")]
	TooLarge { side: u32, scale: u32 },
}

/// Reason why a quadtree couldn't be encoded.
#[derive(Debug, Error)]
pub enum EncodeError {
	#[error("raster side {0} is not a power of two")]
	NonPowerOfTwo(u32),
	/// The tree subdivides further than a raster of this side allows.
	#[error("raster side {side} is smaller than the tree resolution {resolution}")]
	SideTooSmall { side: u32, resolution: u32 },
}

/// Reason why a quadtree encoding couldn't be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// A node was expected but the data ran out.
	#[error("encoded tree ended early")]
	InsufficientData,
	/// There was no valid QTB file header.
	#[error("missing QTB header")]
	MissingHeader,
	#[error("unsupported QTB version {0}")]
	UnsupportedVersion(u8),
	/// The header's size exponent is too large to describe a raster.
	#[error("invalid raster size exponent {0}")]
	InvalidSize(u8),
	/// A branch was found where only single cells fit.
	#[error("tree subdivides below single cells")]
	TooDeep,
}

/// Reason why a text image description was rejected.
#[derive(Debug, Error)]
pub enum InputError {
	#[error("could not read input: {0}")]
	Io(#[from] std::io::Error),
	#[error(transparent)]
	Raster(#[from] RasterError),
	#[error("input is empty")]
	Empty,
	#[error("first line does not hold the image width")]
	MissingWidth,
	#[error("image width {0} is not a power of 2")]
	NotPowerOfTwo(u64),
	#[error("image width {width} is less than the minimum {min}")]
	TooSmall { width: u64, min: u32 },
	#[error("image width {width} is more than the maximum {max}")]
	TooLarge { width: u64, max: u32 },
	#[error("second line does not hold the number of black pixels")]
	MissingCount,
	#[error("{count} black pixels do not fit in {total} pixels")]
	TooManyBlack { count: u64, total: u64 },
	#[error("the image is only black pixels")]
	AllBlack,
	#[error("the image is only white pixels")]
	AllWhite,
	/// A coordinate line did not hold exactly two numbers.
	#[error("line {line} is not a coordinate pair")]
	MalformedLine { line: usize },
	#[error("coordinate ({x},{y}) is outside of the bounds of the image width {width}")]
	OutOfBounds { x: u64, y: u64, width: u32 },
	#[error("{declared} black pixels declared but {counted} coordinates given")]
	CountMismatch { declared: u64, counted: u64 },
}
