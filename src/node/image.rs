use super::error::*;
use super::raster::{Color, Raster};
use super::{Discovery, Quadtree};

/// Widest image `Raster::to_image` will allocate.
pub const MAX_IMAGE_SIDE: u32 = 1 << 14;

fn luma(color: Color) -> image::Luma<u8> {
	match color {
		Color::Black => image::Luma([0]),
		Color::White => image::Luma([255]),
	}
}

impl Raster {
	/// Rebuilds an image from the black regions found in it; every cell
	/// outside them is white.
	pub fn from_discoveries(side: u32, found: &[Discovery]) -> Result<Raster, ReconstructError> {
		let mut raster = Raster::new(side)?;
		for d in found {
			let window = d.window()
				.filter(|w| w.right < side && w.bottom < side)
				.ok_or(ReconstructError::OutOfBounds {
					x: d.position.0,
					y: d.position.1,
					width: d.width,
				})?;
			raster.fill(window, Color::Black);
		}
		Ok(raster)
	}

	/// Draws the raster into a grayscale image, `scale` pixels per cell.
	///
	/// Images wider than `MAX_IMAGE_SIDE` pixels are refused.
	pub fn to_image(&self, scale: u32) -> Result<image::GrayImage, DrawError> {
		if !scale.is_power_of_two() {
			return Err(DrawError::NonPowerOfTwo);
		}
		let side = self.side().checked_mul(scale)
			.filter(|s| *s <= MAX_IMAGE_SIDE)
			.ok_or(DrawError::TooLarge { side: self.side(), scale })?;
		Ok(image::GrayImage::from_fn(side, side, |x, y| luma(self.get(x / scale, y / scale))))
	}
}

impl Quadtree {
	/// Attempts to draw this quadtree node and its subsections into the
	/// supplied buffer.
	///
	/// Will return an `Err` if the image dimensions are not square or not
	/// a power of two, or if the image is too small to give every leaf at
	/// least one pixel.
	///
	/// The `size` and `start_pos` arguments are for internal recursive
	/// use; `None` should be passed by outside callers.
	pub fn to_image(
		&self,
		img: &mut image::GrayImage,
		size: Option<u32>,
		start_pos: Option<(u32, u32)>
	) -> Result<(), DrawError> {
		// Check input validity
		if img.width() != img.height() {
			return Err(DrawError::NonSquare);
		}
		if !img.width().is_power_of_two() ||
			!size.map(u32::is_power_of_two).unwrap_or(true) {
			return Err(DrawError::NonPowerOfTwo);
		}
		if size.is_none() && img.width() < self.resolution() {
			return Err(DrawError::TooSmall { side: img.width(), resolution: self.resolution() });
		}

		let curr_size = size.unwrap_or_else(|| img.width());
		let curr_pos = start_pos.unwrap_or((0, 0));
		match self {
			Quadtree::Leaf(color) => image::imageops::replace(
				img,
				&image::GrayImage::from_pixel(curr_size, curr_size, luma(*color)),
				curr_pos.0,
				curr_pos.1,
			),
			Quadtree::Branch(sects) => {
				let half = curr_size / 2;
				let positions = [
					(curr_pos.0, curr_pos.1),
					(curr_pos.0 + half, curr_pos.1),
					(curr_pos.0, curr_pos.1 + half),
					(curr_pos.0 + half, curr_pos.1 + half),
				];
				for (ind, section) in sects.iter().enumerate() {
					section.to_image(img, Some(half), Some(positions[ind]))?;
				}
			}
		}
		Ok(())
	}

	/// Rasterises the tree at `side` cells per side.
	pub fn to_raster(&self, side: u32) -> Result<Raster, ReconstructError> {
		Raster::from_discoveries(side, &self.discoveries(side))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn corner_tree() -> Quadtree {
		Quadtree::Branch(Box::new([
			Quadtree::Leaf(Color::Black),
			Quadtree::Leaf(Color::White),
			Quadtree::Leaf(Color::White),
			Quadtree::Branch(Box::new([
				Quadtree::Leaf(Color::White),
				Quadtree::Leaf(Color::Black),
				Quadtree::Leaf(Color::White),
				Quadtree::Leaf(Color::White),
			])),
		]))
	}

	#[test]
	fn reconstructs_from_discoveries() {
		let found = [
			Discovery { position: (0, 1), width: 2 },
			Discovery { position: (3, 2), width: 1 },
		];
		let r = Raster::from_discoveries(4, &found).unwrap();
		assert_eq!(r.count_black(), 5);
		assert_eq!(r.get(1, 0), Color::Black);
		assert_eq!(r.get(3, 2), Color::Black);
		assert_eq!(r.get(2, 2), Color::White);
	}

	#[test]
	fn rejects_regions_outside_the_raster() {
		let outside = [Discovery { position: (3, 3), width: 2 }];
		assert!(matches!(Raster::from_discoveries(4, &outside),
			Err(ReconstructError::OutOfBounds { x: 3, y: 3, width: 2 })));
		let negative = [Discovery { position: (-1, 0), width: 1 }];
		assert!(Raster::from_discoveries(4, &negative).is_err());
	}

	#[test]
	fn tree_draws_like_its_raster() {
		let tree = corner_tree();
		let mut img = image::GrayImage::new(8, 8);
		tree.to_image(&mut img, None, None).unwrap();
		let expected = tree.to_raster(4).unwrap().to_image(2).unwrap();
		assert_eq!(img, expected);
		assert_eq!(img.get_pixel(0, 0), &image::Luma([0]));
		assert_eq!(img.get_pixel(6, 4), &image::Luma([0]));
		assert_eq!(img.get_pixel(4, 4), &image::Luma([255]));
	}

	#[test]
	fn draw_rejects_bad_buffers() {
		let tree = corner_tree();
		assert!(matches!(tree.to_image(&mut image::GrayImage::new(4, 8), None, None), Err(DrawError::NonSquare)));
		assert!(matches!(tree.to_image(&mut image::GrayImage::new(6, 6), None, None), Err(DrawError::NonPowerOfTwo)));
		assert!(matches!(tree.to_image(&mut image::GrayImage::new(2, 2), None, None),
			Err(DrawError::TooSmall { side: 2, resolution: 4 })));
	}

	#[test]
	fn raster_image_scale_is_bounded() {
		let r = Raster::new(64).unwrap();
		assert_eq!(r.to_image(4).unwrap().width(), 256);
		assert_eq!(r.to_image(MAX_IMAGE_SIDE / 64).unwrap().width(), MAX_IMAGE_SIDE);
		assert!(matches!(r.to_image(MAX_IMAGE_SIDE / 32), Err(DrawError::TooLarge { side: 64, scale: 512 })));
		assert!(matches!(r.to_image(1 << 26), Err(DrawError::TooLarge { side: 64, .. })));
		assert!(matches!(r.to_image(3), Err(DrawError::NonPowerOfTwo)));
	}
}
