use std::path::Path;

use super::error::{LoadError, LodError};
use super::Tile;

/// Trait for square grids of color-index pixels that LOD levels can be
/// computed from.
///
/// The engine never touches pixel storage directly, so anything that can
/// answer "what color index is at `(x, y)`" can be reduced.
pub trait ColorGrid: Sync {
	/// Side length of the grid, in pixels.
	fn side(&self) -> u32;
	/// Color index of the pixel at column `x`, row `y`.
	///
	/// Callers guarantee `x < side` and `y < side`.
	fn color_at(&self, x: u32, y: u32) -> u8;
	/// Returns the `len` pixels of row `y` starting at column `x` as a
	/// slice, only if that is possible given the way the pixels are stored.
	fn row(&self, _x: u32, _y: u32, _len: u32) -> Option<&[u8]> {
		None
	}
}

/// Square bitmap of color indices, one byte per pixel, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedBitmap {
	side: u32,
	pixels: Box<[u8]>,
}

impl IndexedBitmap {
	/// Wraps a flat row-major pixel buffer.
	///
	/// The side length is `floor(sqrt(len))`; a buffer whose length is not
	/// a perfect square is rejected with `InvalidDimensions`.
	pub fn from_raw(pixels: Vec<u8>) -> Result<Self, LodError> {
		let len = pixels.len();
		let side = integer_sqrt(len as u64);
		if side > u32::MAX as u64 || side * side != len as u64 {
			return Err(LodError::InvalidDimensions { len });
		}
		Ok(IndexedBitmap { side: side as u32, pixels: pixels.into_boxed_slice() })
	}

	/// Takes an 8-bit grayscale image whose luma values are color indices.
	pub fn from_luma(img: image::GrayImage) -> Result<Self, LodError> {
		if img.width() != img.height() {
			return Err(LodError::InvalidDimensions {
				len: img.width() as usize * img.height() as usize,
			});
		}
		let side = img.width();
		Ok(IndexedBitmap { side, pixels: img.into_raw().into_boxed_slice() })
	}

	/// Raw pixel buffer, row-major.
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}
}

impl ColorGrid for IndexedBitmap {
	fn side(&self) -> u32 {
		self.side
	}

	fn color_at(&self, x: u32, y: u32) -> u8 {
		self.pixels[y as usize * self.side as usize + x as usize]
	}

	fn row(&self, x: u32, y: u32, len: u32) -> Option<&[u8]> {
		let start = y as usize * self.side as usize + x as usize;
		self.pixels.get(start..start + len as usize)
	}
}

/// Loads a map file into a bitmap.
///
/// Files with a common image extension are decoded with `image` and must
/// be 8-bit grayscale; anything else is read as raw bytes, one per pixel.
pub fn load_map<Q: AsRef<Path>>(path: Q) -> Result<IndexedBitmap, LoadError> {
	let path = path.as_ref();
	let is_image = path.extension()
		.and_then(|e| e.to_str())
		.map(|e| matches!(
			e.to_ascii_lowercase().as_str(),
			"png" | "bmp" | "gif" | "tif" | "tiff" | "pnm" | "pgm"
		))
		.unwrap_or(false);
	if is_image {
		match image::open(path)? {
			image::DynamicImage::ImageLuma8(img) => Ok(IndexedBitmap::from_luma(img)?),
			_ => Err(LoadError::UnsupportedImage),
		}
	} else {
		Ok(IndexedBitmap::from_raw(std::fs::read(path)?)?)
	}
}

fn integer_sqrt(n: u64) -> u64 {
	let n = n as u128;
	let mut root = (n as f64).sqrt() as u128;
	// Float rounding can land one off either way for large n
	while root * root > n {
		root -= 1;
	}
	while (root + 1) * (root + 1) <= n {
		root += 1;
	}
	root as u64
}

/// Number of occurrences of each color index within one tile.
#[derive(Clone)]
pub struct Histogram {
	counts: [u64; 256],
	total: u64,
}

impl Histogram {
	/// Counts the colors of every pixel covered by `tile`.
	///
	/// Fails with `OutOfBounds` if the tile reaches past the grid.
	pub fn of<G: ColorGrid + ?Sized>(grid: &G, tile: &Tile) -> Result<Self, LodError> {
		if !tile.fits(grid.side()) {
			return Err(LodError::OutOfBounds { tile: *tile, side: grid.side() });
		}
		let mut hist = Histogram::default();
		for row in tile.y..tile.y + tile.size {
			match grid.row(tile.x, row, tile.size) {
				Some(pixels) => pixels.iter().for_each(|&c| hist.add(c, 1)),
				None => (tile.x..tile.x + tile.size)
					.for_each(|col| hist.add(grid.color_at(col, row), 1)),
			}
		}
		Ok(hist)
	}

	/// Builds a histogram from explicit `(color, count)` pairs; repeated
	/// colors accumulate.
	pub fn from_counts<I: IntoIterator<Item = (u8, u64)>>(counts: I) -> Self {
		counts.into_iter().fold(Histogram::default(), |mut h, (c, n)| {
			h.add(c, n);
			h
		})
	}

	fn add(&mut self, color: u8, n: u64) {
		self.counts[color as usize] += n;
		self.total += n;
	}

	pub fn count(&self, color: u8) -> u64 {
		self.counts[color as usize]
	}

	/// Sum of all counts; equal to the tile's area.
	pub fn total(&self) -> u64 {
		self.total
	}

	pub fn is_empty(&self) -> bool {
		self.total == 0
	}

	/// Colors that occur at least once, in ascending order, with their counts.
	pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
		self.counts.iter()
			.enumerate()
			.filter(|&(_, &n)| n > 0)
			.map(|(c, &n)| (c as u8, n))
	}
}

impl Default for Histogram {
	fn default() -> Self {
		Histogram { counts: [0; 256], total: 0 }
	}
}

impl std::fmt::Debug for Histogram {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}
