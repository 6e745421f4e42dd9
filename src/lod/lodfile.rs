use std::collections::HashMap;
use std::io::Write;

use super::error::LodError;
use super::Tile;

/// One color per leaf tile of a single subdivision depth.
///
/// Built once from the computed pairs and never modified; remapping
/// produces a new map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LodMap {
	depth: u32,
	side: u32,
	tiles: HashMap<Tile, u8>,
}

impl LodMap {
	/// Collects `(tile, color)` pairs into a map.
	///
	/// Fails with `DuplicateTile` if a tile is given twice. Whether the pairs
	/// actually cover the bitmap is up to the caller; `compute_lod` always
	/// passes a full subdivision.
	pub fn from_pairs<I>(depth: u32, side: u32, pairs: I) -> Result<Self, LodError>
	where
		I: IntoIterator<Item = (Tile, u8)>,
	{
		let pairs = pairs.into_iter();
		let mut tiles = HashMap::with_capacity(pairs.size_hint().0);
		for (tile, color) in pairs {
			if tiles.insert(tile, color).is_some() {
				return Err(LodError::DuplicateTile { tile });
			}
		}
		Ok(LodMap { depth, side, tiles })
	}

	/// Subdivision depth the tiles were produced at.
	pub fn depth(&self) -> u32 {
		self.depth
	}

	/// Side length of the bitmap the tiles were taken from.
	pub fn side(&self) -> u32 {
		self.side
	}

	pub fn len(&self) -> usize {
		self.tiles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tiles.is_empty()
	}

	pub fn get(&self, tile: &Tile) -> Option<u8> {
		self.tiles.get(tile).copied()
	}

	/// Tiles and colors in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&Tile, &u8)> {
		self.tiles.iter()
	}

	/// Applies `f` to every color, keeping the tiles.
	pub fn map_colors<F: Fn(u8) -> u8>(&self, f: F) -> LodMap {
		LodMap {
			depth: self.depth,
			side: self.side,
			tiles: self.tiles.iter().map(|(tile, &c)| (*tile, f(c))).collect(),
		}
	}

	/// Tiles sorted the way they are laid out in a LOD file: by row
	/// (`y`), then by column (`x`).
	pub fn sorted(&self) -> Vec<(Tile, u8)> {
		let mut sorted = self.tiles.iter().map(|(t, &c)| (*t, c)).collect::<Vec<_>>();
		sorted.sort_unstable_by_key(|(t, _)| (t.y, t.x));
		sorted
	}

	/// Encodes the map as LOD file data.
	///
	/// One byte per tile, in `sorted` order, with no header or padding.
	/// The length is therefore `4^depth` for a map from `compute_lod`.
	pub fn to_bytes(&self) -> Vec<u8> {
		self.sorted().into_iter().map(|(_, c)| c).collect()
	}

	/// Writes LOD file data to `out`, returning the number of bytes written.
	pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<usize> {
		let data = self.to_bytes();
		out.write_all(&data)?;
		tracing::trace!(depth = self.depth, bytes = data.len(), "wrote LOD data");
		Ok(data.len())
	}

	/// Renders the map as a grayscale image, one `scale`-pixel square per
	/// tile, for eyeballing a level.
	///
	/// Values are stretched so the largest color present is white.
	pub fn to_preview(&self, scale: u32) -> image::GrayImage {
		let tiles_per_side = 1u32 << self.depth.min(31);
		let width = tiles_per_side.saturating_mul(scale);
		let mut img = image::GrayImage::new(width, width);
		let max = self.tiles.values().copied().max().unwrap_or(0);
		let stretch = |c: u8| if max == 0 { 0 } else { (c as u32 * 255 / max as u32) as u8 };
		let tile_size = (self.side >> self.depth.min(31)).max(1);
		for (tile, &color) in self.tiles.iter() {
			image::imageops::replace(
				&mut img,
				&image::GrayImage::from_pixel(scale, scale, image::Luma([stretch(color)])),
				tile.x / tile_size * scale,
				tile.y / tile_size * scale,
			);
		}
		img
	}
}
