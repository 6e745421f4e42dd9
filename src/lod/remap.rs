use super::lodfile::LodMap;
use super::select::rainforest;

/// Lookup table from canonical tile colors to the codes a renderer expects.
#[derive(Clone)]
pub struct TileRemap {
	table: [u8; 256],
}

impl TileRemap {
	/// A remap sending every color to `fallback` until told otherwise.
	pub fn new(fallback: u8) -> Self {
		TileRemap { table: [fallback; 256] }
	}

	/// A remap that leaves every color as it is.
	pub fn identity() -> Self {
		let mut table = [0u8; 256];
		for (c, slot) in table.iter_mut().enumerate() {
			*slot = c as u8;
		}
		TileRemap { table }
	}

	/// Grass 1, mountain 3, water 0, everything else 2 (dead forest).
	pub fn rainforest() -> Self {
		TileRemap::new(2)
			.with(rainforest::GRASS, 1)
			.with(rainforest::MOUNTAIN, 3)
			.with(rainforest::WATER, 0)
	}

	pub fn with(mut self, color: u8, code: u8) -> Self {
		self.table[color as usize] = code;
		self
	}

	pub fn code(&self, color: u8) -> u8 {
		self.table[color as usize]
	}

	/// Remaps every tile of `map`.
	pub fn apply(&self, map: &LodMap) -> LodMap {
		map.map_colors(|c| self.code(c))
	}
}

impl Default for TileRemap {
	fn default() -> Self {
		TileRemap::identity()
	}
}

impl std::fmt::Debug for TileRemap {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map()
			.entries((0..=255u8).map(|c| (c, self.code(c))).filter(|(c, code)| c != code))
			.finish()
	}
}
