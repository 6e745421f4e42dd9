pub mod bitmap;
pub mod compute;
pub mod error;
pub mod lodfile;
pub mod remap;
pub mod select;

use std::fmt;

/// Square region of a bitmap, in pixel coordinates.
///
/// Tiles are the unit of reduction: every leaf of a subdivision becomes
/// exactly one byte of a LOD file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
	pub x: u32,
	pub y: u32,
	pub size: u32,
}

impl Tile {
	pub fn new(x: u32, y: u32, size: u32) -> Self {
		Tile { x, y, size }
	}

	/// The tile covering a whole bitmap of side `side`.
	pub fn root(side: u32) -> Self {
		Tile::new(0, 0, side)
	}

	/// Splits the tile once, into top-left, top-right, bottom-left and
	/// bottom-right quadrants, in that order.
	///
	/// An odd size loses its last row and column; `subdivide` rejects
	/// such tiles before getting here.
	pub fn quadrants(&self) -> [Tile; 4] {
		let half = self.size / 2;
		let mut sects = [*self; 4];
		for (sect_ind, sect) in sects.iter_mut().enumerate() {
			*sect = Tile::new(
				self.x + (sect_ind as u32 & 1) * half,
				self.y + (sect_ind as u32 >> 1) * half,
				half,
			);
		}
		sects
	}

	/// Recursively splits the tile `depth` times along every path and
	/// returns the `4^depth` leaves.
	///
	/// The output order follows the recursion (each tile's quadrants in
	/// `quadrants` order), so repeated calls give identical sequences.
	///
	/// Fails with `InvalidSubdivision` if `size` is not divisible by
	/// `2^depth`, or if a zero-sized tile would be split.
	pub fn subdivide(&self, depth: u32) -> Result<Vec<Tile>, error::LodError> {
		let invalid = error::LodError::InvalidSubdivision { size: self.size, depth };
		if depth > 0 {
			let divisor = 1u32.checked_shl(depth).ok_or_else(|| invalid.clone())?;
			if self.size == 0 || self.size % divisor != 0 {
				return Err(invalid);
			}
		}
		// size >= 2^depth here, so 4^depth <= size^2 leaves
		let mut leaves = Vec::with_capacity(1usize << (2 * depth));
		self.subdivide_into(depth, &mut leaves);
		Ok(leaves)
	}

	fn subdivide_into(&self, remaining: u32, leaves: &mut Vec<Tile>) {
		if remaining == 0 {
			leaves.push(*self);
			return;
		}
		for sect in self.quadrants().iter() {
			sect.subdivide_into(remaining - 1, leaves);
		}
	}

	/// Number of pixels covered.
	pub fn area(&self) -> u64 {
		self.size as u64 * self.size as u64
	}

	/// Whether the tile fits within a bitmap of side `side`.
	pub fn fits(&self, side: u32) -> bool {
		self.x as u64 + self.size as u64 <= side as u64
			&& self.y as u64 + self.size as u64 <= side as u64
	}
}

impl fmt::Display for Tile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}) size {}", self.x, self.y, self.size)
	}
}
