use std::path::PathBuf;

use thiserror::Error;

use super::Tile;

/// Reason why a level of detail couldn't be computed.
///
/// Every variant is structural: the level in progress is abandoned and
/// nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LodError {
	/// The bitmap is not a square. `len` is the pixel count that was supplied.
	#[error("bitmap of {len} pixels is not square")]
	InvalidDimensions { len: usize },
	/// The tile size is not divisible by `2^depth`.
	#[error("tile of size {size} cannot be subdivided to depth {depth}")]
	InvalidSubdivision { size: u32, depth: u32 },
	/// The tile reaches past the edge of the bitmap.
	#[error("tile {tile} lies outside a bitmap of side {side}")]
	OutOfBounds { tile: Tile, side: u32 },
	/// The tile covers no pixels at all.
	#[error("tile {tile} has an empty histogram")]
	EmptyTile { tile: Tile },
	/// A tile was given more than one color.
	#[error("tile {tile} appears more than once")]
	DuplicateTile { tile: Tile },
}

/// Reason why a map file couldn't be loaded into a bitmap.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The file could not be read.
	#[error("could not read map file: {0}")]
	Io(#[from] std::io::Error),
	/// The file could not be decoded as an image.
	#[error("could not decode map image: {0}")]
	Image(#[from] image::ImageError),
	/// The image is not 8-bit single channel, so its pixels are not color indices.
	#[error("map image must be 8-bit grayscale")]
	UnsupportedImage,
	/// The pixels don't form a square.
	#[error(transparent)]
	Dimensions(#[from] LodError),
}

/// Reason why a batch of LOD files couldn't be written.
#[derive(Debug, Error)]
pub enum BatchError {
	/// Computing a level failed; no file was written for it.
	#[error("level {lod} failed: {source}")]
	Level { lod: u32, source: LodError },
	/// Writing an output file failed.
	#[error("could not write {}: {source}", .path.display())]
	Write { path: PathBuf, source: std::io::Error },
	/// Encoding a preview image failed.
	#[error("could not save preview {}: {source}", .path.display())]
	Preview { path: PathBuf, source: image::ImageError },
}
