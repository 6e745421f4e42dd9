use rayon::prelude::*;

use super::bitmap::{ColorGrid, Histogram};
use super::error::LodError;
use super::lodfile::LodMap;
use super::select::Selector;
use super::Tile;

/// Reduces `grid` to one color per leaf tile at subdivision `depth`.
///
/// Tiles are evaluated independently on the rayon thread pool, each one
/// counting its own histogram and handing it to `selector`. Any failing
/// tile fails the whole level; which tile's error is reported is not fixed
/// when several fail. No partial map is ever returned.
pub fn compute_lod<G, S>(grid: &G, depth: u32, selector: &S) -> Result<LodMap, LodError>
where
	G: ColorGrid + ?Sized,
	S: Selector + ?Sized,
{
	let side = grid.side();
	let tiles = Tile::root(side).subdivide(depth)?;
	tracing::debug!(depth, tiles = tiles.len(), tile_size = side >> depth, "computing level");

	let colors = tiles
		.into_par_iter()
		.map(|tile| reduce_tile(grid, &tile, selector).map(|color| (tile, color)))
		.collect::<Result<Vec<_>, _>>()?;

	let map = LodMap::from_pairs(depth, side, colors)?;
	tracing::debug!(depth, "level computed");
	Ok(map)
}

/// Representative color of a single tile.
pub fn reduce_tile<G, S>(grid: &G, tile: &Tile, selector: &S) -> Result<u8, LodError>
where
	G: ColorGrid + ?Sized,
	S: Selector + ?Sized,
{
	let histogram = Histogram::of(grid, tile)?;
	if histogram.is_empty() {
		return Err(LodError::EmptyTile { tile: *tile });
	}
	selector.select(tile, &histogram)
}
