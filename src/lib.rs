pub mod lod;

pub use lod::*;

use lod::bitmap::ColorGrid;
use lod::compute::compute_lod;
use lod::error::{BatchError, LodError};
use lod::lodfile::LodMap;
use lod::remap::TileRemap;
use lod::select::Selector;

use std::path::{Path, PathBuf};

/// Computes and writes LOD files `0.lod` to `<max_lod - 1>.lod` into
/// `out_dir`, where level `lod` is subdivided to depth `lod + 1`.
///
/// Each level is fully computed and encoded before its file is created,
/// so a failing level leaves nothing behind; levels written before it are
/// kept. When `preview_scale` is set, a grayscale `<lod>.png` is written
/// next to each LOD file.
///
/// Returns the paths of the LOD files written.
pub fn write_levels<G, S>(
	grid: &G,
	max_lod: u32,
	selector: &S,
	remap: &TileRemap,
	out_dir: &Path,
	preview_scale: Option<u32>,
) -> Result<Vec<PathBuf>, BatchError>
where
	G: ColorGrid + ?Sized,
	S: Selector + ?Sized,
{
	let mut written = Vec::with_capacity(max_lod as usize);
	for lod in 0..max_lod {
		let path = out_dir.join(format!("{}.lod", lod));
		tracing::info!(lod, path = %path.display(), "generating LOD file");

		let map = level(grid, lod, selector, remap)
			.map_err(|source| BatchError::Level { lod, source })?;
		let data = map.to_bytes();
		std::fs::write(&path, &data)
			.map_err(|source| BatchError::Write { path: path.clone(), source })?;
		tracing::info!(lod, tiles = map.len(), bytes = data.len(), "wrote LOD file");

		if let Some(scale) = preview_scale {
			let preview_path = out_dir.join(format!("{}.png", lod));
			map.to_preview(scale)
				.save(&preview_path)
				.map_err(|source| BatchError::Preview { path: preview_path.clone(), source })?;
			tracing::debug!(lod, path = %preview_path.display(), "wrote preview");
		}
		written.push(path);
	}
	Ok(written)
}

/// The remapped LOD map for level `lod` (subdivision depth `lod + 1`).
pub fn level<G, S>(
	grid: &G,
	lod: u32,
	selector: &S,
	remap: &TileRemap,
) -> Result<LodMap, LodError>
where
	G: ColorGrid + ?Sized,
	S: Selector + ?Sized,
{
	let map = compute_lod(grid, lod + 1, selector)?;
	Ok(remap.apply(&map))
}
