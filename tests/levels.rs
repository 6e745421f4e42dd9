use quadtree_lod::bitmap::{load_map, IndexedBitmap};
use quadtree_lod::error::{BatchError, LodError};
use quadtree_lod::remap::TileRemap;
use quadtree_lod::select::rainforest::{GRASS, MOUNTAIN, WATER};
use quadtree_lod::select::{Majority, WeightedMerge};
use quadtree_lod::{level, write_levels};

use std::fs;
use std::path::PathBuf;

/// Fresh scratch directory for one test.
fn scratch(name: &str) -> PathBuf {
	let dir = std::env::temp_dir().join(format!("quadtree_lod-{}-{}", name, std::process::id()));
	let _ = fs::remove_dir_all(&dir);
	fs::create_dir_all(&dir).unwrap();
	dir
}

/// 16x16 map: water on the left half, grass shades top right, mountain
/// bottom right.
fn terrain_map() -> IndexedBitmap {
	let mut pixels = Vec::with_capacity(256);
	for y in 0..16u32 {
		for x in 0..16u32 {
			pixels.push(match (x < 8, y < 8) {
				(true, _) => WATER,
				(false, true) => [0, 3, 6][((x + y) % 3) as usize],
				(false, false) => MOUNTAIN,
			});
		}
	}
	IndexedBitmap::from_raw(pixels).unwrap()
}

#[test]
fn writes_one_file_per_level() {
	let dir = scratch("levels");
	let paths = write_levels(
		&terrain_map(), 3, &WeightedMerge::rainforest(), &TileRemap::rainforest(), &dir, None,
	).unwrap();
	assert_eq!(paths, vec![dir.join("0.lod"), dir.join("1.lod"), dir.join("2.lod")]);

	assert_eq!(fs::read(dir.join("0.lod")).unwrap(), vec![0, 1, 0, 3]);
	for (lod, path) in paths.iter().enumerate() {
		assert_eq!(fs::read(path).unwrap().len(), 4usize.pow(lod as u32 + 1));
	}
	let level2 = fs::read(dir.join("2.lod")).unwrap();
	// row 0: water, water, grass, grass
	assert_eq!(&level2[..8], &[0, 0, 0, 0, 1, 1, 1, 1]);
	assert_eq!(&level2[56..], &[0, 0, 0, 0, 3, 3, 3, 3]);
	fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn raw_colors_and_majority() {
	let map = level(&terrain_map(), 0, &Majority, &TileRemap::identity()).unwrap();
	// Plain majority counts the grass shades apart; shade 0 covers 22 of 64 pixels
	assert_eq!(map.to_bytes(), vec![WATER, GRASS, WATER, MOUNTAIN]);
}

#[test]
fn failing_level_leaves_no_file() {
	let dir = scratch("failing");
	// 12 is divisible by 2 and 4 but not by 8
	let bitmap = IndexedBitmap::from_raw(vec![1; 144]).unwrap();
	let err = write_levels(&bitmap, 3, &Majority, &TileRemap::identity(), &dir, None).unwrap_err();
	match err {
		BatchError::Level { lod, source } => {
			assert_eq!(lod, 2);
			assert_eq!(source, LodError::InvalidSubdivision { size: 12, depth: 3 });
		}
		other => panic!("unexpected error {:?}", other),
	}
	assert_eq!(fs::read(dir.join("0.lod")).unwrap(), vec![1; 4]);
	assert_eq!(fs::read(dir.join("1.lod")).unwrap(), vec![1; 16]);
	assert!(!dir.join("2.lod").exists());
	fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn previews_are_written_alongside() {
	let dir = scratch("preview");
	write_levels(
		&terrain_map(), 2, &WeightedMerge::rainforest(), &TileRemap::rainforest(), &dir, Some(4),
	).unwrap();
	let preview = image::open(dir.join("1.png")).unwrap();
	assert_eq!(preview.as_luma8().map(|p| p.dimensions()), Some((16, 16)));
	fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn load_map_reads_raw_and_grayscale() {
	let dir = scratch("load");
	let raw = dir.join("map.raw");
	fs::write(&raw, vec![5u8; 64]).unwrap();
	assert_eq!(load_map(&raw).unwrap(), IndexedBitmap::from_raw(vec![5; 64]).unwrap());

	let uneven = dir.join("uneven.raw");
	fs::write(&uneven, vec![5u8; 60]).unwrap();
	assert!(matches!(
		load_map(&uneven),
		Err(quadtree_lod::error::LoadError::Dimensions(LodError::InvalidDimensions { len: 60 }))
	));

	let png = dir.join("map.png");
	image::GrayImage::from_pixel(8, 8, image::Luma([GRASS])).save(&png).unwrap();
	assert_eq!(load_map(&png).unwrap(), IndexedBitmap::from_raw(vec![GRASS; 64]).unwrap());

	let rgb = dir.join("rgb.png");
	image::RgbImage::new(8, 8).save(&rgb).unwrap();
	assert!(matches!(load_map(&rgb), Err(quadtree_lod::error::LoadError::UnsupportedImage)));
	fs::remove_dir_all(&dir).unwrap();
}
