//! Color indices of the Rainforest terrain maps.
//!
//! Grass comes in three shades that are all counted as plain grass, and
//! water is slightly discounted so that coastlines don't swallow the land
//! around them.

use super::{MergeRule, WeightedMerge};

pub const GRASS: u8 = 0;
/// Alternative grass shade, merged into `GRASS`.
pub const ALT_GRASS_1: u8 = 3;
/// Alternative grass shade, merged into `GRASS`.
pub const ALT_GRASS_2: u8 = 6;
pub const MOUNTAIN: u8 = 5;
pub const WATER: u8 = 7;

pub const WATER_WEIGHT: f64 = 0.9;

impl MergeRule {
	/// Grass shades merged, water weighted by `WATER_WEIGHT`.
	pub fn rainforest() -> Self {
		MergeRule::new()
			.with_weight(WATER, WATER_WEIGHT)
			.with_group(GRASS, &[GRASS, ALT_GRASS_1, ALT_GRASS_2])
	}
}

impl WeightedMerge {
	pub fn rainforest() -> Self {
		WeightedMerge::new(MergeRule::rainforest())
	}
}
