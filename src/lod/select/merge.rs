use super::{dominant, Selector};
use crate::lod::bitmap::Histogram;
use crate::lod::error::LodError;
use crate::lod::Tile;

/// Fixed-point denominator of rule weights: a weight of 1.0 is stored as
/// `WEIGHT_SCALE`.
pub const WEIGHT_SCALE: u64 = 1_000_000;

/// Weights and merge groups applied to a histogram before the majority
/// vote.
///
/// Every color starts with weight 1.0 and maps to itself. A merge group
/// sends each of its members to one canonical color, where their weighted
/// counts are summed.
///
/// Weights are kept in integer millionths, so scores are exact and a
/// weighted tie is a real tie.
#[derive(Clone)]
pub struct MergeRule {
	canonical: [u8; 256],
	weights: [u32; 256],
}

impl MergeRule {
	/// A rule that changes nothing: plain majority.
	pub fn new() -> Self {
		let mut canonical = [0u8; 256];
		for (c, slot) in canonical.iter_mut().enumerate() {
			*slot = c as u8;
		}
		MergeRule { canonical, weights: [WEIGHT_SCALE as u32; 256] }
	}

	/// Multiplies the count of `color` by `weight`, rounded to the nearest
	/// millionth.
	///
	/// Negative and NaN weights are clamped to 0, weights too large for the
	/// table to the largest it can hold.
	pub fn with_weight(mut self, color: u8, weight: f64) -> Self {
		let units = (weight * WEIGHT_SCALE as f64).round();
		self.weights[color as usize] = if units.is_nan() || units <= 0.0 {
			0
		} else if units >= u32::MAX as f64 {
			u32::MAX
		} else {
			units as u32
		};
		self
	}

	/// Treats every color in `members` as `canonical`.
	///
	/// `canonical` need not be among the members. A color already in an
	/// earlier group is moved to this one.
	pub fn with_group(mut self, canonical: u8, members: &[u8]) -> Self {
		for &m in members {
			self.canonical[m as usize] = canonical;
		}
		self
	}

	pub fn weight(&self, color: u8) -> f64 {
		self.weight_units(color) as f64 / WEIGHT_SCALE as f64
	}

	/// Weight of `color` in multiples of `1 / WEIGHT_SCALE`.
	pub fn weight_units(&self, color: u8) -> u32 {
		self.weights[color as usize]
	}

	/// The color `color` is counted as.
	pub fn canonical(&self, color: u8) -> u8 {
		self.canonical[color as usize]
	}

	/// Weighted, merged score of every color that received at least one
	/// pixel, in ascending color order.
	///
	/// Scores are in multiples of `1 / WEIGHT_SCALE` pixels.
	pub fn scores(&self, histogram: &Histogram) -> Vec<(u8, u128)> {
		let mut scores = [0u128; 256];
		let mut present = [false; 256];
		for (color, count) in histogram.iter() {
			let target = self.canonical(color) as usize;
			scores[target] += count as u128 * self.weight_units(color) as u128;
			present[target] = true;
		}
		(0..256)
			.filter(|&c| present[c])
			.map(|c| (c as u8, scores[c]))
			.collect()
	}
}

impl Default for MergeRule {
	fn default() -> Self {
		MergeRule::new()
	}
}

impl std::fmt::Debug for MergeRule {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let merged = (0..=255u8)
			.filter(|&c| self.canonical(c) != c)
			.map(|c| (c, self.canonical(c)))
			.collect::<Vec<_>>();
		let weighted = (0..=255u8)
			.filter(|&c| self.weight_units(c) != WEIGHT_SCALE as u32)
			.map(|c| (c, self.weight(c)))
			.collect::<Vec<_>>();
		f.debug_struct("MergeRule")
			.field("merged", &merged)
			.field("weighted", &weighted)
			.finish()
	}
}

/// Majority vote over a histogram reshaped by a `MergeRule`.
///
/// Ties on the weighted score go to the lowest color index, as with
/// `Majority`.
#[derive(Clone, Debug, Default)]
pub struct WeightedMerge {
	pub rule: MergeRule,
}

impl WeightedMerge {
	pub fn new(rule: MergeRule) -> Self {
		WeightedMerge { rule }
	}
}

impl Selector for WeightedMerge {
	fn select(&self, tile: &Tile, histogram: &Histogram) -> Result<u8, LodError> {
		dominant(self.rule.scores(histogram)).ok_or(LodError::EmptyTile { tile: *tile })
	}
}
