pub mod merge;
pub mod rainforest;

pub use merge::{MergeRule, WeightedMerge};

use super::bitmap::Histogram;
use super::error::LodError;
use super::Tile;

/// Trait for strategies that pick the one color representing a tile.
///
/// Implementors are shared by every worker computing a level, hence `Sync`.
pub trait Selector: Sync {
	/// Chooses the representative color of `tile` from its histogram.
	///
	/// An empty histogram must be reported as `EmptyTile` rather than
	/// answered with a made-up color.
	fn select(&self, tile: &Tile, histogram: &Histogram) -> Result<u8, LodError>;
}

/// Plain majority: the most frequent color wins.
///
/// When several colors share the highest count, the lowest color index
/// is chosen.
#[derive(Clone, Copy, Debug, Default)]
pub struct Majority;

impl Selector for Majority {
	fn select(&self, tile: &Tile, histogram: &Histogram) -> Result<u8, LodError> {
		dominant(histogram.iter()).ok_or(LodError::EmptyTile { tile: *tile })
	}
}

impl<S: Selector + ?Sized> Selector for &S {
	fn select(&self, tile: &Tile, histogram: &Histogram) -> Result<u8, LodError> {
		(**self).select(tile, histogram)
	}
}

impl<S: Selector + ?Sized> Selector for Box<S> {
	fn select(&self, tile: &Tile, histogram: &Histogram) -> Result<u8, LodError> {
		(**self).select(tile, histogram)
	}
}

/// Returns the color with the highest score, breaking ties towards the
/// lowest color index regardless of iteration order.
///
/// `None` if there are no candidates.
pub(crate) fn dominant<S, I>(scores: I) -> Option<u8>
where
	S: PartialOrd,
	I: IntoIterator<Item = (u8, S)>,
{
	scores.into_iter().fold(None, |best: Option<(u8, S)>, (color, score)| match best {
		Some((best_color, best_score)) =>
			if score > best_score || (score == best_score && color < best_color) {
				Some((color, score))
			} else {
				Some((best_color, best_score))
			},
		None => Some((color, score)),
	}).map(|(color, _)| color)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tile() -> Tile {
		Tile::new(0, 0, 4)
	}

	#[test]
	fn majority_picks_the_most_frequent_color() {
		let hist = Histogram::from_counts(vec![(2, 3), (9, 7), (4, 6)]);
		assert_eq!(Majority.select(&tile(), &hist), Ok(9));
	}

	#[test]
	fn majority_tie_goes_to_the_lowest_color() {
		let hist = Histogram::from_counts(vec![(200, 5), (17, 5)]);
		assert_eq!(Majority.select(&tile(), &hist), Ok(17));
		let hist = Histogram::from_counts(vec![(3, 2), (1, 1), (255, 2), (8, 2)]);
		assert_eq!(Majority.select(&tile(), &hist), Ok(3));
	}

	#[test]
	fn majority_on_empty_histogram_fails() {
		assert_eq!(
			Majority.select(&tile(), &Histogram::default()),
			Err(LodError::EmptyTile { tile: tile() })
		);
	}

	#[test]
	fn dominant_ignores_iteration_order() {
		let forward = vec![(1u8, 2.5f64), (4, 2.5), (6, 1.0)];
		let backward = forward.iter().rev().cloned().collect::<Vec<_>>();
		assert_eq!(dominant(forward), Some(1));
		assert_eq!(dominant(backward), Some(1));
		assert_eq!(dominant(Vec::<(u8, f64)>::new()), None);
	}

	#[test]
	fn selectors_work_behind_references_and_boxes() {
		let hist = Histogram::from_counts(vec![(5, 1)]);
		let boxed: Box<dyn Selector> = Box::new(Majority);
		assert_eq!(boxed.select(&tile(), &hist), Ok(5));
		assert_eq!((&Majority).select(&tile(), &hist), Ok(5));
	}
}
