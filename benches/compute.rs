use quadtree_lod::bitmap::IndexedBitmap;
use quadtree_lod::compute::compute_lod;
use quadtree_lod::select::{Majority, WeightedMerge};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};

fn random_map(side: u32) -> IndexedBitmap {
	let mut rng = rand::rngs::StdRng::seed_from_u64(0);
	let pixels = (0..side * side).map(|_| rng.gen_range(0..8u8)).collect();
	IndexedBitmap::from_raw(pixels).unwrap()
}

fn bench_compute_lod(c: &mut Criterion) {
	let map = random_map(1024);
	let mut group = c.benchmark_group("compute_lod");
	for depth in [2u32, 5, 8].iter() {
		group.bench_with_input(BenchmarkId::new("majority", depth), depth, |b, &depth| {
			b.iter(|| compute_lod(&map, black_box(depth), &Majority).unwrap())
		});
		let selector = WeightedMerge::rainforest();
		group.bench_with_input(BenchmarkId::new("rainforest", depth), depth, |b, &depth| {
			b.iter(|| compute_lod(&map, black_box(depth), &selector).unwrap())
		});
	}
	group.finish();
}

criterion_group!(benches, bench_compute_lod);
criterion_main!(benches);
