use image::error::ImageError;

use quadtree_lod::bitmap;
use quadtree_lod::error::{BatchError, LoadError, LodError};
use quadtree_lod::remap::TileRemap;
use quadtree_lod::select::{Majority, Selector, WeightedMerge};

use tracing_subscriber::EnvFilter;

use std::path::Path;

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// Installs the log subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbosity: u64) {
	let level = match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

/// `clap`-based CLI for generating LOD files from a map.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid map data
///
/// 10: other, potentially unknown error
fn main() {
	let clap_matches = clap::App::new("quadtree_lod")
		.version("0.1.0")
		.author("vkcz")
		.about("Reduces a color-indexed square map into quadtree LOD tile files (0.lod, 1.lod, ...).")
		.arg_from_usage("-o, --out-dir=[DIR] 'Directory to write LOD files into; defaults to the current directory'")
		.arg_from_usage("-m, --majority 'Use the plain most-common color instead of the Rainforest terrain weighting'")
		.arg_from_usage("-r, --raw-colors 'Write selected map colors as-is instead of Rainforest tile codes'")
		.arg_from_usage("-p, --preview=[SCALE] 'Also write a grayscale PNG per level, SCALE pixels per tile'")
		.arg_from_usage("-j, --threads=[N] 'Number of worker threads; defaults to one per CPU'")
		.arg_from_usage("-v, --verbose... 'Log more; repeat for more detail'")
		.arg_from_usage("<MAP> 'Path to the map: raw bytes (one per pixel, square), or an 8-bit grayscale image'")
		.arg_from_usage("<MAX_LOD> 'Number of LOD levels to generate; level N is subdivided N + 1 times'")
		.get_matches();

	init_logging(clap_matches.occurrences_of("verbose"));

	let max_lod: u32 = match clap_matches.value_of("MAX_LOD").unwrap_or("").parse() {
		Ok(n) => n,
		Err(_) => error_exit("Non-numeric value for MAX_LOD", 2)
	};
	let preview_scale = match clap_matches.value_of("preview").map(str::parse::<u32>) {
		None => None,
		Some(Ok(n)) if n > 0 => Some(n),
		Some(_) => error_exit("Preview scale must be a positive number", 2)
	};
	if let Some(threads) = clap_matches.value_of("threads") {
		let threads = match threads.parse() {
			Ok(n) => n,
			Err(_) => error_exit("Non-numeric value for threads", 2)
		};
		if rayon::ThreadPoolBuilder::new().num_threads(threads).build_global().is_err() {
			error_exit("Could not start worker threads", 10);
		}
	}
	let out_dir = Path::new(clap_matches.value_of("out-dir").unwrap_or("."));

	let map_path = clap_matches.value_of("MAP").unwrap_or("");
	let map = match bitmap::load_map(map_path) {
		Ok(m) => m,
		Err(e) => {
			let code = match e {
				LoadError::Io(_) | LoadError::Image(ImageError::IoError(_)) => 3,
				_ => 4
			};
			error_exit(&format!("Could not load {}: {}", map_path, e), code)
		}
	};
	tracing::info!(map = map_path, side = bitmap::ColorGrid::side(&map), max_lod, "processing map");

	let selector: Box<dyn Selector> = if clap_matches.is_present("majority") {
		Box::new(Majority)
	} else {
		Box::new(WeightedMerge::rainforest())
	};
	let remap = if clap_matches.is_present("raw-colors") {
		TileRemap::identity()
	} else {
		TileRemap::rainforest()
	};

	match quadtree_lod::write_levels(&map, max_lod, selector.as_ref(), &remap, out_dir, preview_scale) {
		Ok(paths) => tracing::info!(files = paths.len(), "done"),
		Err(e) => {
			let code = match e {
				BatchError::Level { source: LodError::InvalidSubdivision { .. }, .. } => 2,
				BatchError::Level { .. } => 4,
				BatchError::Write { .. } | BatchError::Preview { .. } => 3
			};
			error_exit(&e.to_string(), code)
		}
	}
}
