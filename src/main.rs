use quadtree_bitmap::error::InputError;
use quadtree_bitmap::{input, Quadtree, Raster};

use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;

use std::io::{Read, Write};

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// `clap`-based CLI for listing the black regions of an image.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image data
///
/// 10: other, potentially unknown error
fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let clap_matches = clap::App::new("quadtree_bitmap")
		.version(env!("CARGO_PKG_VERSION"))
		.about("Decomposes a black and white image into a region quadtree and lists its black regions.")
		.arg_from_usage("-d, --decode 'Read INPUT as a QTB file instead of a text image description'")
		.arg_from_usage("-p, --png=[PATH] 'Write the image rebuilt from the black regions as a PNG'")
		.arg_from_usage("-s, --scale=[N] 'PNG pixels per image cell (--png only); must be a power of two; defaults to 8'")
		.arg_from_usage("-e, --encode=[PATH] 'Write the quadtree as a QTB file'")
		.arg_from_usage("-q, --quiet 'Do not list the black regions'")
		.arg_from_usage("<INPUT> 'Path to input file'")
		.get_matches();

	let input_path = match clap_matches.value_of("INPUT") {
		Some(p) => p,
		None => error_exit("No input file given", 2),
	};
	let scale = match clap_matches.value_of("scale").unwrap_or("8").parse::<u32>() {
		Ok(n) if n.is_power_of_two() => n,
		Ok(_) => error_exit("Scale must be a power of two", 2),
		Err(_) => error_exit("Non-numeric value for scale", 2),
	};

	let (tree, found, side) = if clap_matches.is_present("decode") {
		let mut source_data = Vec::new();
		let mut source_fh = match File::open(input_path) {
			Ok(f) => f,
			Err(_) => error_exit("File not found or could not be read", 3),
		};
		if source_fh.read_to_end(&mut source_data).is_err() {
			error_exit("Could not read from input file", 3)
		}
		let (tree, side) = match Quadtree::from_qtb(&source_data) {
			Ok(t) => t,
			Err(e) => error_exit(&format!("Invalid QTB data: {}", e), 4),
		};
		let found = tree.discoveries(side);
		(tree, found, side)
	} else {
		let raster = match input::read_file(input_path) {
			Ok(r) => r,
			Err(InputError::Io(_)) => error_exit("File not found or could not be read", 3),
			Err(e) => error_exit(&format!("{}. Program exit", e), 4),
		};
		let side = raster.side();
		let (tree, found) = match Quadtree::from_raster(raster) {
			Ok(t) => t,
			Err(e) => error_exit(&e.to_string(), 4),
		};
		(tree, found, side)
	};
	info!(
		side,
		regions = found.len(),
		leaves = tree.leaf_count(),
		black_cells = tree.black_area(side),
		"decomposed image"
	);

	if !clap_matches.is_present("quiet") {
		let stdout = std::io::stdout();
		let mut out = stdout.lock();
		for d in &found {
			if writeln!(out, "{}", d).is_err() {
				error_exit("Could not write to standard output", 3)
			}
		}
	}

	if let Some(path) = clap_matches.value_of("png") {
		let rebuilt = match Raster::from_discoveries(side, &found) {
			Ok(r) => r,
			Err(e) => error_exit(&e.to_string(), 4),
		};
		let img = match rebuilt.to_image(scale) {
			Ok(i) => i,
			Err(e) => error_exit(&e.to_string(), 2),
		};
		if img.save(path).is_err() {
			error_exit("Could not save output", 3)
		}
	}

	if let Some(path) = clap_matches.value_of("encode") {
		let qtb_data = match tree.to_qtb(side) {
			Ok(d) => d,
			Err(e) => error_exit(&e.to_string(), 10),
		};
		let mut out_fh = match File::create(path) {
			Ok(f) => f,
			Err(_) => error_exit("Could not open output file", 3),
		};
		if out_fh.write_all(&qtb_data).is_err() {
			error_exit("Could not write to output file", 3)
		}
	}
}
