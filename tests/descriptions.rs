use quadtree_bitmap::{input, Quadtree};

fn listing(description: &str) -> Vec<String> {
	let raster = input::parse(description).unwrap();
	let (_, found) = Quadtree::from_raster(raster).unwrap();
	found.iter().map(|d| d.to_string()).collect()
}

#[test]
fn one_black_corner() {
	assert_eq!(listing("2\n1\n0 0\n"), vec!["Position (0,0), Width 1, is all black"]);
}

#[test]
fn black_left_half() {
	let description = "4\n8\n0 0\n0 1\n0 2\n0 3\n1 0\n1 1\n1 2\n1 3\n";
	assert_eq!(listing(description), vec![
		"Position (0,1), Width 2, is all black",
		"Position (0,3), Width 2, is all black",
	]);
}

#[test]
fn checkerboard() {
	let mut description = String::from("8\n32\n");
	for x in 0..8 {
		for y in 0..8 {
			if (x + y) % 2 == 0 {
				description.push_str(&format!("{} {}\n", x, y));
			}
		}
	}
	let found = listing(&description);
	assert_eq!(found.len(), 32);
	assert!(found.iter().all(|l| l.ends_with("Width 1, is all black")));
	assert_eq!(found[0], "Position (0,0), Width 1, is all black");
	assert_eq!(found[1], "Position (1,1), Width 1, is all black");
}

#[test]
fn mixed_sizes() {
	// 8x8: the NE 4x4 quadrant is black, plus one cell in the SW quadrant
	let mut description = String::from("8\n17\n");
	for x in 4..8 {
		for y in 0..4 {
			description.push_str(&format!("{} {}\n", x, y));
		}
	}
	description.push_str("1 6\n");
	assert_eq!(listing(&description), vec![
		"Position (4,3), Width 4, is all black",
		"Position (1,6), Width 1, is all black",
	]);
}

#[test]
fn description_file() {
	let path = std::env::temp_dir().join(format!("quadtree_bitmap_{}.txt", std::process::id()));
	std::fs::write(&path, "4\n2\n3 0\n0 3\n").unwrap();
	let raster = input::read_file(&path).unwrap();
	std::fs::remove_file(&path).unwrap();
	let (tree, found) = Quadtree::from_raster(raster).unwrap();
	assert_eq!(found.len(), 2);
	assert_eq!(tree.depth(), 3);
	assert_eq!(tree.leaf_count(), 10);
}
