//! Registries built from tree table directories.

mod common;

use std::path::PathBuf;

use seedmap_world::{Generator, GeneratorOptions, McVersion, TreeRegistry};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("seedmap-world-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn header_tables_in_a_directory_serve_modern_versions() {
    let dir = scratch_dir("tables");
    std::fs::write(dir.join("btree18.h"), common::QUADRANT_TREE).unwrap();
    std::fs::write(dir.join("btree20.h"), common::QUADRANT_TREE).unwrap();
    std::fs::write(dir.join("README.md"), "not a tree").unwrap();

    let trees = TreeRegistry::load(&dir).unwrap();
    assert_eq!(trees.names().collect::<Vec<_>>(), ["btree18", "btree20"]);
    assert_eq!(trees.tree_for(McVersion::V1_18).map(|t| t.order()), Some(10));

    for version in [McVersion::V1_18, McVersion::V1_21_3] {
        let g = Generator::with_seed(version, GeneratorOptions::default(), &trees, 111).unwrap();
        for id in g.area(4, -8, -8, 16, 16, 16).unwrap() {
            assert!(common::QUADRANT_BIOMES.contains(&id), "{version}: {id}");
        }
    }
    // Tables for 1.19 were not provided.
    assert!(Generator::with_seed(McVersion::V1_19, GeneratorOptions::default(), &trees, 111).is_err());

    std::fs::remove_dir_all(&dir).ok();
}
