//! Known biomes of real worlds, cross-checked against the game.

use seedmap_core::{BiomeId, McVersion};
use seedmap_layers::LayerStack;

#[test]
fn seed_111_on_1_12() {
    let stack = LayerStack::with_seed(McVersion::V1_12, false, 111).unwrap();
    assert_eq!(stack.biome_at(1, 0, 0).unwrap(), BiomeId::DESERT.0);
    assert_eq!(stack.biome_at(1, 1000, 0).unwrap(), BiomeId::PLAINS.0);
    // Coordinates are cells of the queried scale.
    assert_eq!(stack.biome_at(4, 1000, 0).unwrap(), BiomeId::SWAMP.0);
    assert_eq!(stack.biome_at(4, 0, 1000).unwrap(), BiomeId::DEEP_OCEAN.0);
}

#[test]
fn biome_cells_on_1_12() {
    // (seed, 1:4 cell x, cell z, biome)
    let cases: [(u64, i32, i32, BiomeId); 7] = [
        (111, 25, 25, BiomeId::DESERT),
        (111, -13, -13, BiomeId::DESERT_HILLS),
        (123, 0, 0, BiomeId::FOREST),
        (123, 25, 25, BiomeId::SUNFLOWER_PLAINS),
        (789, 0, 0, BiomeId::OCEAN),
        (789, 25, 25, BiomeId::RIVER),
        (1234567890, 0, 0, BiomeId::BIRCH_FOREST_HILLS),
    ];
    for (seed, x, z, expected) in cases {
        let stack = LayerStack::with_seed(McVersion::V1_12, false, seed).unwrap();
        let got = stack.biome_at(4, x, z).unwrap();
        assert_eq!(
            BiomeId(got),
            expected,
            "seed {seed} at cell ({x}, {z}) gave {}",
            BiomeId(got)
        );
    }
}

#[test]
fn legacy_outputs_are_known_biomes() {
    for version in [McVersion::V1_2, McVersion::V1_8, McVersion::V1_13, McVersion::V1_17] {
        let stack = LayerStack::with_seed(version, false, 42).unwrap();
        for v in stack.area(4, -32, -32, 64, 64).unwrap() {
            assert!(BiomeId(v).name().is_some(), "{version}: unknown id {v}");
        }
    }
}
