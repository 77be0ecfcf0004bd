//! Known biomes of real worlds, read through the version facade.

mod common;

use seedmap_layers::LayerStack;
use seedmap_testkit::load_corpus;
use seedmap_world::{BiomeId, Engine, Generator, GeneratorOptions, McVersion, TreeRegistry};

fn generator(version: McVersion, seed: u64) -> Generator {
    Generator::with_seed(version, GeneratorOptions::default(), &TreeRegistry::empty(), seed)
        .expect("generator")
}

#[test]
fn seed_111_on_1_12() {
    let g = generator(McVersion::V1_12, 111);
    assert_eq!(g.biome_at(1, 0, 0, 0).unwrap(), BiomeId::DESERT);
    assert_eq!(g.biome_at(1, 1000, 0, 0).unwrap(), BiomeId::PLAINS);
    assert_eq!(g.biome_at(4, 1000, 0, 0).unwrap(), BiomeId::SWAMP);
    assert_eq!(g.biome_at(4, 0, 0, 1000).unwrap(), BiomeId::DEEP_OCEAN);
}

#[test]
fn recorded_reference_cases_match() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/reference_cases.jsonl");
    let cases = load_corpus(path, false).expect("reference corpus");
    assert!(!cases.is_empty());
    let mut failures = Vec::new();
    for case in &cases {
        let options = GeneratorOptions {
            large_biomes: case.large_biomes,
        };
        let g = Generator::with_seed(case.version, options, &TreeRegistry::empty(), case.seed as u64)
            .expect("generator");
        let got = g.biome_at(case.scale, case.x, case.y, case.z).unwrap();
        if got != BiomeId(case.expected) {
            failures.push(format!(
                "{} seed {} 1:{} ({}, {}): expected {}, got {got}",
                case.version,
                case.seed,
                case.scale,
                case.x,
                case.z,
                BiomeId(case.expected)
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn facade_matches_the_layer_stack_at_every_entry_scale() {
    let g = generator(McVersion::V1_16, 2024);
    let stack = LayerStack::with_seed(McVersion::V1_16, false, 2024).unwrap();
    for scale in [1, 4, 16, 64, 256] {
        let ours: Vec<i32> = g
            .area(scale, -7, 3, 9, 6, 0)
            .unwrap()
            .into_iter()
            .map(|b| b.0)
            .collect();
        assert_eq!(ours, stack.area(scale, -7, 3, 9, 6).unwrap(), "scale {scale}");
    }
}

#[test]
fn far_coordinates_are_answered() {
    for version in [McVersion::B1_7, McVersion::V1_7, McVersion::V1_13] {
        let g = generator(version, 7);
        for (x, z) in [(2_500_000, -2_500_000), (-2_500_000, 2_500_000)] {
            let id = g.biome_at(4, x, 0, z).unwrap();
            assert!(id.name().is_some(), "{version}: unnamed {id}");
        }
    }
}

#[test]
fn modern_cells_follow_the_tree() {
    let trees = common::quadrant_registry();
    let g = Generator::with_seed(McVersion::V1_18, GeneratorOptions::default(), &trees, 111)
        .unwrap();
    let Engine::Modern(m) = g.engine() else {
        panic!("1.18 should use the climate engine");
    };
    for (x, z) in [(0, 0), (40, -12), (-300, 77), (1024, 1024)] {
        let q = m.climate_at(x, 0, z).quantize();
        let expected = match (q[0] <= -1, q[1] <= 0) {
            (true, true) => BiomeId::SNOWY_TUNDRA,
            (true, false) => BiomeId::TAIGA,
            (false, true) => BiomeId::DESERT,
            (false, false) => BiomeId::PLAINS,
        };
        assert_eq!(g.biome_at(4, x, 0, z).unwrap(), expected, "cell ({x}, {z})");
    }
}

#[test]
fn every_modern_version_uses_its_registered_tree() {
    let trees = common::quadrant_registry();
    for version in [
        McVersion::V1_18,
        McVersion::V1_19_2,
        McVersion::V1_19,
        McVersion::V1_20,
        McVersion::V1_21_1,
        McVersion::V1_21_3,
        McVersion::V1_21_WD,
    ] {
        let g = Generator::with_seed(version, GeneratorOptions::default(), &trees, 3).unwrap();
        for id in g.area(16, -4, -4, 8, 8, 16).unwrap() {
            assert!(common::QUADRANT_BIOMES.contains(&id), "{version}: {id}");
        }
    }
}
