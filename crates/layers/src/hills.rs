//! Hill and mutated variants, plus rare sunflower plains.

use std::sync::Arc;

use seedmap_core::seed::first_is_zero;
use seedmap_core::{BiomeId, McVersion};

use crate::layer::{cell, fill, Cross, Layer, Padded};
use crate::relations::{are_similar, mutation_of};

pub(crate) fn hills(
    layer: &Layer,
    parent: &Arc<Layer>,
    river: Option<&Arc<Layer>>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    let src = Padded::fetch(parent, x, z, w, h);
    let noise = river.map(|r| r.generate(x, z, w, h));
    fill(w, h, |i, j| {
        let c = src.cross(i, j);
        let cs = layer.seed.chunk(cell(x, i), cell(z, j));
        match &noise {
            Some(noise) => with_river_noise(layer, cs, c, noise[j * w + i]),
            None => early(layer, cs, c),
        }
    })
}

/// Pre-1.7 hills: a third of the cells try their hill form, which only
/// sticks when all four neighbours are similar to the centre.
fn early(layer: &Layer, cs: u64, c: Cross) -> i32 {
    use BiomeId as B;
    if !first_is_zero(cs, 3) {
        return c.center;
    }
    let hill = match B(c.center) {
        B::DESERT => B::DESERT_HILLS,
        B::FOREST => B::WOODED_HILLS,
        B::TAIGA => B::TAIGA_HILLS,
        B::PLAINS => B::FOREST,
        B::SNOWY_TUNDRA => B::SNOWY_MOUNTAINS,
        B::JUNGLE if layer.version() >= McVersion::V1_2 => B::JUNGLE_HILLS,
        _ => return c.center,
    };
    settle(layer.version(), c, hill.0)
}

/// Keep `hill` only if enough neighbours resemble the centre: three for
/// 1.7+, all four before.
fn settle(version: McVersion, c: Cross, hill: i32) -> i32 {
    let needed = if version >= McVersion::V1_7 { 3 } else { 4 };
    let alike = c
        .neighbours()
        .into_iter()
        .filter(|&v| are_similar(version, v, c.center))
        .count();
    if alike >= needed {
        hill
    } else {
        c.center
    }
}

/// 1.7+ hills. The zoomed river noise decides which cells mutate: values
/// `2 + 29k + 1` promote the biome directly, `2 + 29k` mutate the hill form.
fn with_river_noise(layer: &Layer, mut cs: u64, c: Cross, noise: i32) -> i32 {
    use BiomeId as B;
    let version = layer.version();
    let k = c.center;
    let mutate_hill = (noise - 2) % 29 == 0;

    if noise >= 2 && (noise - 2) % 29 == 1 && !B(k).is_shallow_ocean() {
        return mutation_of(version, k).unwrap_or(k);
    }
    if !first_is_zero(cs, 3) && !mutate_hill {
        return k;
    }
    cs = layer.seed.step(cs);

    let mut hill = match B(k) {
        B::DESERT => B::DESERT_HILLS.0,
        B::FOREST => B::WOODED_HILLS.0,
        B::BIRCH_FOREST => B::BIRCH_FOREST_HILLS.0,
        B::DARK_FOREST => B::PLAINS.0,
        B::TAIGA => B::TAIGA_HILLS.0,
        B::GIANT_TREE_TAIGA => B::GIANT_TREE_TAIGA_HILLS.0,
        B::SNOWY_TAIGA => B::SNOWY_TAIGA_HILLS.0,
        B::PLAINS => {
            if first_is_zero(cs, 3) {
                B::WOODED_HILLS.0
            } else {
                B::FOREST.0
            }
        }
        B::SNOWY_TUNDRA => B::SNOWY_MOUNTAINS.0,
        B::JUNGLE => B::JUNGLE_HILLS.0,
        B::BAMBOO_JUNGLE => B::BAMBOO_JUNGLE_HILLS.0,
        B::OCEAN => B::DEEP_OCEAN.0,
        B::LUKEWARM_OCEAN if version >= McVersion::V1_13 => B::DEEP_LUKEWARM_OCEAN.0,
        B::COLD_OCEAN if version >= McVersion::V1_13 => B::DEEP_COLD_OCEAN.0,
        B::FROZEN_OCEAN if version >= McVersion::V1_13 => B::DEEP_FROZEN_OCEAN.0,
        B::MOUNTAINS => B::WOODED_MOUNTAINS.0,
        B::SAVANNA => B::SAVANNA_PLATEAU.0,
        _ if are_similar(version, k, B::WOODED_BADLANDS_PLATEAU.0) => B::BADLANDS.0,
        _ if B(k).is_deep_ocean() && first_is_zero(cs, 3) => {
            cs = layer.seed.step(cs);
            if first_is_zero(cs, 2) {
                B::PLAINS.0
            } else {
                B::FOREST.0
            }
        }
        _ => k,
    };

    if mutate_hill && hill != k {
        hill = mutation_of(version, hill).unwrap_or(k);
    }
    if hill == k {
        return k;
    }
    settle(version, c, hill)
}

pub(crate) fn rare(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    let src = parent.generate(x, z, w, h);
    fill(w, h, |i, j| {
        let v = src[j * w + i];
        if v == BiomeId::PLAINS.0 && first_is_zero(layer.seed.chunk(cell(x, i), cell(z, j)), 57) {
            BiomeId::SUNFLOWER_PLAINS.0
        } else {
            v
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Inputs, Transform};

    fn hills_layer(version: McVersion) -> Layer {
        let source = Arc::new(Layer::new(Transform::Continent, version, 1, 4096, Inputs::Source, 3));
        Layer::new(Transform::Hills, version, 1000, 1024, Inputs::One(source), 3)
    }

    fn uniform(v: i32) -> Cross {
        Cross {
            center: v,
            north: v,
            east: v,
            south: v,
            west: v,
        }
    }

    #[test]
    fn promoting_noise_mutates_without_draws() {
        let layer = hills_layer(McVersion::V1_12);
        let plains = uniform(BiomeId::PLAINS.0);
        for cs in [0u64, 1 << 24, 2 << 24] {
            assert_eq!(
                with_river_noise(&layer, cs, plains, 2 + 29 + 1),
                BiomeId::SUNFLOWER_PLAINS.0
            );
        }
        let mutated = uniform(BiomeId::ICE_SPIKES.0);
        assert_eq!(with_river_noise(&layer, 1 << 24, mutated, 3), BiomeId::ICE_SPIKES.0);
        // Mutated biomes take the promoting branch too, even on a zero draw.
        assert_eq!(with_river_noise(&layer, 0, mutated, 3), BiomeId::ICE_SPIKES.0);
    }

    #[test]
    fn shallow_ocean_skips_promotion_and_draws() {
        let layer = hills_layer(McVersion::V1_12);
        let ocean = uniform(BiomeId::OCEAN.0);
        assert_eq!(with_river_noise(&layer, 0, ocean, 3), BiomeId::DEEP_OCEAN.0);
        assert_eq!(with_river_noise(&layer, 1 << 24, ocean, 3), BiomeId::OCEAN.0);
    }

    #[test]
    fn hill_needs_similar_neighbours() {
        let layer = hills_layer(McVersion::V1_12);
        // A zero draw takes the hill branch; noise below 2 never mutates.
        let desert = uniform(BiomeId::DESERT.0);
        assert_eq!(with_river_noise(&layer, 0, desert, 0), BiomeId::DESERT_HILLS.0);

        let lonely = Cross {
            north: BiomeId::OCEAN.0,
            east: BiomeId::OCEAN.0,
            ..desert
        };
        assert_eq!(with_river_noise(&layer, 0, lonely, 0), BiomeId::DESERT.0);
    }

    #[test]
    fn early_hills_need_a_uniform_patch() {
        let layer = hills_layer(McVersion::V1_4);
        assert_eq!(early(&layer, 0, uniform(BiomeId::JUNGLE.0)), BiomeId::JUNGLE_HILLS.0);
        let mixed = Cross {
            west: BiomeId::RIVER.0,
            ..uniform(BiomeId::TAIGA.0)
        };
        assert_eq!(early(&layer, 0, mixed), BiomeId::TAIGA.0);
        assert_eq!(early(&layer, 1 << 24, uniform(BiomeId::TAIGA.0)), BiomeId::TAIGA.0);
    }

    #[test]
    fn early_hills_accept_similar_neighbours() {
        let layer = hills_layer(McVersion::V1_2);
        let patch = Cross {
            north: BiomeId::SNOWY_MOUNTAINS.0,
            ..uniform(BiomeId::SNOWY_TUNDRA.0)
        };
        assert_eq!(early(&layer, 0, patch), BiomeId::SNOWY_MOUNTAINS.0);

        // Three similar neighbours are enough from 1.7 on, not before.
        let edge = Cross {
            east: BiomeId::OCEAN.0,
            ..uniform(BiomeId::DESERT.0)
        };
        assert_eq!(early(&layer, 0, edge), BiomeId::DESERT.0);
        assert_eq!(
            with_river_noise(&hills_layer(McVersion::V1_12), 0, edge, 0),
            BiomeId::DESERT_HILLS.0
        );
    }
}
