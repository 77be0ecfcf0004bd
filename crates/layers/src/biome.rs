//! Climate classes become concrete biomes, and biome edges get their
//! transition variants.

use std::sync::Arc;

use seedmap_core::seed::{first_int, first_is_zero};
use seedmap_core::{BiomeId, McVersion};

use crate::layer::{cell, fill, Layer, Padded};
use crate::relations::{are_similar, is_oceanic};

const WARM: [BiomeId; 6] = [
    BiomeId::DESERT,
    BiomeId::DESERT,
    BiomeId::DESERT,
    BiomeId::SAVANNA,
    BiomeId::SAVANNA,
    BiomeId::PLAINS,
];
const TEMPERATE: [BiomeId; 6] = [
    BiomeId::FOREST,
    BiomeId::DARK_FOREST,
    BiomeId::MOUNTAINS,
    BiomeId::PLAINS,
    BiomeId::BIRCH_FOREST,
    BiomeId::SWAMP,
];
const COLD: [BiomeId; 4] = [
    BiomeId::FOREST,
    BiomeId::MOUNTAINS,
    BiomeId::TAIGA,
    BiomeId::PLAINS,
];
const FREEZING: [BiomeId; 4] = [
    BiomeId::SNOWY_TUNDRA,
    BiomeId::SNOWY_TUNDRA,
    BiomeId::SNOWY_TUNDRA,
    BiomeId::SNOWY_TAIGA,
];

/// Land biomes before 1.7. Jungle joined the list in 1.2.
const EARLY_LAND: [BiomeId; 7] = [
    BiomeId::DESERT,
    BiomeId::FOREST,
    BiomeId::MOUNTAINS,
    BiomeId::SWAMP,
    BiomeId::PLAINS,
    BiomeId::TAIGA,
    BiomeId::JUNGLE,
];

fn pick(cs: u64, list: &[BiomeId]) -> i32 {
    list[first_int(cs, list.len() as i32) as usize].0
}

pub(crate) fn biome(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    let version = layer.version();
    let src = parent.generate(x, z, w, h);
    fill(w, h, |i, j| {
        let v = src[j * w + i];
        let cs = layer.seed.chunk(cell(x, i), cell(z, j));
        if version < McVersion::V1_7 {
            early_biome(version, cs, v)
        } else {
            climate_biome(cs, v)
        }
    })
}

fn early_biome(version: McVersion, cs: u64, v: i32) -> i32 {
    if v == 0 || v == BiomeId::MUSHROOM_FIELDS.0 {
        return v;
    }
    let land: &[BiomeId] = if version >= McVersion::V1_2 {
        &EARLY_LAND
    } else {
        &EARLY_LAND[..6]
    };
    if v == 1 {
        return pick(cs, land);
    }
    // Snowy land keeps taiga and freezes everything else. 1.0 and 1.1 never
    // kept taiga here.
    let picked = pick(cs, land);
    if version >= McVersion::V1_2 && picked == BiomeId::TAIGA.0 {
        picked
    } else {
        BiomeId::SNOWY_TUNDRA.0
    }
}

fn climate_biome(cs: u64, v: i32) -> i32 {
    let special = (v & 0xF00) >> 8;
    let v = v & !0xF00;
    if is_oceanic(v) || v == BiomeId::MUSHROOM_FIELDS.0 {
        return v;
    }
    match v {
        1 if special > 0 => {
            if first_is_zero(cs, 3) {
                BiomeId::BADLANDS_PLATEAU.0
            } else {
                BiomeId::WOODED_BADLANDS_PLATEAU.0
            }
        }
        1 => pick(cs, &WARM),
        2 if special > 0 => BiomeId::JUNGLE.0,
        2 => pick(cs, &TEMPERATE),
        3 if special > 0 => BiomeId::GIANT_TREE_TAIGA.0,
        3 => pick(cs, &COLD),
        4 => pick(cs, &FREEZING),
        _ => BiomeId::MUSHROOM_FIELDS.0,
    }
}

pub(crate) fn bamboo(
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
        if v == BiomeId::JUNGLE.0 && first_is_zero(layer.seed.chunk(cell(x, i), cell(z, j)), 10) {
            BiomeId::BAMBOO_JUNGLE.0
        } else {
            v
        }
    })
}

pub(crate) fn edge(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    use BiomeId as B;
    let version = layer.version();
    let src = Padded::fetch(parent, x, z, w, h);
    // Plateaus and giant taiga fade into their lowland form unless every
    // neighbour belongs with them.
    let fades = [
        (B::WOODED_BADLANDS_PLATEAU, B::BADLANDS),
        (B::BADLANDS_PLATEAU, B::BADLANDS),
        (B::GIANT_TREE_TAIGA, B::TAIGA),
    ];
    fill(w, h, |i, j| {
        let c = src.cross(i, j);
        for (base, lowland) in fades {
            if c.center == base.0 {
                return if c.all(|v| are_similar(version, v, base.0)) {
                    c.center
                } else {
                    lowland.0
                };
            }
        }
        match B(c.center) {
            B::DESERT if c.any(|v| v == B::SNOWY_TUNDRA.0) => B::WOODED_MOUNTAINS.0,
            B::SWAMP => {
                if c.any(|v| v == B::DESERT.0 || v == B::SNOWY_TAIGA.0 || v == B::SNOWY_TUNDRA.0) {
                    B::PLAINS.0
                } else if c.any(|v| v == B::JUNGLE.0 || v == B::BAMBOO_JUNGLE.0) {
                    B::JUNGLE_EDGE.0
                } else {
                    c.center
                }
            }
            _ => c.center,
        }
    })
}
