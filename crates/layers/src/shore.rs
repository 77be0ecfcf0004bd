//! Beaches, shores and mountain edges where land meets ocean.

use std::sync::Arc;

use seedmap_core::{BiomeId, McVersion};

use crate::layer::{fill, Cross, Layer, Padded};
use crate::relations::{category, is_oceanic};

pub(crate) fn shore(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    let version = layer.version();
    let src = Padded::fetch(parent, x, z, w, h);
    fill(w, h, |i, j| {
        let c = src.cross(i, j);
        if c.center == BiomeId::MUSHROOM_FIELDS.0 {
            return if c.any(|v| v == BiomeId::OCEAN.0) {
                BiomeId::MUSHROOM_FIELD_SHORE.0
            } else {
                c.center
            };
        }
        match version {
            McVersion::V1_0 => c.center,
            v if v < McVersion::V1_7 => early_shore(c),
            _ => shore_cell(version, c),
        }
    })
}

fn early_shore(c: Cross) -> i32 {
    use BiomeId as B;
    match B(c.center) {
        B::MOUNTAINS if c.any(|v| v != B::MOUNTAINS.0) => B::MOUNTAIN_EDGE.0,
        B::MOUNTAINS | B::OCEAN | B::RIVER | B::SWAMP => c.center,
        _ if c.any(|v| v == B::OCEAN.0) => B::BEACH.0,
        _ => c.center,
    }
}

fn shore_cell(version: McVersion, c: Cross) -> i32 {
    use BiomeId as B;
    let k = c.center;
    let coastal = |replacement: B| {
        if !is_oceanic(k) && c.any(is_oceanic) {
            replacement.0
        } else {
            k
        }
    };

    if category(version, k) == Some(B::JUNGLE) {
        let compatible = |v: i32| {
            category(version, v) == Some(B::JUNGLE)
                || v == B::FOREST.0
                || v == B::TAIGA.0
                || is_oceanic(v)
        };
        return if !c.all(compatible) {
            B::JUNGLE_EDGE.0
        } else if c.any(is_oceanic) {
            B::BEACH.0
        } else {
            k
        };
    }
    match B(k) {
        B::MOUNTAINS | B::WOODED_MOUNTAINS | B::MOUNTAIN_EDGE => coastal(B::STONE_SHORE),
        _ if B(k).is_snowy() => coastal(B::SNOWY_BEACH),
        B::BADLANDS | B::WOODED_BADLANDS_PLATEAU => {
            if c.any(is_oceanic) || c.all(|v| BiomeId(v).is_mesa()) {
                k
            } else {
                B::DESERT.0
            }
        }
        B::OCEAN | B::DEEP_OCEAN | B::RIVER | B::SWAMP => k,
        _ if c.any(is_oceanic) => B::BEACH.0,
        _ => k,
    }
}
