//! River noise, its edges, smoothing, and the final overlay onto biomes.

use std::sync::Arc;

use seedmap_core::seed::{first_int, first_is_zero};
use seedmap_core::{BiomeId, McVersion};

use crate::layer::{cell, fill, Layer, Padded};
use crate::relations::is_oceanic;

/// Random values on land that zooming turns into river noise. Before 1.7
/// the noise only has two levels.
pub(crate) fn init(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    let levels = if layer.version() < McVersion::V1_7 { 2 } else { 299_999 };
    let src = parent.generate(x, z, w, h);
    fill(w, h, |i, j| {
        if src[j * w + i] > 0 {
            first_int(layer.seed.chunk(cell(x, i), cell(z, j)), levels) + 2
        } else {
            0
        }
    })
}

/// Folds river noise to parity classes, so a river runs wherever the
/// class changes.
#[inline]
fn parity(v: i32) -> i32 {
    if v >= 2 {
        2 + (v & 1)
    } else {
        v
    }
}

pub(crate) fn river(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    let legacy = layer.version() < McVersion::V1_7;
    let src = Padded::fetch(parent, x, z, w, h);
    fill(w, h, |i, j| {
        let c = src.cross(i, j);
        let flat = if legacy {
            c.center != 0 && c.all(|v| v == c.center)
        } else {
            let center = parity(c.center);
            c.all(|v| parity(v) == center)
        };
        if flat {
            BiomeId::NONE.0
        } else {
            BiomeId::RIVER.0
        }
    })
}

pub(crate) fn smooth(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    let src = Padded::fetch(parent, x, z, w, h);
    fill(w, h, |i, j| {
        let c = src.cross(i, j);
        let across = c.west == c.east;
        let along = c.north == c.south;
        if across && along {
            let cs = layer.seed.chunk(cell(x, i), cell(z, j));
            if first_is_zero(cs, 2) {
                c.west
            } else {
                c.north
            }
        } else if along {
            c.north
        } else if across {
            c.west
        } else {
            c.center
        }
    })
}

pub(crate) fn swamp(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    use BiomeId as B;
    let src = parent.generate(x, z, w, h);
    fill(w, h, |i, j| {
        let v = src[j * w + i];
        let odds = match B(v) {
            B::SWAMP => 6,
            B::JUNGLE | B::JUNGLE_HILLS => 8,
            _ => return v,
        };
        if first_is_zero(layer.seed.chunk(cell(x, i), cell(z, j)), odds) {
            B::RIVER.0
        } else {
            v
        }
    })
}

pub(crate) fn mix(
    layer: &Layer,
    biomes: &Arc<Layer>,
    rivers: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    use BiomeId as B;
    let legacy = layer.version() < McVersion::V1_7;
    let land = biomes.generate(x, z, w, h);
    let water = rivers.generate(x, z, w, h);
    fill(w, h, |i, j| {
        let v = land[j * w + i];
        let sea = if legacy { v == B::OCEAN.0 } else { is_oceanic(v) };
        if sea || water[j * w + i] != B::RIVER.0 {
            return v;
        }
        match B(v) {
            B::SNOWY_TUNDRA => B::FROZEN_RIVER.0,
            B::MUSHROOM_FIELDS | B::MUSHROOM_FIELD_SHORE => B::MUSHROOM_FIELD_SHORE.0,
            _ => B::RIVER.0,
        }
    })
}
