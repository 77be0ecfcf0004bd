//! Continent shaping at the coarse scales.

use std::sync::Arc;

use seedmap_core::seed::{first_int, first_is_zero};
use seedmap_core::{BiomeId, McVersion};

use crate::layer::{cell, fill, Layer, Padded};

pub(crate) fn continent(layer: &Layer, x: i32, z: i32, w: usize, h: usize) -> Vec<i32> {
    fill(w, h, |i, j| {
        let (cx, cz) = (cell(x, i), cell(z, j));
        if cx == 0 && cz == 0 {
            return 1;
        }
        first_is_zero(layer.seed.chunk(cx, cz), 10) as i32
    })
}

/// Coast growth driven by the four diagonal neighbours.
///
/// Before 1.7 the eroded or unclaimed cells next to snow become frozen ocean;
/// afterwards forest-class cells (value 4) survive instead.
pub(crate) fn land(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    let legacy_snow = layer.version() < McVersion::V1_7;
    let sink = |v: i32| -> i32 {
        if legacy_snow {
            if v == BiomeId::SNOWY_TUNDRA.0 {
                BiomeId::FROZEN_OCEAN.0
            } else {
                0
            }
        } else if v == 4 {
            4
        } else {
            0
        }
    };

    let src = Padded::fetch(parent, x, z, w, h);
    fill(w, h, |i, j| {
        let diagonals = src.diagonals(i, j);
        let center = src.at(i, j, 0, 0);
        let mut cs = layer.seed.chunk(cell(x, i), cell(z, j));

        if center != 0 || diagonals.iter().all(|&d| d == 0) {
            if center > 0 && diagonals.contains(&0) && first_is_zero(cs, 5) {
                return sink(center);
            }
            return center;
        }

        let mut candidates = 1;
        let mut v = 1;
        for d in diagonals {
            if d != 0 {
                if first_int(cs, candidates) == 0 {
                    v = d;
                }
                candidates += 1;
                cs = layer.seed.step(cs);
            }
        }
        if first_is_zero(cs, 3) {
            v
        } else {
            sink(v)
        }
    })
}

pub(crate) fn remove_too_much_ocean(
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
        if c.center == 0 && c.all(|v| v == 0) {
            let cs = layer.seed.chunk(cell(x, i), cell(z, j));
            if first_is_zero(cs, 2) {
                return 1;
            }
        }
        c.center
    })
}

pub(crate) fn mushroom(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    let src = Padded::fetch(parent, x, z, w, h);
    fill(w, h, |i, j| {
        let center = src.at(i, j, 0, 0);
        if center == 0 && src.diagonals(i, j).iter().all(|&d| d == 0) {
            let cs = layer.seed.chunk(cell(x, i), cell(z, j));
            if first_is_zero(cs, 100) {
                return BiomeId::MUSHROOM_FIELDS.0;
            }
        }
        center
    })
}

pub(crate) fn deep_ocean(parent: &Arc<Layer>, x: i32, z: i32, w: usize, h: usize) -> Vec<i32> {
    let src = Padded::fetch(parent, x, z, w, h);
    fill(w, h, |i, j| {
        let c = src.cross(i, j);
        if c.center == 0 && c.all(|v| v == 0) {
            BiomeId::DEEP_OCEAN.0
        } else {
            c.center
        }
    })
}
