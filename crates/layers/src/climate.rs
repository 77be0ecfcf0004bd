//! Climate classes on land: 1 warm, 2 temperate, 3 cold, 4 freezing.
//!
//! Before 1.7 land is only split into plains and snowy tundra.

use std::sync::Arc;

use seedmap_core::seed::{first_int, first_is_zero};
use seedmap_core::{BiomeId, McVersion};

use crate::layer::{cell, fill, Layer, Padded};

pub(crate) fn snow(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    let legacy = layer.version() < McVersion::V1_7;
    let src = parent.generate(x, z, w, h);
    fill(w, h, |i, j| {
        let v = src[j * w + i];
        if v == 0 {
            return 0;
        }
        let cs = layer.seed.chunk(cell(x, i), cell(z, j));
        if legacy {
            return if first_is_zero(cs, 5) {
                BiomeId::SNOWY_TUNDRA.0
            } else {
                1
            };
        }
        match first_int(cs, 6) {
            0 => 4,
            1 => 3,
            _ => 1,
        }
    })
}

pub(crate) fn cool(parent: &Arc<Layer>, x: i32, z: i32, w: usize, h: usize) -> Vec<i32> {
    let src = Padded::fetch(parent, x, z, w, h);
    fill(w, h, |i, j| {
        let c = src.cross(i, j);
        if c.center == 1 && c.any(|v| v == 3 || v == 4) {
            2
        } else {
            c.center
        }
    })
}

pub(crate) fn heat(parent: &Arc<Layer>, x: i32, z: i32, w: usize, h: usize) -> Vec<i32> {
    let src = Padded::fetch(parent, x, z, w, h);
    fill(w, h, |i, j| {
        let c = src.cross(i, j);
        if c.center == 4 && c.any(|v| v == 1 || v == 2) {
            3
        } else {
            c.center
        }
    })
}

/// Tags roughly one land cell in thirteen with a variant number in bits
/// 8..12, which the biome layer turns into the rare climate biomes.
pub(crate) fn special(
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
        if v == 0 {
            return 0;
        }
        let mut cs = layer.seed.chunk(cell(x, i), cell(z, j));
        if !first_is_zero(cs, 13) {
            return v;
        }
        cs = layer.seed.step(cs);
        v | (((1 + first_int(cs, 15)) << 8) & 0xF00)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Inputs, Transform};

    fn continent(world_seed: u64) -> Arc<Layer> {
        Arc::new(Layer::new(
            Transform::Continent,
            McVersion::V1_12,
            1,
            4096,
            Inputs::Source,
            world_seed,
        ))
    }

    #[test]
    fn snow_keeps_ocean_and_assigns_classes() {
        let parent = continent(5);
        let layer = Layer::new(
            Transform::Snow,
            McVersion::V1_12,
            2,
            4096,
            Inputs::One(parent.clone()),
            5,
        );
        let src = parent.generate(-8, -8, 16, 16);
        let out = snow(&layer, &parent, -8, -8, 16, 16);
        for (v, s) in out.iter().zip(src) {
            if s == 0 {
                assert_eq!(*v, 0);
            } else {
                assert!(matches!(v, 1 | 3 | 4), "{v}");
            }
        }
    }

    #[test]
    fn legacy_snow_only_yields_plains_or_tundra() {
        let parent = continent(9);
        let layer = Layer::new(
            Transform::Snow,
            McVersion::V1_5,
            2,
            4096,
            Inputs::One(parent.clone()),
            9,
        );
        let out = snow(&layer, &parent, 0, 0, 12, 12);
        assert!(out.iter().all(|v| matches!(v, 0 | 1 | 12)));
        assert_ne!(out[0], 0, "origin is always land");
    }
}
