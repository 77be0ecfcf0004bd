//! Ocean temperatures (1.13+).

use std::sync::Arc;

use seedmap_core::BiomeId;

use crate::layer::{cell, fill, Layer};
use crate::relations::is_oceanic;

/// Perlin temperature bands, sampled at an eighth of the cell coordinate.
pub(crate) fn temperature(layer: &Layer, x: i32, z: i32, w: usize, h: usize) -> Vec<i32> {
    let Some(noise) = &layer.noise else {
        return vec![BiomeId::OCEAN.0; w * h];
    };
    fill(w, h, |i, j| {
        let t = noise.sample(
            cell(x, i) as f64 / 8.0,
            cell(z, j) as f64 / 8.0,
            0.0,
            0.0,
            0.0,
        );
        let band = if t > 0.4 {
            BiomeId::WARM_OCEAN
        } else if t > 0.2 {
            BiomeId::LUKEWARM_OCEAN
        } else if t < -0.4 {
            BiomeId::FROZEN_OCEAN
        } else if t < -0.2 {
            BiomeId::COLD_OCEAN
        } else {
            BiomeId::OCEAN
        };
        band.0
    })
}

/// Margin of land the mix inspects around each cell.
const REACH: usize = 8;

/// Replaces ocean with its temperature band. Warm and frozen water within
/// eight cells of land is moderated, and deep ocean keeps its depth.
pub(crate) fn mix(
    biomes: &Arc<Layer>,
    temperatures: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    use BiomeId as B;
    let stride = w + 2 * REACH;
    let land = biomes.generate(
        x.wrapping_sub(REACH as i32),
        z.wrapping_sub(REACH as i32),
        stride,
        h + 2 * REACH,
    );
    let water = temperatures.generate(x, z, w, h);
    fill(w, h, |i, j| {
        let here = land[(j + REACH) * stride + i + REACH];
        if !is_oceanic(here) {
            return here;
        }
        let t = water[j * w + i];
        let near_land = (0..=2 * REACH)
            .step_by(4)
            .flat_map(|dz| (0..=2 * REACH).step_by(4).map(move |dx| (dx, dz)))
            .any(|(dx, dz)| !is_oceanic(land[(j + dz) * stride + i + dx]));
        if near_land {
            if t == B::WARM_OCEAN.0 {
                return B::LUKEWARM_OCEAN.0;
            }
            if t == B::FROZEN_OCEAN.0 {
                return B::COLD_OCEAN.0;
            }
        }
        if here == B::DEEP_OCEAN.0 {
            let deep = match B(t) {
                B::LUKEWARM_OCEAN => B::DEEP_LUKEWARM_OCEAN,
                B::OCEAN => B::DEEP_OCEAN,
                B::COLD_OCEAN => B::DEEP_COLD_OCEAN,
                B::FROZEN_OCEAN => B::DEEP_FROZEN_OCEAN,
                _ => B(t),
            };
            return deep.0;
        }
        t
    })
}
