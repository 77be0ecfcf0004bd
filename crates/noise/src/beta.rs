//! Beta 1.7 climate and sea-level terrain noise.
//!
//! Climate comes from three simplex octave stacks. Whether a column sits
//! above sea level is decided by the terrain density at noise heights 7 and
//! 8, blended through the era's continentalness remap.

use seedmap_core::JavaRandom;

use crate::octave::OctaveNoise;

/// Temperature and humidity of one block column, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaClimate {
    /// Temperature.
    pub temperature: f64,
    /// Humidity (not yet scaled by temperature).
    pub humidity: f64,
}

/// The three climate octave stacks.
#[derive(Debug, Clone)]
pub struct BetaClimateNoise {
    temperature: OctaveNoise,
    humidity: OctaveNoise,
    detail: OctaveNoise,
}

impl BetaClimateNoise {
    /// Seed the climate stacks for a world.
    pub fn new(seed: i64) -> Self {
        let temperature = OctaveNoise::beta(
            &mut JavaRandom::new(seed.wrapping_mul(9871)),
            4,
            0.025 / 1.5,
            0.25,
            0.55,
            2.0,
        );
        let humidity = OctaveNoise::beta(
            &mut JavaRandom::new(seed.wrapping_mul(39811)),
            4,
            0.05 / 1.5,
            1.0 / 3.0,
            0.55,
            2.0,
        );
        let detail = OctaveNoise::beta(
            &mut JavaRandom::new(seed.wrapping_mul(543321)),
            2,
            0.25 / 1.5,
            10.0 / 17.0,
            0.55,
            2.0,
        );
        Self {
            temperature,
            humidity,
            detail,
        }
    }

    /// Climate at block `(x, z)`.
    pub fn sample(&self, x: i32, z: i32) -> BetaClimate {
        let (x, z) = (x as f64, z as f64);
        let t = self.temperature.sample_beta_climate(x, z);
        let h = self.humidity.sample_beta_climate(x, z);
        let f = self.detail.sample_beta_climate(x, z) * 1.1 + 0.5;

        let mut t = (t * 0.15 + 0.7) * 0.99 + f * 0.01;
        t = 1.0 - (1.0 - t) * (1.0 - t);
        let h = (h * 0.15 + 0.5) * 0.998 + f * 0.002;
        BetaClimate {
            temperature: t.clamp(0.0, 1.0),
            humidity: h.clamp(0.0, 1.0),
        }
    }
}

/// Raw terrain samples of one column before the continentalness remap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnNoise {
    /// Lower density bound at heights 7 and 8.
    pub min: [f64; 2],
    /// Upper density bound at heights 7 and 8.
    pub max: [f64; 2],
    /// Blend selector at heights 7 and 8.
    pub main: [f64; 2],
    /// Fine continentalness.
    pub cont_a: f64,
    /// Coarse continentalness.
    pub cont_b: f64,
}

/// Terrain octave stacks, seeded in the order the original chunk provider
/// consumed them.
#[derive(Debug, Clone)]
pub struct BetaSurfaceNoise {
    min: OctaveNoise,
    max: OctaveNoise,
    main: OctaveNoise,
    cont_a: OctaveNoise,
    cont_b: OctaveNoise,
}

impl BetaSurfaceNoise {
    /// Seed the terrain stacks for a world.
    pub fn new(seed: i64) -> Self {
        let mut rng = JavaRandom::new(seed);
        let min = OctaveNoise::beta(&mut rng, 16, 684.412, 0.5, 1.0, 2.0);
        let max = OctaveNoise::beta(&mut rng, 16, 684.412, 0.5, 1.0, 2.0);
        let main = OctaveNoise::beta(&mut rng, 8, 684.412 / 80.0, 0.5, 1.0, 2.0);
        // Surface and scale noises that never reach the biome decision.
        rng.skip(262 * 8);
        let cont_a = OctaveNoise::beta(&mut rng, 10, 1.121, 0.5, 1.0, 2.0);
        let cont_b = OctaveNoise::beta(&mut rng, 16, 200.0, 0.5, 1.0, 2.0);
        Self {
            min,
            max,
            main,
            cont_a,
            cont_b,
        }
    }

    /// Sample the column at noise coordinates `(cx, cz)` (a quarter of the
    /// block coordinates).
    pub fn column(&self, cx: f64, cz: f64, lacmin: f64) -> ColumnNoise {
        ColumnNoise {
            min: self.min.sample_beta_terrain(cx, cz, false, lacmin),
            max: self.max.sample_beta_terrain(cx, cz, false, lacmin),
            main: self.main.sample_beta_terrain(cx, cz, true, lacmin),
            cont_a: self.cont_a.sample_amp(cx, 0.0, cz, 0.0, 0.0, true),
            cont_b: self.cont_b.sample_amp(cx, 0.0, cz, 0.0, 0.0, true),
        }
    }

    /// Blended density at sea level for block `(x, z)`; values `<= 0` are
    /// underwater.
    pub fn sea_level_density(&self, x: i32, z: i32, lacmin: f64, climate: BetaClimate) -> f64 {
        let column = self.column(x as f64 * 0.25, z as f64 * 0.25, lacmin);
        let cols = process_column(&column, climate);
        0.125 * cols[0] + 0.875 * cols[1]
    }
}

/// Apply the continentalness remap to a column, giving the densities at
/// heights 7 and 8.
pub fn process_column(src: &ColumnNoise, climate: BetaClimate) -> [f64; 2] {
    let mut humi = 1.0 - climate.temperature * climate.humidity;
    humi *= humi;
    humi *= humi;
    humi = 1.0 - humi;

    let mut cont_a = (src.cont_a + 256.0) / 512.0 * humi;
    if cont_a > 1.0 {
        cont_a = 1.0;
    }

    let mut cont_b = src.cont_b / 8000.0;
    if cont_b < 0.0 {
        cont_b = -cont_b * 0.3;
    }
    cont_b = cont_b * 3.0 - 2.0;
    if cont_b < 0.0 {
        cont_b /= 2.0;
        cont_b = if cont_b < -1.0 {
            -1.0 / 1.4 / 2.0
        } else {
            cont_b / 1.4 / 2.0
        };
        cont_a = 0.0;
    } else {
        cont_b = if cont_b > 1.0 { 1.0 / 8.0 } else { cont_b / 8.0 };
    }

    cont_a = if cont_a < 0.0 { 0.5 } else { cont_a + 0.5 };
    cont_b = (cont_b * 17.0) / 16.0;
    cont_b = 17.0 / 2.0 + cont_b * 4.0;

    let mut out = [0.0; 2];
    for (i, slot) in out.iter_mut().enumerate() {
        let mut proc_cont = ((i as f64 + 7.0 - cont_b) * 12.0) / cont_a;
        if proc_cont < 0.0 {
            proc_cont *= 4.0;
        }
        let lo = src.min[i] / 512.0;
        let hi = src.max[i] / 512.0;
        let s = (src.main[i] / 10.0 + 1.0) / 2.0;
        let blended = if s < 0.0 {
            lo
        } else if s > 1.0 {
            hi
        } else {
            lo + (hi - lo) * s
        };
        *slot = blended - proc_cont;
    }
    out
}
