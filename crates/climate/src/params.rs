//! The six climate noises and their sampling at 1:4 resolution.
//!
//! Every noise forks its own Xoroshiro stream: the world seed yields two
//! longs, each xored with the md5 of the noise's resource name.

use seedmap_core::Xoroshiro128PlusPlus;
use seedmap_noise::DoublePerlinNoise;

use crate::spline::Spline;

/// Md5 halves and octave layout of one noise.
struct NoiseDef {
    md5: (u64, u64),
    amplitudes: &'static [f64],
    omin: i32,
}

const SHIFT: NoiseDef = NoiseDef {
    md5: (0x080518cf6af25384, 0x3f3dfb40a54febd5),
    amplitudes: &[1.0, 1.0, 1.0, 0.0],
    omin: -3,
};

const WEIRDNESS: NoiseDef = NoiseDef {
    md5: (0xefc8ef4d36102b34, 0x1beeeb324a0f24ea),
    amplitudes: &[1.0, 2.0, 1.0, 0.0, 0.0, 0.0],
    omin: -7,
};

/// Temperature, humidity, continentalness and erosion have large-biome
/// variants with their own salt and two lower octaves.
const SCALED: [(NoiseDef, (u64, u64)); 4] = [
    (
        NoiseDef {
            md5: (0x5c7e6b29735f0d7f, 0xf7d86f1bbc734988),
            amplitudes: &[1.5, 0.0, 1.0, 0.0, 0.0, 0.0],
            omin: -10,
        },
        (0x944b0073edf549db, 0x4ff44347e9d22b96),
    ),
    (
        NoiseDef {
            md5: (0x81bb4d22e8dc168e, 0xf1c8b4bea16303cd),
            amplitudes: &[1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
            omin: -8,
        },
        (0x71b8ab943dbd5301, 0xbb63ddcf39ff7a2b),
    ),
    (
        NoiseDef {
            md5: (0x83886c9d0ae3a662, 0xafa638a61b42e8ad),
            amplitudes: &[1.0, 1.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0],
            omin: -9,
        },
        (0x9a3f51a113fce8dc, 0xee2dbd157e5dcdad),
    ),
    (
        NoiseDef {
            md5: (0xd02491e6058f6fd8, 0x4792512c94c17a80),
            amplitudes: &[1.0, 1.0, 0.0, 1.0, 1.0],
            omin: -9,
        },
        (0x8c984b1f8702a951, 0xead7b1f92bae535f),
    ),
];

fn fork(xlo: u64, xhi: u64, md5: (u64, u64), amplitudes: &[f64], omin: i32) -> DoublePerlinNoise {
    let mut rng = Xoroshiro128PlusPlus::from_parts(xlo ^ md5.0, xhi ^ md5.1);
    DoublePerlinNoise::new(&mut rng, amplitudes, omin)
}

/// Raw climate values at one 1:4 cell, before quantization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateSample {
    #[allow(missing_docs)]
    pub temperature: f32,
    #[allow(missing_docs)]
    pub humidity: f32,
    #[allow(missing_docs)]
    pub continentalness: f32,
    #[allow(missing_docs)]
    pub erosion: f32,
    /// Vertical position relative to the terrain offset.
    pub depth: f32,
    #[allow(missing_docs)]
    pub weirdness: f32,
}

impl ClimateSample {
    /// Fixed-point vector in tree order: temperature, humidity,
    /// continentalness, erosion, depth, weirdness. Values truncate toward
    /// zero.
    pub fn quantize(&self) -> [i64; 6] {
        [
            self.temperature,
            self.humidity,
            self.continentalness,
            self.erosion,
            self.depth,
            self.weirdness,
        ]
        .map(|v| (10000.0f32 * v) as i64)
    }
}

/// Seeded climate noise set.
#[derive(Debug, Clone)]
pub struct ClimateNoise {
    shift: DoublePerlinNoise,
    temperature: DoublePerlinNoise,
    humidity: DoublePerlinNoise,
    continentalness: DoublePerlinNoise,
    erosion: DoublePerlinNoise,
    weirdness: DoublePerlinNoise,
}

impl ClimateNoise {
    /// Seed every noise from `seed`.
    pub fn new(seed: u64, large_biomes: bool) -> Self {
        let mut root = Xoroshiro128PlusPlus::new(seed as i64);
        let xlo = root.next_u64();
        let xhi = root.next_u64();

        let [t, h, c, e] = SCALED.map(|(def, large_md5)| {
            if large_biomes {
                fork(xlo, xhi, large_md5, def.amplitudes, def.omin - 2)
            } else {
                fork(xlo, xhi, def.md5, def.amplitudes, def.omin)
            }
        });
        Self {
            shift: fork(xlo, xhi, SHIFT.md5, SHIFT.amplitudes, SHIFT.omin),
            temperature: t,
            humidity: h,
            continentalness: c,
            erosion: e,
            weirdness: fork(xlo, xhi, WEIRDNESS.md5, WEIRDNESS.amplitudes, WEIRDNESS.omin),
        }
    }

    /// Sample the cell `(x, y, z)` at 1:4, using `offset` for the depth
    /// axis.
    pub fn sample(&self, offset: &Spline, x: i32, y: i32, z: i32) -> ClimateSample {
        let (xf, zf) = (x as f64, z as f64);
        let px = xf + self.shift.sample(xf, 0.0, zf) * 4.0;
        let pz = zf + self.shift.sample(zf, xf, 0.0) * 4.0;
        self.sample_at(offset, px, y, pz)
    }

    /// Like [`ClimateNoise::sample`], without the local shift distortion.
    pub fn sample_unshifted(&self, offset: &Spline, x: i32, y: i32, z: i32) -> ClimateSample {
        self.sample_at(offset, x as f64, y, z as f64)
    }

    fn sample_at(&self, offset: &Spline, px: f64, y: i32, pz: f64) -> ClimateSample {
        let continentalness = self.continentalness.sample(px, 0.0, pz) as f32;
        let erosion = self.erosion.sample(px, 0.0, pz) as f32;
        let weirdness = self.weirdness.sample(px, 0.0, pz) as f32;

        let ridges = -3.0f32 * ((weirdness.abs() - 0.6666667f32).abs() - 0.33333334f32);
        let off = (offset.eval(&[continentalness, erosion, ridges, weirdness]) + 0.015f32) as f64;
        let depth = (1.0 - (y.wrapping_mul(4)) as f64 / 128.0 - 83.0 / 160.0 + off) as f32;

        ClimateSample {
            temperature: self.temperature.sample(px, 0.0, pz) as f32,
            humidity: self.humidity.sample(px, 0.0, pz) as f32,
            continentalness,
            erosion,
            depth,
            weirdness,
        }
    }
}
