//! Two octave stacks summed at slightly offset frequencies, the building
//! block of the 1.18+ climate parameters.

use seedmap_core::Xoroshiro128PlusPlus;

use crate::octave::OctaveNoise;

/// `(5/3) * n / (n + 1)` for the trimmed amplitude count `n`.
const AMP_INI: [f64; 10] = [
    0.0,
    5.0 / 6.0,
    10.0 / 9.0,
    15.0 / 12.0,
    20.0 / 15.0,
    25.0 / 18.0,
    30.0 / 21.0,
    35.0 / 24.0,
    40.0 / 27.0,
    45.0 / 30.0,
];

/// Pair of octave stacks whose sum is scaled by a length-dependent amplitude.
#[derive(Debug, Clone)]
pub struct DoublePerlinNoise {
    /// Overall output scale.
    pub amplitude: f64,
    oct_a: OctaveNoise,
    oct_b: OctaveNoise,
}

impl DoublePerlinNoise {
    /// Build both stacks from consecutive draws of `rng`.
    pub fn new(rng: &mut Xoroshiro128PlusPlus, amplitudes: &[f64], omin: i32) -> Self {
        let oct_a = OctaveNoise::xoroshiro(rng, amplitudes, omin);
        let oct_b = OctaveNoise::xoroshiro(rng, amplitudes, omin);

        let first = amplitudes.iter().position(|&a| a != 0.0);
        let last = amplitudes.iter().rposition(|&a| a != 0.0);
        let len = match (first, last) {
            (Some(f), Some(l)) => l - f + 1,
            _ => 0,
        };
        Self {
            amplitude: AMP_INI[len],
            oct_a,
            oct_b,
        }
    }

    /// Sample at `(x, y, z)`.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        const F: f64 = 337.0 / 331.0;
        let v = self.oct_a.sample(x, y, z) + self.oct_b.sample(x * F, y * F, z * F);
        v * self.amplitude
    }
}
