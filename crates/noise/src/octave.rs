//! Octave stacks: several [`PerlinNoise`] instances at halving frequency,
//! seeded sequentially from one stream.

use seedmap_core::{RandomSource, Xoroshiro128PlusPlus};

use crate::perlin::PerlinNoise;

/// Per-octave md5 salts for Xoroshiro octaves, octave -12 through 0.
const MD5_OCTAVE: [(u64, u64); 13] = [
    (0xb198de63a8012672, 0x7b84cad43ef7b5a8), // md5 "octave_-12"
    (0x0fd787bfbc403ec3, 0x74a4a31ca21b48b8), // md5 "octave_-11"
    (0x36d326eed40efeb2, 0x5be9ce18223c636a), // md5 "octave_-10"
    (0x082fe255f8be6631, 0x4e96119e22dedc81), // md5 "octave_-9"
    (0x0ef68ec68504005e, 0x48b6bf93a2789640), // md5 "octave_-8"
    (0xf11268128982754f, 0x257a1d670430b0aa), // md5 "octave_-7"
    (0xe51c98ce7d1de664, 0x5f9478a733040c45), // md5 "octave_-6"
    (0x6d7b49e7e429850a, 0x2e3063c622a24777), // md5 "octave_-5"
    (0xbd90d5377ba1b762, 0xc07317d419a7548d), // md5 "octave_-4"
    (0x53d39c6752dac858, 0xbcd1c5a80ab65b3e), // md5 "octave_-3"
    (0xb4a24d7a84e7677b, 0x023ff9668e89b5c4), // md5 "octave_-2"
    (0xdffa22b534c5f608, 0xb9b67517d3665ca9), // md5 "octave_-1"
    (0xd50708086cef4d7c, 0x6e1651ecc7f43309), // md5 "octave_0"
];

/// Persistence of the first octave, indexed by octave count.
const PERSIST_INI: [f64; 10] = [
    0.0,
    1.0,
    2.0 / 3.0,
    4.0 / 7.0,
    8.0 / 15.0,
    16.0 / 31.0,
    32.0 / 63.0,
    64.0 / 127.0,
    128.0 / 255.0,
    256.0 / 511.0,
];

/// Wrap a coordinate into ±2^24 to keep precision at extreme distances.
#[inline]
pub fn maintain_precision(x: f64) -> f64 {
    x - (x / 33554432.0 + 0.5).floor() * 33554432.0
}

/// A stack of Perlin octaves.
#[derive(Debug, Clone, Default)]
pub struct OctaveNoise {
    /// Octaves in the order they were seeded.
    pub octaves: Vec<PerlinNoise>,
}

impl OctaveNoise {
    /// Pre-1.18 octave stack covering octaves `omin..omin+len`.
    ///
    /// When the highest octave is below 0 the stream skips the draws of the
    /// octaves that would sit above it (262 per octave).
    pub fn legacy<R: RandomSource>(rng: &mut R, omin: i32, len: usize) -> Self {
        let end = omin + len as i32 - 1;
        let mut persist = 1.0 / ((1u64 << len) as f64 - 1.0);
        let mut lacuna = 2f64.powi(end);
        let mut octaves = Vec::with_capacity(len);

        if end != 0 {
            rng.skip((-end as i64 * 262) as u64);
        }
        for _ in 0..len {
            let mut p = PerlinNoise::new(rng);
            p.amplitude = persist;
            p.lacunarity = lacuna;
            octaves.push(p);
            persist *= 2.0;
            lacuna *= 0.5;
        }
        Self { octaves }
    }

    /// 1.18+ octave stack. Each non-zero amplitude gets its own stream forked
    /// from two longs of `rng` and the octave's md5 salt; zero amplitudes are
    /// skipped while frequency and persistence keep advancing.
    pub fn xoroshiro(rng: &mut Xoroshiro128PlusPlus, amplitudes: &[f64], omin: i32) -> Self {
        let len = amplitudes.len();
        let mut lacuna = 1.0 / 2f64.powi(-omin);
        let mut persist = PERSIST_INI[len];
        let xlo = rng.next_u64();
        let xhi = rng.next_u64();
        let mut octaves = Vec::with_capacity(len);

        for (i, &amp) in amplitudes.iter().enumerate() {
            if amp != 0.0 {
                let (slo, shi) = MD5_OCTAVE[(12 + omin + i as i32) as usize];
                let mut fork = Xoroshiro128PlusPlus::from_parts(xlo ^ slo, xhi ^ shi);
                let mut p = PerlinNoise::new(&mut fork);
                p.amplitude = amp * persist;
                p.lacunarity = lacuna;
                octaves.push(p);
            }
            lacuna *= 2.0;
            persist *= 0.5;
        }
        Self { octaves }
    }

    /// Beta-era octave stack with explicit frequency and weight progressions.
    pub fn beta<R: RandomSource>(
        rng: &mut R,
        count: usize,
        lacunarity: f64,
        lac_mul: f64,
        persistence: f64,
        persist_mul: f64,
    ) -> Self {
        let mut lac = lacunarity;
        let mut persist = persistence;
        let octaves = (0..count)
            .map(|_| {
                let mut p = PerlinNoise::new(rng);
                p.amplitude = persist;
                p.lacunarity = lac;
                persist *= persist_mul;
                lac *= lac_mul;
                p
            })
            .collect();
        Self { octaves }
    }

    /// Weighted sum of all octaves at `(x, y, z)`.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.octaves
            .iter()
            .map(|p| {
                let lf = p.lacunarity;
                let ax = maintain_precision(x * lf);
                let ay = maintain_precision(y * lf);
                let az = maintain_precision(z * lf);
                p.amplitude * p.sample(ax, ay, az, 0.0, 0.0)
            })
            .sum()
    }

    /// Like [`OctaveNoise::sample`] with the vertical band clamp; when
    /// `flat_y` is set every octave is sampled on its y = 0 lattice plane.
    pub fn sample_amp(&self, x: f64, y: f64, z: f64, yamp: f64, ymin: f64, flat_y: bool) -> f64 {
        let mut v = 0.0;
        for p in &self.octaves {
            let lf = p.lacunarity;
            let ax = maintain_precision(x * lf);
            let az = maintain_precision(z * lf);
            let pv = if flat_y {
                p.sample(ax, -p.b, az, yamp * lf, ymin * lf)
            } else {
                let ay = maintain_precision(y * lf);
                p.sample(ax, ay, az, yamp * lf, ymin * lf)
            };
            v += p.amplitude * pv;
        }
        v
    }

    /// Beta climate sampler: simplex octaves offset by each octave's `a`/`b`.
    pub fn sample_beta_climate(&self, x: f64, z: f64) -> f64 {
        self.octaves
            .iter()
            .map(|p| {
                let lf = p.lacunarity;
                p.amplitude * p.sample_simplex_2d(x * lf + p.a, z * lf + p.b)
            })
            .sum()
    }

    /// Beta terrain columns at vertical indices 7 and 8.
    ///
    /// Octaves whose frequency exceeds a non-zero `lacmin` are left out.
    pub fn sample_beta_terrain(&self, x: f64, z: f64, half_y: bool, lacmin: f64) -> [f64; 2] {
        let mut v = [0.0; 2];
        for p in &self.octaves {
            let lf = p.lacunarity;
            if lacmin != 0.0 && lf > lacmin {
                continue;
            }
            let ax = maintain_precision(x * lf);
            let az = maintain_precision(z * lf);
            p.sample_beta_terrain(&mut v, ax, az, if half_y { 0.5 } else { 1.0 });
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedmap_core::JavaRandom;

    #[test]
    fn legacy_octaves_halve_frequency_and_double_weight() {
        let oct = OctaveNoise::legacy(&mut JavaRandom::new(1), -7, 8);
        assert_eq!(oct.octaves.len(), 8);
        assert_eq!(oct.octaves[0].lacunarity, 1.0);
        assert_eq!(oct.octaves[7].lacunarity, 1.0 / 128.0);
        let total: f64 = oct.octaves.iter().map(|p| p.amplitude).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn legacy_top_octave_below_zero_skips_stream() {
        let mut direct = JavaRandom::new(42);
        let skipped = OctaveNoise::legacy(&mut direct, -4, 2);
        let mut manual = JavaRandom::new(42);
        manual.skip(3 * 262);
        let first = PerlinNoise::new(&mut manual);
        assert_eq!(skipped.octaves[0].a, first.a);
        assert_eq!(skipped.octaves[0].lacunarity, 0.125);
    }

    #[test]
    fn xoroshiro_skips_zero_amplitudes() {
        let mut rng = Xoroshiro128PlusPlus::new(0);
        let oct = OctaveNoise::xoroshiro(&mut rng, &[1.0, 0.0, 1.0, 0.0], -3);
        assert_eq!(oct.octaves.len(), 2);
        assert_eq!(oct.octaves[0].lacunarity, 0.125);
        assert_eq!(oct.octaves[1].lacunarity, 0.5);
        assert_eq!(oct.octaves[0].amplitude, 8.0 / 15.0);
        assert_eq!(oct.octaves[1].amplitude, 2.0 / 15.0);
    }

    #[test]
    fn maintain_precision_is_periodic() {
        assert_eq!(maintain_precision(0.0), 0.0);
        assert_eq!(maintain_precision(33554432.0 + 5.5), 5.5);
        assert_eq!(maintain_precision(-33554432.0 * 3.0 - 1.25), -1.25);
    }
}
