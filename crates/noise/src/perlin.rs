//! Classic improved Perlin noise with the game's permutation setup.

use seedmap_core::RandomSource;

/// Quintic smoothstep `t³(t(6t − 15) + 10)`.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub(crate) fn lerp(part: f64, from: f64, to: f64) -> f64 {
    from + part * (to - from)
}

/// Gradient dot product for one of the sixteen lattice directions.
#[inline]
pub fn indexed_lerp(idx: u8, a: f64, b: f64, c: f64) -> f64 {
    match idx & 0xF {
        0 => a + b,
        1 => -a + b,
        2 => a - b,
        3 => -a - b,
        4 => a + c,
        5 => -a + c,
        6 => a - c,
        7 => -a - c,
        8 => b + c,
        9 => -b + c,
        10 => b - c,
        11 => -b - c,
        12 => a + b,
        13 => -b + c,
        14 => -a + b,
        _ => -b - c,
    }
}

/// One octave of 3D gradient noise.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    pub(crate) d: [u8; 257],
    /// Offset added to x before sampling.
    pub a: f64,
    /// Offset added to y before sampling.
    pub b: f64,
    /// Offset added to z before sampling.
    pub c: f64,
    /// Weight applied by the owning octave stack.
    pub amplitude: f64,
    /// Frequency applied by the owning octave stack.
    pub lacunarity: f64,
    h2: u8,
    d2: f64,
    t2: f64,
}

impl PerlinNoise {
    /// Draw offsets and shuffle the permutation from `rng`.
    pub fn new<R: RandomSource>(rng: &mut R) -> Self {
        let a = rng.next_double() * 256.0;
        let b = rng.next_double() * 256.0;
        let c = rng.next_double() * 256.0;

        let mut d = [0u8; 257];
        for (i, slot) in d.iter_mut().take(256).enumerate() {
            *slot = i as u8;
        }
        for i in 0..256 {
            let j = (rng.next_int(256 - i as i32) + i as i32) as usize;
            d.swap(i, j);
        }
        d[256] = d[0];

        let i2 = b.floor();
        let d2 = b - i2;
        Self {
            d,
            a,
            b,
            c,
            amplitude: 1.0,
            lacunarity: 1.0,
            h2: i2 as i32 as u8,
            d2,
            t2: fade(d2),
        }
    }

    /// Permutation entry, wrapping at 256.
    #[inline]
    pub(crate) fn perm(&self, i: i32) -> u8 {
        self.d[(i & 0xFF) as usize]
    }

    /// Sample at `(x, y, z)`.
    ///
    /// A `y` of exactly `0.0` reuses the precomputed y lattice. A non-zero
    /// `yamp` folds the y fraction onto a repeating band clamped by `ymin`.
    pub fn sample(&self, x: f64, y: f64, z: f64, yamp: f64, ymin: f64) -> f64 {
        let (h2, mut d2, t2) = if y == 0.0 {
            (self.h2, self.d2, self.t2)
        } else {
            let y = y + self.b;
            let i2 = y.floor();
            let frac = y - i2;
            (i2 as i32 as u8, frac, fade(frac))
        };

        let x = x + self.a;
        let z = z + self.c;
        let i1 = x.floor();
        let i3 = z.floor();
        let d1 = x - i1;
        let d3 = z - i3;
        let h1 = i1 as i32 as u8;
        let h3 = i3 as i32 as u8;
        let t1 = fade(d1);
        let t3 = fade(d3);

        if yamp != 0.0 {
            let yclamp = if ymin < d2 { ymin } else { d2 };
            d2 -= (yclamp / yamp).floor() * yamp;
        }

        self.lattice(h1, h2, h3, d1, d2, d3, t1, t2, t3)
    }

    /// Sample on the plane where the y lattice index and fraction are both 0.
    pub fn sample_flat(&self, x: f64, z: f64) -> f64 {
        let x = x + self.a;
        let z = z + self.c;
        let i1 = x.floor();
        let i3 = z.floor();
        let d1 = x - i1;
        let d3 = z - i3;
        self.lattice(
            i1 as i32 as u8,
            0,
            i3 as i32 as u8,
            d1,
            0.0,
            d3,
            fade(d1),
            0.0,
            fade(d3),
        )
    }

    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn lattice(
        &self,
        h1: u8,
        h2: u8,
        h3: u8,
        d1: f64,
        d2: f64,
        d3: f64,
        t1: f64,
        t2: f64,
        t3: f64,
    ) -> f64 {
        let idx = &self.d;
        let a1 = idx[h1 as usize].wrapping_add(h2);
        let b1 = idx[h1 as usize + 1].wrapping_add(h2);
        let a2 = idx[a1 as usize].wrapping_add(h3);
        let a3 = idx[a1 as usize + 1].wrapping_add(h3);
        let b2 = idx[b1 as usize].wrapping_add(h3);
        let b3 = idx[b1 as usize + 1].wrapping_add(h3);

        let mut l1 = indexed_lerp(idx[a2 as usize], d1, d2, d3);
        let l2 = indexed_lerp(idx[b2 as usize], d1 - 1.0, d2, d3);
        let mut l3 = indexed_lerp(idx[a3 as usize], d1, d2 - 1.0, d3);
        let l4 = indexed_lerp(idx[b3 as usize], d1 - 1.0, d2 - 1.0, d3);
        let mut l5 = indexed_lerp(idx[a2 as usize + 1], d1, d2, d3 - 1.0);
        let l6 = indexed_lerp(idx[b2 as usize + 1], d1 - 1.0, d2, d3 - 1.0);
        let mut l7 = indexed_lerp(idx[a3 as usize + 1], d1, d2 - 1.0, d3 - 1.0);
        let l8 = indexed_lerp(idx[b3 as usize + 1], d1 - 1.0, d2 - 1.0, d3 - 1.0);

        l1 = lerp(t1, l1, l2);
        l3 = lerp(t1, l3, l4);
        l5 = lerp(t1, l5, l6);
        l7 = lerp(t1, l7, l8);

        l1 = lerp(t2, l1, l3);
        l5 = lerp(t2, l5, l7);

        lerp(t3, l1, l5)
    }

    /// Beta 1.7 terrain column: accumulate the samples at vertical noise
    /// indices 7 and 8 into `v`.
    ///
    /// The y lattice is walked from index 0 and the four edge gradients are
    /// only recomputed when the wrapped y lattice index changes. The cached
    /// gradients keep the y fraction from when they were computed while the
    /// fade uses the current fraction, as the original terrain generator did.
    pub fn sample_beta_terrain(&self, v: &mut [f64; 2], x: f64, z: f64, y_lac_amp: f64) {
        let x = x + self.a;
        let z = z + self.c;
        let i1 = x.floor();
        let i3 = z.floor();
        let d1 = x - i1;
        let d3 = z - i3;
        let t1 = fade(d1);
        let t3 = fade(d3);
        let h1 = i1 as i32 as u8;
        let h3 = i3 as i32 as u8;
        let idx = &self.d;

        let mut cached: Option<u8> = None;
        let (mut l1, mut l2, mut l3, mut l4) = (0.0, 0.0, 0.0, 0.0);
        for yi in 0..=8 {
            let y = yi as f64 * self.lacunarity * y_lac_amp + self.b;
            let i2 = y.floor();
            let d2 = y - i2;
            let t2 = fade(d2);
            let h2 = i2 as i32 as u8;

            if cached != Some(h2) {
                cached = Some(h2);
                // u8 wrapping reads the game's mirrored 512-entry table.
                let a1 = idx[h1 as usize].wrapping_add(h2);
                let b1 = idx[h1 as usize + 1].wrapping_add(h2);
                let a2 = idx[a1 as usize].wrapping_add(h3);
                let a3 = idx[a1 as usize + 1].wrapping_add(h3);
                let b2 = idx[b1 as usize].wrapping_add(h3);
                let b3 = idx[b1 as usize + 1].wrapping_add(h3);

                l1 = lerp(
                    t1,
                    indexed_lerp(idx[a2 as usize], d1, d2, d3),
                    indexed_lerp(idx[b2 as usize], d1 - 1.0, d2, d3),
                );
                l2 = lerp(
                    t1,
                    indexed_lerp(idx[a3 as usize], d1, d2 - 1.0, d3),
                    indexed_lerp(idx[b3 as usize], d1 - 1.0, d2 - 1.0, d3),
                );
                l3 = lerp(
                    t1,
                    indexed_lerp(idx[a2 as usize + 1], d1, d2, d3 - 1.0),
                    indexed_lerp(idx[b2 as usize + 1], d1 - 1.0, d2, d3 - 1.0),
                );
                l4 = lerp(
                    t1,
                    indexed_lerp(idx[a3 as usize + 1], d1, d2 - 1.0, d3 - 1.0),
                    indexed_lerp(idx[b3 as usize + 1], d1 - 1.0, d2 - 1.0, d3 - 1.0),
                );
            }

            if yi >= 7 {
                let n1 = lerp(t2, l1, l2);
                let n2 = lerp(t2, l3, l4);
                v[yi - 7] += lerp(t3, n1, n2) * self.amplitude;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedmap_core::JavaRandom;

    #[test]
    fn permutation_is_a_bijection_with_mirrored_tail() {
        let p = PerlinNoise::new(&mut JavaRandom::new(1));
        let mut seen = [false; 256];
        for &v in &p.d[..256] {
            assert!(!seen[v as usize]);
            seen[v as usize] = true;
        }
        assert_eq!(p.d[256], p.d[0]);
        assert!((0.0..256.0).contains(&p.a));
    }

    #[test]
    fn zero_y_shortcut_matches_general_path() {
        let p = PerlinNoise::new(&mut JavaRandom::new(77));
        for &(x, z) in &[(0.3, 1.7), (-12.25, 40.5), (1000.125, -3.5)] {
            let shortcut = p.sample(x, 0.0, z, 0.0, 0.0);
            let tiny = p.sample(x, 1e-300, z, 0.0, 0.0);
            assert!((shortcut - tiny).abs() < 1e-9);
        }
    }

    #[test]
    fn samples_are_bounded_and_vanish_on_lattice() {
        let p = PerlinNoise::new(&mut JavaRandom::new(5));
        for i in 0..200 {
            let x = i as f64 * 0.37 - 30.0;
            let v = p.sample(x, x * 0.5, -x, 0.0, 0.0);
            assert!(v.abs() <= 1.1, "{v}");
        }
        let v = p.sample(-p.a, 3.0 - p.b + 0.0, -p.c, 0.0, 0.0);
        assert!(v.abs() < 1e-9);
    }
}
