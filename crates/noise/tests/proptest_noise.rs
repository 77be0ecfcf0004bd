//! Properties of the gradient noises: seeded reproducibility, bounded output
//! and continuity.

use proptest::prelude::*;
use seedmap_core::{JavaRandom, Xoroshiro128PlusPlus};
use seedmap_noise::{BetaClimateNoise, DoublePerlinNoise, PerlinNoise};

fn coord() -> impl Strategy<Value = f64> {
    -1.0e5f64..1.0e5
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn perlin_is_reproducible_and_bounded(seed in any::<i64>(), x in coord(), y in coord(), z in coord()) {
        let a = PerlinNoise::new(&mut JavaRandom::new(seed));
        let b = PerlinNoise::new(&mut JavaRandom::new(seed));
        let v = a.sample(x, y, z, 0.0, 0.0);
        prop_assert_eq!(v.to_bits(), b.sample(x, y, z, 0.0, 0.0).to_bits());
        prop_assert!(v.is_finite() && v.abs() <= 1.5, "sample {}", v);
    }

    #[test]
    fn perlin_is_continuous(seed in any::<i64>(), x in coord(), z in coord()) {
        let noise = PerlinNoise::new(&mut JavaRandom::new(seed));
        let eps = 1.0e-7;
        let here = noise.sample(x, 0.5, z, 0.0, 0.0);
        let there = noise.sample(x + eps, 0.5, z + eps, 0.0, 0.0);
        prop_assert!((here - there).abs() < 1.0e-4, "{} vs {}", here, there);
    }

    #[test]
    fn double_perlin_is_reproducible(seed in any::<i64>(), x in coord(), z in coord()) {
        let amplitudes = [1.5, 0.0, 1.0, 0.0, 0.0, 0.0];
        let a = DoublePerlinNoise::new(&mut Xoroshiro128PlusPlus::new(seed), &amplitudes, -10);
        let b = DoublePerlinNoise::new(&mut Xoroshiro128PlusPlus::new(seed), &amplitudes, -10);
        let v = a.sample(x, 0.0, z);
        prop_assert_eq!(v.to_bits(), b.sample(x, 0.0, z).to_bits());
        prop_assert!(v.is_finite());
    }

    #[test]
    fn beta_climate_stays_in_unit_range(seed in any::<i64>(), x in -1_000_000i32..1_000_000, z in -1_000_000i32..1_000_000) {
        let climate = BetaClimateNoise::new(seed).sample(x, z);
        prop_assert!((0.0..=1.0).contains(&climate.temperature), "t {}", climate.temperature);
        prop_assert!((0.0..=1.0).contains(&climate.humidity), "h {}", climate.humidity);
    }
}
