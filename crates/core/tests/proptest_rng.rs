//! Property tests for the random streams.
//!
//! The logarithmic skip must land on exactly the state reached by stepping
//! one draw at a time, for any seed and any count.

use proptest::prelude::*;
use seedmap_core::rng::{JavaRandom, RandomSource, Xoroshiro128PlusPlus};
use seedmap_core::seed::{first_int, first_is_zero};

proptest! {
    /// Property: JavaRandom::skip(n) equals n single draws.
    #[test]
    fn java_skip_matches_single_steps(seed in any::<i64>(), n in 0u64..2000) {
        let mut fast = JavaRandom::new(seed);
        let mut slow = JavaRandom::new(seed);
        fast.skip(n);
        for _ in 0..n {
            slow.next(32);
        }
        prop_assert_eq!(fast.state(), slow.state(), "seed {} n {}", seed, n);
    }

    /// Property: a forward skip followed by the matching backward skip restores state.
    #[test]
    fn java_skip_is_invertible(seed in any::<i64>(), n in 0u64..1_000_000) {
        let mut r = JavaRandom::new(seed);
        let start = r.state();
        r.skip(n);
        r.skip(n.wrapping_neg());
        prop_assert_eq!(r.state(), start);
    }

    /// Property: Xoroshiro skip equals discarding n longs.
    #[test]
    fn xoroshiro_skip_matches_draws(seed in any::<i64>(), n in 0u64..256) {
        let mut fast = Xoroshiro128PlusPlus::new(seed);
        let mut slow = Xoroshiro128PlusPlus::new(seed);
        RandomSource::skip(&mut fast, n);
        for _ in 0..n {
            slow.next_u64();
        }
        prop_assert_eq!(fast.parts(), slow.parts());
    }

    /// Property: bounded draws stay in range for both streams.
    #[test]
    fn bounded_draws_stay_in_range(seed in any::<i64>(), bound in 1i32..100_000) {
        let mut j = JavaRandom::new(seed);
        let mut x = Xoroshiro128PlusPlus::new(seed);
        for _ in 0..8 {
            let a = j.next_int(bound);
            let b = RandomSource::next_int(&mut x, bound);
            prop_assert!((0..bound).contains(&a));
            prop_assert!((0..bound).contains(&b));
        }
    }

    /// Property: cell draws are non-negative and agree with the zero test.
    #[test]
    fn first_int_agrees_with_zero_test(s in any::<u64>(), m in 1i32..1000) {
        let v = first_int(s, m);
        prop_assert!((0..m).contains(&v));
        prop_assert_eq!(v == 0, first_is_zero(s, m));
    }
}
