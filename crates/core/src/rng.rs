//! Bit-exact reimplementations of the two random streams used by world
//! generation: the 48-bit linear congruential generator from `java.util.Random`
//! and Xoroshiro128++ as used from 1.18 onwards.

const LCG_MULTIPLIER: u64 = 0x5DEECE66D;
const LCG_ADDEND: u64 = 0xB;
const LCG_MASK: u64 = (1 << 48) - 1;

/// Shared interface of the generator random streams.
///
/// Noise initialization is written once against this trait and never
/// inspects which concrete stream it was handed.
pub trait RandomSource {
    /// Next `bits` (1..=32) random bits, returned the way the game truncates
    /// them into a signed 32-bit integer.
    fn next_bits(&mut self, bits: u32) -> i32;

    /// Uniform integer in `0..bound`. Returns 0 for a non-positive bound.
    fn next_int(&mut self, bound: i32) -> i32;

    /// Next full 64-bit value.
    fn next_long(&mut self) -> i64;

    /// Uniform double in `[0, 1)` with 53 bits of precision.
    fn next_double(&mut self) -> f64;

    /// Advance the stream as if `n` primary draws had been made.
    fn skip(&mut self, n: u64);
}

/// The `java.util.Random` linear congruential generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JavaRandom {
    state: u64,
}

impl JavaRandom {
    /// Seed the generator the way `new Random(seed)` does (scrambled).
    pub fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ LCG_MULTIPLIER) & LCG_MASK,
        }
    }

    /// Wrap an already scrambled 48-bit state.
    pub fn from_state(state: u64) -> Self {
        Self {
            state: state & LCG_MASK,
        }
    }

    /// Reset to the scrambled form of `seed`.
    pub fn set_seed(&mut self, seed: i64) {
        *self = Self::new(seed);
    }

    /// Raw 48-bit internal state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advance once and return the top `bits` bits of the new state.
    pub fn next(&mut self, bits: u32) -> i32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_ADDEND)
            & LCG_MASK;
        (self.state >> (48 - bits)) as i32
    }

    /// `Random.nextInt(bound)`, including the power-of-two shortcut and the
    /// modulo-bias rejection loop.
    pub fn next_int(&mut self, bound: i32) -> i32 {
        if bound <= 0 {
            return 0;
        }
        let m = bound - 1;
        if bound & m == 0 {
            return ((bound as i64 * self.next(31) as i64) >> 31) as i32;
        }
        loop {
            let bits = self.next(31);
            let val = bits % bound;
            if bits.wrapping_sub(val).wrapping_add(m) >= 0 {
                return val;
            }
        }
    }

    /// `Random.nextLong()`.
    pub fn next_long(&mut self) -> i64 {
        let hi = (self.next(32) as i64) << 32;
        hi.wrapping_add(self.next(32) as i64)
    }

    /// `Random.nextFloat()`.
    pub fn next_float(&mut self) -> f32 {
        self.next(24) as f32 / (1u32 << 24) as f32
    }

    /// `Random.nextDouble()`.
    pub fn next_double(&mut self) -> f64 {
        let hi = (self.next(26) as i64) << 27;
        let x = hi + self.next(27) as i64;
        x as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Advance by `n` steps in O(log n) using the affine composition of the
    /// LCG step with itself. Wrapping counts walk the stream backwards since
    /// the period divides 2^64.
    pub fn skip(&mut self, n: u64) {
        let mut m: u64 = 1;
        let mut a: u64 = 0;
        let mut im = LCG_MULTIPLIER;
        let mut ia = LCG_ADDEND;
        let mut k = n;
        while k != 0 {
            if k & 1 != 0 {
                m = m.wrapping_mul(im);
                a = im.wrapping_mul(a).wrapping_add(ia);
            }
            ia = im.wrapping_add(1).wrapping_mul(ia);
            im = im.wrapping_mul(im);
            k >>= 1;
        }
        self.state = self.state.wrapping_mul(m).wrapping_add(a) & LCG_MASK;
    }
}

impl RandomSource for JavaRandom {
    fn next_bits(&mut self, bits: u32) -> i32 {
        self.next(bits)
    }

    fn next_int(&mut self, bound: i32) -> i32 {
        JavaRandom::next_int(self, bound)
    }

    fn next_long(&mut self) -> i64 {
        JavaRandom::next_long(self)
    }

    fn next_double(&mut self) -> f64 {
        JavaRandom::next_double(self)
    }

    fn skip(&mut self, n: u64) {
        JavaRandom::skip(self, n)
    }
}

/// Xoroshiro128++ with the game's seeding procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Xoroshiro128PlusPlus {
    lo: u64,
    hi: u64,
}

fn mix_stafford13(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

impl Xoroshiro128PlusPlus {
    /// Seed from a 64-bit value through the golden-ratio split and mixer.
    pub fn new(seed: i64) -> Self {
        let lo = seed as u64 ^ 0x6A09E667F3BCC909;
        let hi = lo.wrapping_add(0x9E3779B97F4A7C15);
        Self {
            lo: mix_stafford13(lo),
            hi: mix_stafford13(hi),
        }
    }

    /// Construct directly from the two state words (used by md5-salted forks).
    pub fn from_parts(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    /// Current `(lo, hi)` state.
    pub fn parts(&self) -> (u64, u64) {
        (self.lo, self.hi)
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        let l = self.lo;
        let mut h = self.hi;
        let n = l.wrapping_add(h).rotate_left(17).wrapping_add(l);
        h ^= l;
        self.lo = l.rotate_left(49) ^ h ^ (h << 21);
        self.hi = h.rotate_left(28);
        n
    }

    /// Bounded integer using a 32x32 multiply with rejection of the biased
    /// low range.
    pub fn next_u32_below(&mut self, n: u32) -> u32 {
        let n64 = n as u64;
        let mut r = (self.next_u64() & 0xFFFF_FFFF).wrapping_mul(n64);
        if (r as u32) < n {
            let threshold = n.wrapping_neg() % n;
            while (r as u32) < threshold {
                r = (self.next_u64() & 0xFFFF_FFFF).wrapping_mul(n64);
            }
        }
        (r >> 32) as u32
    }

    /// Uniform double in `[0, 1)`.
    pub fn next_double(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * 1.1102230246251565e-16
    }
}

impl RandomSource for Xoroshiro128PlusPlus {
    fn next_bits(&mut self, bits: u32) -> i32 {
        (self.next_u64() >> (64 - bits)) as i32
    }

    fn next_int(&mut self, bound: i32) -> i32 {
        if bound <= 0 {
            return 0;
        }
        self.next_u32_below(bound as u32) as i32
    }

    fn next_long(&mut self) -> i64 {
        self.next_u64() as i64
    }

    fn next_double(&mut self) -> f64 {
        Xoroshiro128PlusPlus::next_double(self)
    }

    fn skip(&mut self, n: u64) {
        for _ in 0..n {
            self.next_u64();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_random_matches_jdk_vectors() {
        assert_eq!(JavaRandom::new(0).next(32), -1155484576);
        assert_eq!(JavaRandom::new(0).next_long(), -4962768465676381896);
        assert_eq!(JavaRandom::new(0).next_double(), 0.730967787376657);
        assert_eq!(JavaRandom::new(0).next_float(), 0.7309677600860596);

        let mut r = JavaRandom::new(42);
        let draws: Vec<i32> = (0..3).map(|_| r.next_int(10)).collect();
        assert_eq!(draws, vec![0, 3, 8]);

        let mut r = JavaRandom::new(12345);
        let draws: Vec<i32> = (0..3).map(|_| r.next_int(100)).collect();
        assert_eq!(draws, vec![51, 80, 41]);
        assert_eq!(JavaRandom::new(12345).next_int(256), 92);
    }

    #[test]
    fn java_random_skip_zero_is_identity() {
        let mut r = JavaRandom::new(99);
        let before = r.state();
        r.skip(0);
        assert_eq!(r.state(), before);
    }

    #[test]
    fn java_random_negative_skip_rewinds() {
        let mut r = JavaRandom::new(7);
        let start = r.state();
        r.skip(262 * 3);
        r.skip((-(262i64 * 3)) as u64);
        assert_eq!(r.state(), start);
    }

    #[test]
    fn xoroshiro_matches_reference_vectors() {
        let mut x = Xoroshiro128PlusPlus::new(0);
        let longs: Vec<i64> = (0..3).map(|_| x.next_long()).collect();
        assert_eq!(
            longs,
            vec![
                3038984756725240190,
                -3694039286755638414,
                4633751808701151732
            ]
        );

        let mut x = Xoroshiro128PlusPlus::new(1234);
        let ints: Vec<u32> = (0..5).map(|_| x.next_u32_below(100)).collect();
        assert_eq!(ints, vec![4, 97, 93, 92, 41]);

        let mut x = Xoroshiro128PlusPlus::new(1234);
        assert_eq!(x.next_double(), 0.0781824097609698);
    }

    #[test]
    fn xoroshiro_from_parts_reproduces_stream() {
        let mut a = Xoroshiro128PlusPlus::new(-5);
        let (lo, hi) = a.parts();
        let mut b = Xoroshiro128PlusPlus::from_parts(lo, hi);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }
}
