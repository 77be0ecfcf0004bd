//! Seed mixing for the legacy layer pipeline.
//!
//! Every layer derives its random state from the world seed and its own
//! salt through the quadratic step below. All arithmetic is wrapping 64-bit.

/// One step of the layer seed mixer.
#[inline]
pub fn mc_step_seed(s: u64, salt: u64) -> u64 {
    s.wrapping_mul(
        s.wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407),
    )
    .wrapping_add(salt)
}

/// Salt a layer type carries, derived from its base salt.
pub fn layer_salt(salt: u64) -> u64 {
    let mut ls = mc_step_seed(salt, salt);
    ls = mc_step_seed(ls, salt);
    mc_step_seed(ls, salt)
}

/// World seed mixed three times with a layer salt.
pub fn start_salt(world_seed: u64, layer_salt: u64) -> u64 {
    let mut st = world_seed;
    st = mc_step_seed(st, layer_salt);
    st = mc_step_seed(st, layer_salt);
    mc_step_seed(st, layer_salt)
}

/// Per-layer seed that chunk seeds are derived from.
pub fn start_seed(world_seed: u64, layer_salt: u64) -> u64 {
    mc_step_seed(start_salt(world_seed, layer_salt), 0)
}

/// Seed of a single cell of a layer.
#[inline]
pub fn chunk_seed(start_seed: u64, x: i32, z: i32) -> u64 {
    let mut cs = start_seed.wrapping_add(x as i64 as u64);
    cs = mc_step_seed(cs, z as i64 as u64);
    cs = mc_step_seed(cs, x as i64 as u64);
    mc_step_seed(cs, z as i64 as u64)
}

/// First bounded draw from a cell seed, always in `0..m`.
#[inline]
pub fn first_int(s: u64, m: i32) -> i32 {
    let r = ((s as i64) >> 24) % m as i64;
    (if r < 0 { r + m as i64 } else { r }) as i32
}

/// Whether [`first_int`] yields zero.
#[inline]
pub fn first_is_zero(s: u64, m: i32) -> bool {
    ((s as i64) >> 24) % m as i64 == 0
}

/// Seed pair a layer holds once bound to a world seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerSeed {
    /// Salt mixed into consecutive draws of one cell.
    pub start_salt: u64,
    /// Base of every cell seed.
    pub start_seed: u64,
}

impl LayerSeed {
    /// Derive the seed pair for a layer whose base salt is `salt`.
    /// A zero salt leaves both halves zero; such layers still draw, from
    /// cell seeds built on a zero start seed.
    pub fn derive(world_seed: u64, salt: u64) -> Self {
        if salt == 0 {
            return Self::default();
        }
        let ls = layer_salt(salt);
        let st = start_salt(world_seed, ls);
        Self {
            start_salt: st,
            start_seed: mc_step_seed(st, 0),
        }
    }

    /// Cell seed at `(x, z)`.
    #[inline]
    pub fn chunk(&self, x: i32, z: i32) -> u64 {
        chunk_seed(self.start_seed, x, z)
    }

    /// Advance a cell seed to its next draw.
    #[inline]
    pub fn step(&self, cs: u64) -> u64 {
        mc_step_seed(cs, self.start_salt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_salt_matches_reference() {
        assert_eq!(mc_step_seed(1, 1), 7806831264735756413);
        assert_eq!(mc_step_seed(7806831264735756413, 1), 9585855196107789609);
        assert_eq!(layer_salt(1), 3107951898966440229);
        assert_eq!(layer_salt(2000), 9672642253349399552);
    }

    #[test]
    fn first_int_is_never_negative() {
        for s in [0u64, u64::MAX, 1 << 63, 0xDEADBEEF_00000000, 12345] {
            let v = first_int(s, 6);
            assert!((0..6).contains(&v), "{s:#x} -> {v}");
            assert_eq!(first_is_zero(s, 6), v == 0);
        }
    }

    #[test]
    fn zero_salt_layers_keep_a_zero_start_seed() {
        assert_eq!(LayerSeed::derive(111, 0), LayerSeed::default());
        assert_eq!(LayerSeed::derive(111, 0).chunk(3, -4), chunk_seed(0, 3, -4));
        let seeded = LayerSeed::derive(111, 1);
        assert_eq!(seeded.start_seed, start_seed(111, layer_salt(1)));
    }
}
