//! SHA-seeded voronoi access used from 1.15 onwards to map block
//! coordinates onto the 1:4 biome grid.

use sha2::{Digest, Sha256};

use crate::seed::mc_step_seed;

/// First eight bytes (little endian) of SHA-256 over the seed's little endian
/// encoding.
pub fn voronoi_sha(world_seed: u64) -> u64 {
    let digest = Sha256::digest(world_seed.to_le_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

fn jitter(s: u64) -> i64 {
    ((((s >> 24) & 1023) as i64) - 512) * 36
}

/// Jittered offset of the voronoi cell whose corner sits at `(a, b, c)`.
fn voronoi_cell(sha: u64, a: i32, b: i32, c: i32) -> (i64, i64, i64) {
    let (a, b, c) = (a as i64 as u64, b as i64 as u64, c as i64 as u64);
    let mut s = sha;
    for v in [a, b, c, a, b, c] {
        s = mc_step_seed(s, v);
    }
    let x = jitter(s);
    s = mc_step_seed(s, sha);
    let y = jitter(s);
    s = mc_step_seed(s, sha);
    let z = jitter(s);
    (x, y, z)
}

/// Map block `(x, y, z)` to the 1:4 cell whose jittered corner is closest.
/// Ties keep the first corner in visiting order.
pub fn voronoi_access_3d(sha: u64, x: i32, y: i32, z: i32) -> (i32, i32, i32) {
    let x = x.wrapping_sub(2);
    let y = y.wrapping_sub(2);
    let z = z.wrapping_sub(2);
    let (px, py, pz) = (x >> 2, y >> 2, z >> 2);
    let dx = ((x & 3) * 10240) as i64;
    let dy = ((y & 3) * 10240) as i64;
    let dz = ((z & 3) * 10240) as i64;

    let mut best = (px, py, pz);
    let mut dmin = u64::MAX;
    for i in 0..8 {
        let bx = ((i & 4) != 0) as i32;
        let by = ((i & 2) != 0) as i32;
        let bz = ((i & 1) != 0) as i32;
        let (cx, cy, cz) = (
            px.wrapping_add(bx),
            py.wrapping_add(by),
            pz.wrapping_add(bz),
        );
        let (mut rx, mut ry, mut rz) = voronoi_cell(sha, cx, cy, cz);
        rx += dx - 40960 * bx as i64;
        ry += dy - 40960 * by as i64;
        rz += dz - 40960 * bz as i64;
        let d = (rx * rx + ry * ry + rz * rz) as u64;
        if d < dmin {
            dmin = d;
            best = (cx, cy, cz);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha_prefix_matches_reference() {
        assert_eq!(voronoi_sha(0), 0x7a0b81a1f57055af);
        assert_eq!(voronoi_sha(111), 0x9b652cc7cb8b2231);
    }

    #[test]
    fn access_lands_on_a_neighbouring_cell() {
        let sha = voronoi_sha(42);
        for (x, z) in [(0, 0), (-1, -1), (17, -33), (1000, 4000)] {
            let (cx, _, cz) = voronoi_access_3d(sha, x, 64, z);
            let base_x = (x - 2) >> 2;
            let base_z = (z - 2) >> 2;
            assert!(cx == base_x || cx == base_x + 1);
            assert!(cz == base_z || cz == base_z + 1);
        }
    }
}
