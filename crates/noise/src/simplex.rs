//! 2D simplex noise over a [`PerlinNoise`] permutation, used by the Beta
//! climate octaves.

use crate::perlin::{indexed_lerp, PerlinNoise};

#[inline]
fn simplex_grad(idx: u8, x: f64, y: f64) -> f64 {
    let mut con = 0.5 - x * x - y * y;
    if con < 0.0 {
        return 0.0;
    }
    con *= con;
    con * con * indexed_lerp(idx, x, y, 0.0)
}

impl PerlinNoise {
    /// Sample 2D simplex noise at `(x, y)`; the permutation offsets are not
    /// applied here.
    pub fn sample_simplex_2d(&self, x: f64, y: f64) -> f64 {
        let skew = 0.5 * (3f64.sqrt() - 1.0);
        let unskew = (3.0 - 3f64.sqrt()) / 6.0;

        let hf = (x + y) * skew;
        let hx = (x + hf).floor() as i32;
        let hz = (y + hf).floor() as i32;
        let mhxz = hx.wrapping_add(hz) as f64 * unskew;
        let x0 = x - (hx as f64 - mhxz);
        let y0 = y - (hz as f64 - mhxz);
        let (offx, offz) = if x0 > y0 { (1, 0) } else { (0, 1) };
        let x1 = x0 - offx as f64 + unskew;
        let y1 = y0 - offz as f64 + unskew;
        let x2 = x0 - 1.0 + 2.0 * unskew;
        let y2 = y0 - 1.0 + 2.0 * unskew;

        let gi0 = self.perm(self.perm(hz) as i32 + hx);
        let gi1 = self.perm(self.perm(hz + offz) as i32 + hx + offx);
        let gi2 = self.perm(self.perm(hz + 1) as i32 + hx + 1);

        let t = simplex_grad(gi0 % 12, x0, y0)
            + simplex_grad(gi1 % 12, x1, y1)
            + simplex_grad(gi2 % 12, x2, y2);
        70.0 * t
    }
}
