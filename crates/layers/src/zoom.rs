//! Doubling zooms.
//!
//! Output cell `(x, z)` copies parent `(x >> 1, z >> 1)` on even/even
//! positions. Other positions pick between that parent and its east, south
//! or south-east neighbours with draws from the seed of the even corner.

use std::sync::Arc;

use seedmap_core::seed::first_int;
use seedmap_core::LayerSeed;

use crate::layer::{cell, fill, Layer};

pub(crate) fn zoom(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
    fuzzy: bool,
) -> Vec<i32> {
    let (px, pz) = (x >> 1, z >> 1);
    let pw = (((x as i64 + w as i64 - 1) >> 1) - px as i64 + 2) as usize;
    let ph = (((z as i64 + h as i64 - 1) >> 1) - pz as i64 + 2) as usize;
    let src = parent.generate(px, pz, pw, ph);

    fill(w, h, |i, j| {
        let cx = cell(x, i);
        let cz = cell(z, j);
        let ix = (cx >> 1).wrapping_sub(px) as usize;
        let iz = (cz >> 1).wrapping_sub(pz) as usize;
        let v00 = src[iz * pw + ix];
        let v10 = src[iz * pw + ix + 1];
        let v01 = src[(iz + 1) * pw + ix];
        let v11 = src[(iz + 1) * pw + ix + 1];
        zoom_cell(&layer.seed, cx, cz, [v00, v10, v01, v11], fuzzy)
    })
}

/// Value of one output cell given the parent corners
/// `[v00, v10, v01, v11]` (x first).
fn zoom_cell(seed: &LayerSeed, cx: i32, cz: i32, v: [i32; 4], fuzzy: bool) -> i32 {
    let [v00, v10, v01, v11] = v;
    let (odd_x, odd_z) = (cx & 1 != 0, cz & 1 != 0);
    if !odd_x && !odd_z {
        return v00;
    }

    let mut cs = seed.chunk(cx & !1, cz & !1);
    let vertical = if first_int(cs, 2) == 0 { v00 } else { v01 };
    if !odd_x {
        return vertical;
    }
    cs = seed.step(cs);
    let horizontal = if first_int(cs, 2) == 0 { v00 } else { v10 };
    if !odd_z {
        return horizontal;
    }
    cs = seed.step(cs);
    if fuzzy {
        v[first_int(cs, 4) as usize]
    } else {
        mode_or_random(cs, v00, v10, v01, v11)
    }
}

/// Majority of the four corners with the game's tie-break order, falling back
/// to a random corner when no value wins.
fn mode_or_random(cs: u64, a: i32, b: i32, c: i32, d: i32) -> i32 {
    if b == c && c == d {
        b
    } else if a == b && a == c {
        a
    } else if a == b && a == d {
        a
    } else if a == c && a == d {
        a
    } else if a == b && c != d {
        a
    } else if a == c && b != d {
        a
    } else if a == d && b != c {
        a
    } else if b == c && a != d {
        b
    } else if b == d && a != c {
        b
    } else if c == d && a != b {
        c
    } else {
        [a, b, c, d][first_int(cs, 4) as usize]
    }
}
