//! Final 1:4 to 1:1 zooms. Each block takes the biome of the nearest
//! jittered cell corner.

use std::sync::Arc;

use seedmap_core::seed::first_int;
use seedmap_core::voronoi::voronoi_access_3d;

use crate::layer::{cell, fill, Layer};

/// Parent window covering blocks `x..x+w` after the two-block shift.
fn parent_window(x: i32, w: usize) -> (i32, usize) {
    let start = x.wrapping_sub(2) >> 2;
    let end = ((x as i64 - 2 + w as i64 - 1) >> 2) as i32;
    (start, (end as i64 - start as i64 + 2) as usize)
}

/// Jitter of one corner: the first two draws of its cell seed, each in
/// `-1.8..1.8` blocks.
fn corner_offset(layer: &Layer, cx: i32, cz: i32) -> (f64, f64) {
    let mut cs = layer.seed.chunk(cx << 2, cz << 2);
    let dx = (first_int(cs, 1024) as f64 / 1024.0 - 0.5) * 3.6;
    cs = layer.seed.step(cs);
    let dz = (first_int(cs, 1024) as f64 / 1024.0 - 0.5) * 3.6;
    (dx, dz)
}

/// 2D voronoi used up to 1.14.
pub(crate) fn jittered(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    let (px, pw) = parent_window(x, w);
    let (pz, ph) = parent_window(z, h);
    let src = parent.generate(px, pz, pw, ph);

    fill(w, h, |i, j| {
        let bx = cell(x, i).wrapping_sub(2);
        let bz = cell(z, j).wrapping_sub(2);
        let (cx, cz) = (bx >> 2, bz >> 2);
        let (lx, lz) = ((bx & 3) as f64, (bz & 3) as f64);

        // Corners in priority order: here, east, south, south-east.
        let corners = [(0, 0), (1, 0), (0, 1), (1, 1)];
        let mut dist = [0.0f64; 4];
        for (d, (ox, oz)) in dist.iter_mut().zip(corners) {
            let (jx, jz) = corner_offset(layer, cx.wrapping_add(ox), cz.wrapping_add(oz));
            let ex = jx + 4.0 * ox as f64;
            let ez = jz + 4.0 * oz as f64;
            *d = (lz - ez) * (lz - ez) + (lx - ex) * (lx - ex);
        }
        let nearest = (0..3)
            .find(|&k| (0..4).all(|o| o == k || dist[k] < dist[o]))
            .unwrap_or(3);

        let (ox, oz) = corners[nearest];
        let ix = (cx.wrapping_sub(px) + ox) as usize;
        let iz = (cz.wrapping_sub(pz) + oz) as usize;
        src[iz * pw + ix] & 0xFF
    })
}

/// SHA-seeded 3D voronoi from 1.15, evaluated on the y = 0 plane.
pub(crate) fn sha_3d(
    layer: &Layer,
    parent: &Arc<Layer>,
    x: i32,
    z: i32,
    w: usize,
    h: usize,
) -> Vec<i32> {
    let (px, pw) = parent_window(x, w);
    let (pz, ph) = parent_window(z, h);
    let src = parent.generate(px, pz, pw, ph);

    fill(w, h, |i, j| {
        let (cx, _, cz) = voronoi_access_3d(layer.sha, cell(x, i), 0, cell(z, j));
        let ix = cx.wrapping_sub(px) as usize;
        let iz = cz.wrapping_sub(pz) as usize;
        src[iz * pw + ix]
    })
}
