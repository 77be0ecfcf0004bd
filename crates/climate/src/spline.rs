//! Cubic Hermite splines over the climate axes, nested so that each control
//! value may itself be a spline over another axis. The terrain offset spline
//! built here turns continentalness, erosion and weirdness into the surface
//! offset used by the depth parameter.

use std::sync::Arc;

/// Axis a spline is evaluated along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplineAxis {
    #[allow(missing_docs)]
    Continentalness = 0,
    #[allow(missing_docs)]
    Erosion = 1,
    /// Folded weirdness ("peaks and valleys").
    Ridges = 2,
    #[allow(missing_docs)]
    Weirdness = 3,
}

/// One control point.
#[derive(Debug, Clone)]
pub struct SplinePoint {
    /// Location along the axis.
    pub loc: f32,
    /// Value at the location.
    pub value: Arc<Spline>,
    /// Slope at the location.
    pub derivative: f32,
}

/// A constant or a curve through control points sorted by location.
#[derive(Debug, Clone)]
pub enum Spline {
    /// Constant value.
    Fixed(f32),
    /// Curve along `axis`.
    Curve {
        /// Axis the points are located on.
        axis: SplineAxis,
        /// Control points, ascending by location.
        points: Vec<SplinePoint>,
    },
}

fn lerp(part: f32, from: f32, to: f32) -> f32 {
    lerp64(part, from, to) as f32
}

fn lerp64(part: f32, from: f32, to: f32) -> f64 {
    from as f64 + part as f64 * (to as f64 - from as f64)
}

impl Spline {
    /// Evaluate at `vals`, indexed by [`SplineAxis`].
    pub fn eval(&self, vals: &[f32; 4]) -> f32 {
        let (axis, points) = match self {
            Spline::Fixed(v) => return *v,
            Spline::Curve { axis, points } => (*axis, points),
        };
        let Some(last) = points.len().checked_sub(1) else {
            return 0.0;
        };
        let f = vals[axis as usize];
        let i = points.iter().position(|p| p.loc >= f).unwrap_or(points.len());

        if i == 0 || i > last {
            let p = &points[i.min(last)];
            return p.value.eval(vals) + p.derivative * (f - p.loc);
        }

        let (a, b) = (&points[i - 1], &points[i]);
        let (g, h) = (a.loc, b.loc);
        let k = (f - g) / (h - g);
        let (n, o) = (a.value.eval(vals), b.value.eval(vals));
        let p = a.derivative * (h - g) - (o - n);
        let q = -b.derivative * (h - g) + (o - n);
        (lerp64(k, n, o) + (k * (1.0 - k)) as f64 * lerp64(k, p, q)) as f32
    }

    /// The 1.18 terrain offset spline.
    pub fn terrain_offset() -> Self {
        let flat = |v: f32| Arc::new(Spline::Fixed(v));
        let coast = Arc::new(land_spline(-0.15, 0.0, 0.0, 0.1, 0.0, -0.03, false));

        let mut root = Builder::new(SplineAxis::Continentalness);
        root.point(-1.10, flat(0.044), 0.0);
        root.point(-1.02, flat(-0.2222), 0.0);
        root.point(-0.51, flat(-0.2222), 0.0);
        root.point(-0.44, flat(-0.12), 0.0);
        root.point(-0.18, flat(-0.12), 0.0);
        root.point(-0.16, coast.clone(), 0.0);
        root.point(-0.15, coast, 0.0);
        root.point(
            -0.10,
            Arc::new(land_spline(-0.1, 0.03, 0.1, 0.1, 0.01, -0.03, false)),
            0.0,
        );
        root.point(
            0.25,
            Arc::new(land_spline(-0.1, 0.03, 0.1, 0.7, 0.01, -0.03, true)),
            0.0,
        );
        root.point(
            1.0,
            Arc::new(land_spline(-0.05, 0.03, 0.1, 1.0, 0.01, 0.01, true)),
            0.0,
        );
        root.build()
    }
}

struct Builder {
    axis: SplineAxis,
    points: Vec<SplinePoint>,
}

impl Builder {
    fn new(axis: SplineAxis) -> Self {
        Self {
            axis,
            points: Vec::new(),
        }
    }

    fn point(&mut self, loc: f32, value: Arc<Spline>, derivative: f32) {
        self.points.push(SplinePoint {
            loc,
            value,
            derivative,
        });
    }

    fn fixed(&mut self, loc: f32, value: f32, derivative: f32) {
        self.point(loc, Arc::new(Spline::Fixed(value)), derivative);
    }

    fn build(self) -> Spline {
        Spline::Curve {
            axis: self.axis,
            points: self.points,
        }
    }
}

fn offset_value(weirdness: f32, continentalness: f32) -> f32 {
    let f0 = 1.0 - (1.0 - continentalness) * 0.5;
    let f1 = 0.5 * (1.0 - continentalness);
    let f2 = (weirdness + 1.17) * 0.46082947;
    let off = f2 * f0 - f1;
    if weirdness < -0.7 {
        off.max(-0.2222)
    } else {
        off.max(0.0)
    }
}

/// Offset along ridges for continentalness `f`; `raised` lifts valleys.
fn ridge_spline(f: f32, raised: bool) -> Spline {
    let mut sp = Builder::new(SplineAxis::Ridges);
    let i = offset_value(-1.0, f);
    let k = offset_value(1.0, f);
    let l = {
        let l = 1.0 - (1.0 - f) * 0.5;
        let u = 0.5 * (1.0 - f);
        u / (0.46082947 * l) - 1.17
    };

    if -0.65 < l && l < 1.0 {
        let u = offset_value(-0.65, f);
        let p = offset_value(-0.75, f);
        let q = (p - i) * 4.0;
        let r = offset_value(l, f);
        let s = (k - r) / (1.0 - l);
        sp.fixed(-1.0, i, q);
        sp.fixed(-0.75, p, 0.0);
        sp.fixed(-0.65, u, 0.0);
        sp.fixed(l - 0.01, r, 0.0);
        sp.fixed(l, r, s);
        sp.fixed(1.0, k, s);
    } else {
        let u = (k - i) * 0.5;
        if raised {
            sp.fixed(-1.0, if i > 0.2 { i } else { 0.2 }, 0.0);
            sp.fixed(0.0, lerp(0.5, i, k), u);
        } else {
            sp.fixed(-1.0, i, u);
        }
        sp.fixed(1.0, k, u);
    }
    sp.build()
}

fn flat_offset_spline(f: f32, g: f32, h: f32, i: f32, j: f32, k: f32) -> Spline {
    let mut sp = Builder::new(SplineAxis::Ridges);
    let l = (0.5 * (g - f)).max(k);
    let m = 5.0 * (h - g);
    sp.fixed(-1.0, f, l);
    sp.fixed(-0.4, g, l.min(m));
    sp.fixed(0.0, h, m);
    sp.fixed(0.4, i, 2.0 * (i - h));
    sp.fixed(1.0, j, 0.7 * (j - i));
    sp.build()
}

fn land_spline(f: f32, g: f32, h: f32, i: f32, j: f32, k: f32, bl: bool) -> Spline {
    let sp1 = Arc::new(ridge_spline(lerp(i, 0.6, 1.5), bl));
    let sp2 = Arc::new(ridge_spline(lerp(i, 0.6, 1.0), bl));
    let sp3 = Arc::new(ridge_spline(i, bl));
    let ih = 0.5 * i;
    let sp4 = Arc::new(flat_offset_spline(f - 0.15, ih, ih, ih, i * 0.6, 0.5));
    let sp5 = Arc::new(flat_offset_spline(f, j * i, g * i, ih, i * 0.6, 0.5));
    let sp6 = Arc::new(flat_offset_spline(f, j, j, g, h, 0.5));
    let sp7 = Arc::new(flat_offset_spline(f, j, j, g, h, 0.5));

    let mut valley = Builder::new(SplineAxis::Ridges);
    valley.fixed(-1.0, f, 0.0);
    valley.point(-0.4, sp6.clone(), 0.0);
    valley.fixed(0.0, h + 0.07, 0.0);
    let sp8 = Arc::new(valley.build());

    let sp9 = Arc::new(flat_offset_spline(-0.02, k, k, g, h, 0.0));

    let mut sp = Builder::new(SplineAxis::Erosion);
    sp.point(-0.85, sp1, 0.0);
    sp.point(-0.7, sp2, 0.0);
    sp.point(-0.4, sp3, 0.0);
    sp.point(-0.35, sp4, 0.0);
    sp.point(-0.1, sp5, 0.0);
    sp.point(0.2, sp6, 0.0);
    if bl {
        sp.point(0.4, sp7.clone(), 0.0);
        sp.point(0.45, sp8.clone(), 0.0);
        sp.point(0.55, sp8, 0.0);
        sp.point(0.58, sp7, 0.0);
    }
    sp.point(0.7, sp9, 0.0);
    sp.build()
}
