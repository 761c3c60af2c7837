use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::core::Point;
use crate::render::Color;
use crate::spiral::AngularSector;

/// One dot of the spiral fill layer, relative to the spiral center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub day_index: usize,
}

/// Samples a point inside an annular sector.
///
/// The angle is uniform in `[start, end)`. The radius uses the sqrt radial
/// transform `inner + sqrt(u) * (outer - inner)` with `u` uniform in `[0, 1)`.
/// Density per unit area is only uniform when `inner` is 0; for a ring it
/// falls off as `(r - inner) / r` towards the inner edge.
pub fn sample_annular_sector<R: Rng + ?Sized>(
    rng: &mut R,
    inner_radius: f64,
    outer_radius: f64,
    sector: AngularSector,
) -> Point {
    let angle = sector.start_angle + rng.gen_range(0.0..1.0_f64) * sector.span();
    let t = rng.gen_range(0.0..1.0_f64).sqrt();
    let radius = inner_radius + t * (outer_radius - inner_radius);
    Point::from_polar(radius, angle)
}

/// RNG for one render pass: seeded when a seed is configured, otherwise from entropy.
#[must_use]
pub fn scatter_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
