//! Initial ball velocity
//!
//! The horizontal component is uniform in `[0, v]` and the vertical one is
//! fixed by the magnitude, each with an independent random sign. This does
//! not give a uniform direction: headings near the axes are more likely.

use glam::DVec2;
use rand::Rng;

/// Random velocity with magnitude `speed * velocity_factor`
pub fn initial_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f64, velocity_factor: f64) -> DVec2 {
    let v = speed * velocity_factor;

    let dx = random_sign(rng) * rng.random_range(0.0..=v);
    // Clamp guards against a tiny negative from rounding when |dx| == v
    let dy = random_sign(rng) * (v * v - dx * dx).max(0.0).sqrt();

    DVec2::new(dx, dy)
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}
