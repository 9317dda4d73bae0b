//! Ball-ball collision detection and response
//!
//! Detection is a plain distance check over the active set. Response comes in
//! two flavors that both treat the balls as equal unit masses and only touch
//! velocities, never positions:
//!
//! - [`resolve_approximate`]: impulse along the contact normal, then each
//!   ball is rescaled back to its own pre-collision speed.
//! - [`resolve_exact`]: elastic exchange of the normal components, with a
//!   final rescale so total kinetic energy is conserved exactly.

use glam::DVec2;

use super::state::Ball;
use crate::settings::CollisionStrategy;

/// Centers no further apart than the sum of radii (touching counts)
#[inline]
pub fn balls_overlap(a: &Ball, b: &Ball) -> bool {
    a.pos.distance(b.pos) <= a.radius + b.radius
}

/// Indices of every ball overlapping `balls[index]`, in set order
///
/// Each partner is reported at most once and the ball never pairs with
/// itself. Nothing stops the partner from finding `index` again when it is
/// processed later in the same tick.
pub fn find_partners(balls: &[Ball], index: usize) -> impl Iterator<Item = usize> + '_ {
    let me = &balls[index];
    balls
        .iter()
        .enumerate()
        .filter(move |&(i, other)| i != index && balls_overlap(me, other))
        .map(|(i, _)| i)
}

/// Every overlapping unordered pair `(i, j)` with `i < j`, each listed once
pub fn overlapping_pairs(balls: &[Ball]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            if balls_overlap(&balls[i], &balls[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Mutable borrows of two distinct balls in the same slice
pub fn pair_mut(balls: &mut [Ball], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    assert_ne!(i, j, "a ball cannot collide with itself");
    if i < j {
        let (head, tail) = balls.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = balls.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Dispatch to the configured response
///
/// Returns whether any velocity changed.
pub fn resolve(strategy: CollisionStrategy, a: &mut Ball, b: &mut Ball) -> bool {
    let changed = match strategy {
        CollisionStrategy::Approximate => resolve_approximate(a, b),
        CollisionStrategy::Exact => resolve_exact(a, b),
    };
    if changed {
        log::trace!(
            "{} collision {} <-> {}: {:?} / {:?}",
            strategy.as_str(),
            a.id,
            b.id,
            a.vel,
            b.vel
        );
    }
    changed
}

/// Momentum exchange with per-ball speed renormalization
///
/// No-op when the balls are already separating (prevents pumping energy
/// into a pair that is still overlapping on its way apart) or when their
/// centers coincide.
pub fn resolve_approximate(a: &mut Ball, b: &mut Ball) -> bool {
    let speed_a = a.vel.length();
    let speed_b = b.vel.length();

    let rel_pos = b.pos - a.pos;
    let rel_vel = b.vel - a.vel;

    if rel_pos.dot(rel_vel) > 0.0 {
        return false;
    }

    let distance = rel_pos.length();
    if distance == 0.0 {
        return false;
    }
    let normal = rel_pos / distance;

    let impulse = 2.0 * rel_vel.dot(normal);
    a.vel += impulse * normal;
    b.vel -= impulse * normal;

    a.vel = with_speed(a.vel, speed_a);
    b.vel = with_speed(b.vel, speed_b);
    true
}

/// Equal-mass elastic collision via normal/tangent decomposition
///
/// No-op when the centers coincide.
pub fn resolve_exact(a: &mut Ball, b: &mut Ball) -> bool {
    let rel_pos = b.pos - a.pos;
    let distance = rel_pos.length();
    if distance == 0.0 {
        return false;
    }

    let normal = rel_pos / distance;
    let tangent = normal.perp();

    let energy_before = kinetic_energy(a.vel, b.vel);

    // Normal components swap, tangential components stay
    let new_a = b.vel.dot(normal) * normal + a.vel.dot(tangent) * tangent;
    let new_b = a.vel.dot(normal) * normal + b.vel.dot(tangent) * tangent;

    let energy_after = kinetic_energy(new_a, new_b);
    let scale = if energy_after > 0.0 {
        (energy_before / energy_after).sqrt()
    } else {
        1.0
    };

    a.vel = new_a * scale;
    b.vel = new_b * scale;
    true
}

/// Kinetic energy of two unit masses
#[inline]
pub fn kinetic_energy(va: DVec2, vb: DVec2) -> f64 {
    0.5 * (va.length_squared() + vb.length_squared())
}

/// Rescale to `speed`, leaving a zero vector untouched
#[inline]
fn with_speed(vel: DVec2, speed: f64) -> DVec2 {
    let current = vel.length();
    if current > 0.0 {
        vel * (speed / current)
    } else {
        vel
    }
}
