//! Initial ball layout by rejection sampling
//!
//! Each ball draws random integer positions until it clears every ball
//! placed before it and the fixation zone at the arena center. With
//! `max_attempts == None` an impossible layout loops forever; callers that
//! cannot guarantee a feasible packing should pass a cap.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::motion::Boundaries;
use super::state::Ball;
use crate::consts::{CROSS_MARGIN, PLACEMENT_GAP, PLACEMENT_INSET};
use crate::error::{SimError, SimResult};

/// Circle around the fixation cross that balls may not start in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExclusionZone {
    pub center: DVec2,
    pub radius: f64,
}

impl ExclusionZone {
    /// Zone covering a cross with arms of `cross_length` at the window center
    ///
    /// The radius reaches the cross's corner plus a small margin, and the
    /// center uses integer-halved window dimensions.
    pub fn for_cross(arena_width: f64, arena_height: f64, cross_length: f64) -> Self {
        let reach = cross_length + CROSS_MARGIN;
        Self {
            center: DVec2::new((arena_width / 2.0).floor(), (arena_height / 2.0).floor()),
            radius: reach.hypot(reach),
        }
    }

    /// Whether a ball at `pos` would touch the zone
    pub fn blocks(&self, pos: DVec2, radius: f64) -> bool {
        pos.distance(self.center) - radius <= self.radius
    }
}

/// Half-open integer range `[lo, hi)` for one axis, `None` if empty
fn axis_range(min_wall: f64, max_wall: f64, radius: f64) -> Option<(i64, i64)> {
    let lo = (min_wall + radius).floor() as i64 + PLACEMENT_INSET;
    let hi = (max_wall - radius).floor() as i64 - PLACEMENT_INSET;
    (lo < hi).then_some((lo, hi))
}

/// Move a ball to a uniformly random integer spot away from the walls
///
/// Returns `false` (ball untouched) when no such spot exists.
pub fn shuffle_position<R: Rng + ?Sized>(ball: &mut Ball, bounds: &Boundaries, rng: &mut R) -> bool {
    let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (
        axis_range(bounds.left, bounds.right, ball.radius),
        axis_range(bounds.top, bounds.bottom, ball.radius),
    ) else {
        return false;
    };

    ball.pos = DVec2::new(
        rng.random_range(x_lo..x_hi) as f64,
        rng.random_range(y_lo..y_hi) as f64,
    );
    true
}

/// Whether `ball` keeps its distance from every ball in `placed`
fn clear_of(ball: &Ball, placed: &[Ball]) -> bool {
    placed
        .iter()
        .all(|other| ball.pos.distance(other.pos) > ball.radius + other.radius + PLACEMENT_GAP)
}

/// Give every ball a collision-free starting position
///
/// Balls are placed in slice order; each is checked only against the balls
/// before it. On error, balls before the failing one keep their new
/// positions and the rest are unspecified.
pub fn place_balls<R: Rng + ?Sized>(
    balls: &mut [Ball],
    bounds: &Boundaries,
    zone: &ExclusionZone,
    rng: &mut R,
    max_attempts: Option<u32>,
) -> SimResult<()> {
    let mut total_attempts: u64 = 0;

    for index in 0..balls.len() {
        let (placed, rest) = balls.split_at_mut(index);
        let ball = &mut rest[0];

        let mut attempts: u64 = 0;
        loop {
            if let Some(cap) = max_attempts {
                if attempts >= u64::from(cap) {
                    log::warn!("Gave up placing ball {} after {} attempts", ball.id, attempts);
                    return Err(SimError::PlacementInfeasible {
                        ball_id: ball.id,
                        attempts,
                    });
                }
            }

            if !shuffle_position(ball, bounds, rng) {
                log::warn!("No room between the walls for ball {}", ball.id);
                return Err(SimError::PlacementInfeasible {
                    ball_id: ball.id,
                    attempts: 0,
                });
            }
            attempts += 1;

            if clear_of(ball, placed) && !zone.blocks(ball.pos, ball.radius) {
                break;
            }
        }
        total_attempts += attempts;
    }

    log::debug!(
        "Placed {} balls in {} attempts",
        balls.len(),
        total_attempts
    );
    Ok(())
}
