//! Sub-stepped movement and wall reflection
//!
//! A move covers one velocity worth of displacement split into
//! [`SUB_STEPS`] pieces. Walls are checked after every piece so a fast ball
//! cannot skip past a wall between checks.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::Ball;
use crate::consts::SUB_STEPS;

/// Inner edges of the arena walls (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundaries {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Boundaries {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Whether a ball of `radius` at `pos` lies fully between the walls
    pub fn contains(&self, pos: DVec2, radius: f64) -> bool {
        pos.x >= self.left + radius
            && pos.x <= self.right - radius
            && pos.y >= self.top + radius
            && pos.y <= self.bottom - radius
    }
}

/// Bounce a ball off any wall its edge has reached
///
/// The velocity component is pointed back inward (not just negated, so a
/// ball already heading inward is left alone) and the ball is clamped so its
/// edge sits exactly on the wall.
pub fn reflect_walls(ball: &mut Ball, bounds: &Boundaries) {
    let r = ball.radius;

    if ball.pos.x <= bounds.left + r {
        ball.vel.x = ball.vel.x.abs();
        ball.pos.x = bounds.left + r;
    }
    if ball.pos.x >= bounds.right - r {
        ball.vel.x = -ball.vel.x.abs();
        ball.pos.x = bounds.right - r;
    }
    if ball.pos.y <= bounds.top + r {
        ball.vel.y = ball.vel.y.abs();
        ball.pos.y = bounds.top + r;
    }
    if ball.pos.y >= bounds.bottom - r {
        ball.vel.y = -ball.vel.y.abs();
        ball.pos.y = bounds.bottom - r;
    }
}

/// One sub-step: advance by a fraction of the velocity, then reflect
#[inline]
pub fn sub_step(ball: &mut Ball, bounds: &Boundaries) {
    ball.pos += ball.vel / SUB_STEPS as f64;
    reflect_walls(ball, bounds);
}

/// A full move: `SUB_STEPS` sub-steps
pub fn move_ball(ball: &mut Ball, bounds: &Boundaries) {
    for _ in 0..SUB_STEPS {
        sub_step(ball, bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bounds() -> Boundaries {
        Boundaries {
            left: 10.0,
            right: 490.0,
            top: 10.0,
            bottom: 390.0,
        }
    }

    fn ball_at(x: f64, y: f64, dx: f64, dy: f64) -> Ball {
        let mut ball = Ball::new(1, 5.0, DVec2::new(dx, dy));
        ball.pos = DVec2::new(x, y);
        ball
    }

    #[test]
    fn test_wall_bounce_left() {
        let b = bounds();
        // Already 0.1 past the wall, heading further out
        let mut ball = ball_at(b.left + 5.0 - 0.1, 200.0, -3.0, 0.0);
        sub_step(&mut ball, &b);
        assert_eq!(ball.pos.x, b.left + 5.0);
        assert_eq!(ball.vel.x, 3.0);
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn test_wall_bounce_bottom_right_corner() {
        let b = bounds();
        let mut ball = ball_at(b.right - 6.0, b.bottom - 6.0, 8.0, 8.0);
        move_ball(&mut ball, &b);
        assert!(ball.vel.x < 0.0);
        assert!(ball.vel.y < 0.0);
        assert!(b.contains(ball.pos, ball.radius));
    }

    #[test]
    fn test_inward_ball_keeps_direction() {
        let b = bounds();
        // Touching the left wall but already moving right
        let mut ball = ball_at(b.left + 5.0, 200.0, 2.0, 0.0);
        reflect_walls(&mut ball, &b);
        assert_eq!(ball.vel.x, 2.0);
    }

    #[test]
    fn test_free_flight_moves_full_velocity() {
        let b = bounds();
        let mut ball = ball_at(200.0, 200.0, 4.0, -2.0);
        move_ball(&mut ball, &b);
        assert!((ball.pos - DVec2::new(204.0, 198.0)).length() < 1e-12);
        assert_eq!(ball.vel, DVec2::new(4.0, -2.0));
    }

    #[test]
    fn test_speed_preserved_by_bounce() {
        let b = bounds();
        let mut ball = ball_at(20.0, 20.0, -7.0, -5.0);
        let speed = ball.vel.length();
        for _ in 0..50 {
            move_ball(&mut ball, &b);
        }
        assert!((ball.vel.length() - speed).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_containment(
            x in 15.0f64..485.0,
            y in 15.0f64..385.0,
            dx in -60.0f64..60.0,
            dy in -60.0f64..60.0,
            moves in 1usize..200,
        ) {
            let b = bounds();
            let mut ball = ball_at(x, y, dx, dy);
            for _ in 0..moves {
                move_ball(&mut ball, &b);
                prop_assert!(b.contains(ball.pos, ball.radius));
            }
        }
    }
}
