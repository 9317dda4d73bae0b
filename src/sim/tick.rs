//! Per-frame simulation tick
//!
//! Each ball gets two full moves per tick with collision response in between.
//! Iteration follows slice order, which decides which ball of a pair applies
//! its half of the response first.

use super::collision::{find_partners, overlapping_pairs, pair_mut, resolve};
use super::motion::{Boundaries, move_ball};
use super::state::Ball;
use crate::settings::{DetectionMode, SimConfig};

/// Advance the active set by one tick
///
/// Returns how many pair resolutions were applied. In
/// [`DetectionMode::PerBall`] a single physical contact can count twice.
pub fn tick(balls: &mut [Ball], bounds: &Boundaries, config: &SimConfig) -> usize {
    match config.detection_mode {
        DetectionMode::PerBall => tick_per_ball(balls, bounds, config),
        DetectionMode::Deduplicated => tick_deduplicated(balls, bounds, config),
    }
}

/// Move, collide and move again, one ball at a time
fn tick_per_ball(balls: &mut [Ball], bounds: &Boundaries, config: &SimConfig) -> usize {
    let mut resolved = 0;
    // Reused across balls so a tick allocates at most once
    let mut partners = Vec::new();

    for i in 0..balls.len() {
        move_ball(&mut balls[i], bounds);

        // Resolution only touches velocities, so partners found up front
        // are the same ones a check-as-you-go loop would find
        partners.clear();
        partners.extend(find_partners(balls, i));
        for &j in &partners {
            let (me, other) = pair_mut(balls, i, j);
            if resolve(config.collision_strategy, me, other) {
                resolved += 1;
            }
        }

        move_ball(&mut balls[i], bounds);
    }

    resolved
}

/// Move everything, resolve each overlapping pair once, move everything again
fn tick_deduplicated(balls: &mut [Ball], bounds: &Boundaries, config: &SimConfig) -> usize {
    for ball in balls.iter_mut() {
        move_ball(ball, bounds);
    }

    let mut resolved = 0;
    for (i, j) in overlapping_pairs(balls) {
        let (a, b) = pair_mut(balls, i, j);
        if resolve(config.collision_strategy, a, b) {
            resolved += 1;
        }
    }

    for ball in balls.iter_mut() {
        move_ball(ball, bounds);
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CollisionStrategy;
    use crate::sim::Session;
    use glam::DVec2;
    use proptest::prelude::*;

    fn open_bounds() -> Boundaries {
        Boundaries {
            left: 0.0,
            right: 1000.0,
            top: 0.0,
            bottom: 1000.0,
        }
    }

    /// Two overlapping balls closing head-on along x
    fn head_on_pair() -> Vec<Ball> {
        let mut a = Ball::new(1, 5.0, DVec2::new(1.0, 0.0));
        a.pos = DVec2::new(100.0, 100.0);
        let mut b = Ball::new(2, 5.0, DVec2::new(-1.0, 0.0));
        b.pos = DVec2::new(105.0, 100.0);
        vec![a, b]
    }

    fn config(strategy: CollisionStrategy, mode: DetectionMode) -> SimConfig {
        SimConfig {
            collision_strategy: strategy,
            detection_mode: mode,
            ..Default::default()
        }
    }

    #[test]
    fn test_per_ball_exact_resolves_pair_twice() {
        let mut balls = head_on_pair();
        let cfg = config(CollisionStrategy::Exact, DetectionMode::PerBall);

        let resolved = tick(&mut balls, &open_bounds(), &cfg);

        // The second ball re-detects the pair and swaps the velocities back
        assert_eq!(resolved, 2);
        assert!((balls[0].vel - DVec2::new(1.0, 0.0)).length() < 1e-12);
        assert!((balls[1].vel - DVec2::new(-1.0, 0.0)).length() < 1e-12);
        assert!((balls[0].pos - DVec2::new(100.0, 100.0)).length() < 1e-12);
        assert!((balls[1].pos - DVec2::new(105.0, 100.0)).length() < 1e-12);
    }

    #[test]
    fn test_deduplicated_exact_resolves_pair_once() {
        let mut balls = head_on_pair();
        let cfg = config(CollisionStrategy::Exact, DetectionMode::Deduplicated);

        let resolved = tick(&mut balls, &open_bounds(), &cfg);

        assert_eq!(resolved, 1);
        assert!((balls[0].vel - DVec2::new(-1.0, 0.0)).length() < 1e-12);
        assert!((balls[1].vel - DVec2::new(1.0, 0.0)).length() < 1e-12);
        assert!((balls[0].pos - DVec2::new(100.0, 100.0)).length() < 1e-12);
        assert!((balls[1].pos - DVec2::new(105.0, 100.0)).length() < 1e-12);
    }

    #[test]
    fn test_per_ball_approximate_second_pass_is_separating() {
        let mut balls = head_on_pair();
        let cfg = config(CollisionStrategy::Approximate, DetectionMode::PerBall);

        let resolved = tick(&mut balls, &open_bounds(), &cfg);

        // The re-detection happens, but the pair is already moving apart
        assert_eq!(resolved, 1);
        assert!((balls[0].vel - DVec2::new(-1.0, 0.0)).length() < 1e-12);
        assert!((balls[1].vel - DVec2::new(1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_per_ball_visits_every_partner_of_every_ball() {
        // Three resting balls all touching each other
        let positions = [(100.0, 100.0), (106.0, 100.0), (103.0, 105.0)];
        let cluster = || -> Vec<Ball> {
            positions
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| {
                    let mut ball = Ball::new(i as u32 + 1, 5.0, DVec2::ZERO);
                    ball.pos = DVec2::new(x, y);
                    ball
                })
                .collect()
        };

        let mut balls = cluster();
        let per_ball = config(CollisionStrategy::Exact, DetectionMode::PerBall);
        assert_eq!(tick(&mut balls, &open_bounds(), &per_ball), 6);

        let mut balls = cluster();
        let dedup = config(CollisionStrategy::Exact, DetectionMode::Deduplicated);
        assert_eq!(tick(&mut balls, &open_bounds(), &dedup), 3);
    }

    #[test]
    fn test_lone_ball_moves_two_velocities() {
        let mut ball = Ball::new(1, 5.0, DVec2::new(3.0, -2.0));
        ball.pos = DVec2::new(500.0, 500.0);
        let mut balls = vec![ball];
        let resolved = tick(&mut balls, &open_bounds(), &SimConfig::default());
        assert_eq!(resolved, 0);
        assert!((balls[0].pos - DVec2::new(506.0, 496.0)).length() < 1e-12);
    }

    fn run_session(config: SimConfig, seed: u64, ticks: usize) -> Session {
        let mut session = Session::new(config, seed).unwrap();
        session.start_trial().unwrap();
        for _ in 0..ticks {
            session.advance_tick();
        }
        session
    }

    #[test]
    fn test_approximate_keeps_every_speed() {
        let cfg = SimConfig {
            target_count: 6,
            distractor_count: 10,
            speed: 12.0,
            ..Default::default()
        };
        let expected = cfg.initial_speed();
        let session = run_session(cfg, 2024, 600);
        for ball in session.balls() {
            assert!(
                (ball.speed() - expected).abs() < 1e-6,
                "ball {} speed {}",
                ball.id,
                ball.speed()
            );
        }
    }

    #[test]
    fn test_exact_keeps_total_energy() {
        let cfg = SimConfig {
            target_count: 6,
            distractor_count: 10,
            speed: 12.0,
            collision_strategy: CollisionStrategy::Exact,
            ..Default::default()
        };
        let per_ball = 0.5 * cfg.initial_speed().powi(2);
        let expected = per_ball * cfg.ball_count() as f64;
        let session = run_session(cfg, 77, 600);
        let total: f64 = session
            .balls()
            .iter()
            .map(|b| 0.5 * b.vel.length_squared())
            .sum();
        assert!((total - expected).abs() < 1e-6 * expected);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_walls_contain_every_ball(
            seed in any::<u64>(),
            exact in any::<bool>(),
            dedup in any::<bool>(),
            speed in 1.0f64..40.0,
        ) {
            let cfg = SimConfig {
                speed,
                collision_strategy: if exact { CollisionStrategy::Exact } else { CollisionStrategy::Approximate },
                detection_mode: if dedup { DetectionMode::Deduplicated } else { DetectionMode::PerBall },
                target_count: 5,
                distractor_count: 7,
                ..Default::default()
            };
            let mut session = Session::new(cfg, seed).unwrap();
            session.start_trial().unwrap();
            for _ in 0..120 {
                session.advance_tick();
                let bounds = *session.boundaries();
                for ball in session.balls() {
                    prop_assert!(bounds.contains(ball.pos, ball.radius));
                }
            }
        }
    }
}
