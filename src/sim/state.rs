//! Simulation state and the session that owns it
//!
//! A session holds the balls for one subject run. Balls are created once and
//! only repositioned between trials.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::motion::Boundaries;
use super::placement::{ExclusionZone, place_balls};
use super::tick::tick;
use super::velocity::initial_velocity;
use crate::error::SimResult;
use crate::presentation::{
    Color, DEFAULT_COLOR, HIGHLIGHT_COLOR, Marker, Role, SelectionState, hit_test,
};
use crate::settings::SimConfig;

/// A moving disc (physics only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
}

impl Ball {
    /// Ball at the origin; placement gives it a real position later
    pub fn new(id: u32, radius: f64, vel: DVec2) -> Self {
        Self {
            id,
            pos: DVec2::ZERO,
            vel,
            radius,
        }
    }

    /// Ball with the configured radius and a random initial velocity
    pub fn spawn<R: Rng + ?Sized>(id: u32, config: &SimConfig, rng: &mut R) -> Self {
        let vel = initial_velocity(rng, config.speed, config.velocity_factor);
        Self::new(id, config.ball_radius, vel)
    }

    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}

/// Draw data for one ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallFrame {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
    pub role: Role,
    pub selection: SelectionState,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub balls: Vec<BallFrame>,
}

/// One subject run: configuration, RNG, balls and their markers
#[derive(Debug, Clone)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    config: SimConfig,
    bounds: Boundaries,
    zone: ExclusionZone,
    rng: Pcg32,
    /// Active set: targets first, then distractors, in id order
    balls: Vec<Ball>,
    /// Parallel to `balls`
    markers: Vec<Marker>,
    /// Ticks since the current trial started
    pub time_ticks: u64,
    /// Trials started so far
    pub trial_count: u32,
}

impl Session {
    /// Validate the config and spawn all balls with random velocities
    pub fn new(config: SimConfig, seed: u64) -> SimResult<Self> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let roles = std::iter::repeat_n(Role::Target, config.target_count)
            .chain(std::iter::repeat_n(Role::Distractor, config.distractor_count));

        let mut balls = Vec::with_capacity(config.ball_count());
        let mut markers = Vec::with_capacity(config.ball_count());
        for (id, role) in (1u32..).zip(roles) {
            balls.push(Ball::spawn(id, &config, &mut rng));
            markers.push(Marker::new(id, role));
        }

        log::info!(
            "Session seed {}: {} targets, {} distractors, {} physics",
            seed,
            config.target_count,
            config.distractor_count,
            config.collision_strategy.as_str()
        );

        Ok(Self {
            seed,
            bounds: config.boundaries(),
            zone: config.exclusion_zone(),
            config,
            rng,
            balls,
            markers,
            time_ticks: 0,
            trial_count: 0,
        })
    }

    /// Reset markers and lay the balls out for a new trial
    pub fn start_trial(&mut self) -> SimResult<()> {
        for marker in &mut self.markers {
            marker.reset();
        }
        place_balls(
            &mut self.balls,
            &self.bounds,
            &self.zone,
            &mut self.rng,
            self.config.max_placement_attempts,
        )?;
        self.time_ticks = 0;
        self.trial_count += 1;
        log::debug!("Trial {} laid out", self.trial_count);
        Ok(())
    }

    /// Advance every ball by one tick
    pub fn advance_tick(&mut self) {
        let resolved = tick(&mut self.balls, &self.bounds, &self.config);
        self.time_ticks += 1;
        if resolved > 0 {
            log::trace!("Tick {}: {} collisions resolved", self.time_ticks, resolved);
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn boundaries(&self) -> &Boundaries {
        &self.bounds
    }

    pub fn exclusion_zone(&self) -> &ExclusionZone {
        &self.zone
    }

    /// The whole active set
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn marker(&self, id: u32) -> Option<&Marker> {
        self.markers.iter().find(|m| m.ball_id == id)
    }

    pub fn targets(&self) -> impl Iterator<Item = &Ball> {
        self.with_role(Role::Target)
    }

    pub fn distractors(&self) -> impl Iterator<Item = &Ball> {
        self.with_role(Role::Distractor)
    }

    fn with_role(&self, role: Role) -> impl Iterator<Item = &Ball> {
        self.balls
            .iter()
            .zip(&self.markers)
            .filter(move |(_, m)| m.role == role)
            .map(|(b, _)| b)
    }

    /// Id of the first ball under the pointer
    pub fn ball_at(&self, point: DVec2) -> Option<u32> {
        self.balls
            .iter()
            .find(|b| hit_test(b, point))
            .map(|b| b.id)
    }

    /// Set a ball's selection state; `false` if the id is unknown
    pub fn set_selection(&mut self, id: u32, state: SelectionState) -> bool {
        match self.markers.iter_mut().find(|m| m.ball_id == id) {
            Some(marker) => {
                marker.apply_selection(state);
                true
            }
            None => false,
        }
    }

    pub fn selected_ids(&self) -> Vec<u32> {
        self.markers
            .iter()
            .filter(|m| m.is_selected)
            .map(|m| m.ball_id)
            .collect()
    }

    pub fn clear_selection(&mut self) {
        for marker in &mut self.markers {
            marker.reset();
        }
    }

    /// Paint the targets with the cue color, or back to the default
    pub fn highlight_targets(&mut self, on: bool) {
        let color = if on { HIGHLIGHT_COLOR } else { DEFAULT_COLOR };
        for marker in self.markers.iter_mut().filter(|m| m.is_target()) {
            marker.color = color;
        }
    }

    /// Snapshot for drawing
    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.time_ticks,
            balls: self
                .balls
                .iter()
                .zip(&self.markers)
                .map(|(b, m)| BallFrame {
                    id: b.id,
                    x: b.pos.x,
                    y: b.pos.y,
                    radius: b.radius,
                    color: m.color,
                    role: m.role,
                    selection: m.selection,
                })
                .collect(),
        }
    }
}
