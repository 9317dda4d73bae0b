//! Simulation configuration
//!
//! Read once at startup and handed to the session by value. Nothing in the
//! simulation mutates it afterwards.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult};
use crate::sim::{Boundaries, ExclusionZone};

/// Ball-ball collision response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollisionStrategy {
    /// Impulse along the contact normal, then each ball keeps its own speed
    #[default]
    Approximate,
    /// Equal-mass elastic exchange of normal components, energy rescaled
    Exact,
}

impl CollisionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionStrategy::Approximate => "approximate",
            CollisionStrategy::Exact => "exact",
        }
    }
}

impl FromStr for CollisionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approximate" | "approx" | "original" => Ok(CollisionStrategy::Approximate),
            "exact" | "elastic" => Ok(CollisionStrategy::Exact),
            other => Err(format!(
                "unknown collision strategy '{}', expected 'approximate' or 'exact'",
                other
            )),
        }
    }
}

/// How overlapping pairs are found during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    /// Each ball is moved, checks every other ball, resolves, and moves again.
    /// A pair can be resolved twice in one tick if both balls see each other.
    #[default]
    PerBall,
    /// All balls move, every unordered pair is resolved at most once, all
    /// balls move again.
    Deduplicated,
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Arena ===
    /// Window width in pixels
    pub arena_width: f64,
    /// Window height in pixels
    pub arena_height: f64,
    /// Border thickness; the walls sit this far inside the window edges
    pub wall_thickness: f64,

    // === Balls ===
    pub ball_radius: f64,
    /// Speed level (scaled by `velocity_factor` into pixels per move)
    pub speed: f64,
    pub velocity_factor: f64,
    pub target_count: usize,
    pub distractor_count: usize,

    // === Physics ===
    pub collision_strategy: CollisionStrategy,
    pub detection_mode: DetectionMode,

    // === Placement ===
    /// Arm length of the fixation cross kept clear at placement time
    pub cross_length: f64,
    /// Draw cap per ball; `None` retries forever and can hang on
    /// layouts that do not fit
    pub max_placement_attempts: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            wall_thickness: WALL_THICKNESS,

            ball_radius: BALL_RADIUS,
            speed: SPEED,
            velocity_factor: VELOCITY_FACTOR,
            target_count: TARGET_COUNT,
            distractor_count: DISTRACTOR_COUNT,

            collision_strategy: CollisionStrategy::Approximate,
            detection_mode: DetectionMode::PerBall,

            cross_length: CROSS_LENGTH,
            max_placement_attempts: Some(MAX_PLACEMENT_ATTEMPTS),
        }
    }
}

impl SimConfig {
    /// Magnitude of every freshly spawned ball's velocity
    pub fn initial_speed(&self) -> f64 {
        self.speed * self.velocity_factor
    }

    /// Total number of simulated balls
    pub fn ball_count(&self) -> usize {
        self.target_count + self.distractor_count
    }

    /// Inner edges of the border walls
    pub fn boundaries(&self) -> Boundaries {
        Boundaries {
            left: self.wall_thickness,
            right: self.arena_width - self.wall_thickness,
            top: self.wall_thickness,
            bottom: self.arena_height - self.wall_thickness,
        }
    }

    /// Region around the fixation cross that placement keeps clear
    pub fn exclusion_zone(&self) -> ExclusionZone {
        ExclusionZone::for_cross(self.arena_width, self.arena_height, self.cross_length)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SimResult<()> {
        require("ball_radius", self.ball_radius, self.ball_radius > 0.0, "finite and > 0")?;
        require("speed", self.speed, self.speed >= 0.0, "finite and >= 0")?;
        require(
            "velocity_factor",
            self.velocity_factor,
            self.velocity_factor >= 0.0,
            "finite and >= 0",
        )?;
        // Each factor can be finite while the product overflows
        require(
            "speed",
            self.speed,
            self.initial_speed().is_finite(),
            "speed * velocity_factor to be finite",
        )?;
        require(
            "wall_thickness",
            self.wall_thickness,
            self.wall_thickness >= 0.0,
            "finite and >= 0",
        )?;
        require("cross_length", self.cross_length, self.cross_length >= 0.0, "finite and >= 0")?;
        require("arena_width", self.arena_width, true, "finite")?;
        require("arena_height", self.arena_height, true, "finite")?;

        // One ball plus the placement inset must fit between opposite walls
        let bounds = self.boundaries();
        let min_span = 2.0 * self.ball_radius + 2.0 * PLACEMENT_INSET as f64 + 1.0;
        require(
            "arena_width",
            self.arena_width,
            bounds.width() >= min_span,
            "room for one ball between the walls",
        )?;
        require(
            "arena_height",
            self.arena_height,
            bounds.height() >= min_span,
            "room for one ball between the walls",
        )?;

        if self.max_placement_attempts == Some(0) {
            return Err(SimError::InvalidConfig {
                field: "max_placement_attempts",
                value: 0.0,
                expected: ">= 1 or null",
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON config; missing keys take defaults
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write this config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }
}

/// `InvalidConfig` unless `value` is finite and `ok` holds
fn require(field: &'static str, value: f64, ok: bool, expected: &'static str) -> SimResult<()> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(SimError::InvalidConfig {
            field,
            value,
            expected,
        })
    }
}
