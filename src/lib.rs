//! MOT Arena - bouncing discs for multiple-object-tracking trials
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, walls, collisions, placement)
//! - `settings`: Immutable simulation configuration
//! - `presentation`: Per-ball color and selection markers for the UI layer
//! - `error`: Error type shared by config loading and placement

pub mod error;
pub mod presentation;
pub mod settings;
pub mod sim;

pub use error::{SimError, SimResult};
pub use presentation::{Color, Marker, Role, SelectionState};
pub use settings::{CollisionStrategy, DetectionMode, SimConfig};
pub use sim::{Ball, Boundaries, ExclusionZone, Frame, Session};

/// Simulation defaults
pub mod consts {
    /// Sub-steps per move (wall reflection runs after each one)
    pub const SUB_STEPS: u32 = 4;

    /// Arena (window) dimensions in pixels
    pub const ARENA_WIDTH: f64 = 1000.0;
    pub const ARENA_HEIGHT: f64 = 800.0;
    /// Thickness of the border drawn around the arena
    pub const WALL_THICKNESS: f64 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 20.0;
    /// Speed level chosen by the experimenter
    pub const SPEED: f64 = 4.0;
    /// Pixels per tick for one unit of speed
    pub const VELOCITY_FACTOR: f64 = 0.5;

    /// Arm length of the fixation cross at the arena center
    pub const CROSS_LENGTH: f64 = 20.0;
    /// Extra clearance around the cross arms when placing balls
    pub const CROSS_MARGIN: f64 = 2.0;

    /// Extra gap required between two placed balls
    pub const PLACEMENT_GAP: f64 = 1.0;
    /// Inset from the walls for sampled placement positions
    pub const PLACEMENT_INSET: i64 = 2;
    /// Default cap on placement draws per ball
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100_000;

    /// Trial layout
    pub const TARGET_COUNT: usize = 4;
    pub const DISTRACTOR_COUNT: usize = 4;
}
