//! Deterministic simulation module
//!
//! All motion and collision logic lives here. This module must be pure and
//! deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by ball ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod placement;
pub mod state;
pub mod tick;
pub mod velocity;

pub use collision::{
    balls_overlap, find_partners, overlapping_pairs, resolve, resolve_approximate, resolve_exact,
};
pub use motion::{Boundaries, move_ball, reflect_walls};
pub use placement::{ExclusionZone, place_balls};
pub use state::{Ball, BallFrame, Frame, Session};
pub use tick::tick;
pub use velocity::initial_velocity;
