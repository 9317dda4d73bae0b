//! Simulation error types.
//!
//! The physics itself never fails: degenerate collisions are local no-ops.
//! Errors come from loading configuration and from placing balls when the
//! layout cannot be satisfied.

use std::fmt;

/// Top-level error enum for the arena simulation.
#[derive(Debug)]
pub enum SimError {
    /// No valid position was found for a ball, either because the sampling
    /// range is empty or because the attempt cap was reached.
    PlacementInfeasible {
        /// Ball that could not be placed.
        ball_id: u32,
        /// Draws made before giving up (0 when the range was empty).
        attempts: u64,
    },

    /// A configuration value is outside the domain the simulation supports.
    InvalidConfig {
        /// Field name as it appears in the config file.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// The config file could not be read.
    ConfigIo(std::io::Error),

    /// The config file is not valid JSON for [`crate::SimConfig`].
    ConfigParse(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::PlacementInfeasible { ball_id, attempts } => write!(
                f,
                "could not place ball {} after {} attempts (too many balls or too large a radius \
                 for the arena)",
                ball_id, attempts
            ),
            SimError::InvalidConfig {
                field,
                value,
                expected,
            } => write!(
                f,
                "config field '{}' = {} is invalid, expected {}",
                field, value, expected
            ),
            SimError::ConfigIo(err) => write!(f, "failed to read config: {}", err),
            SimError::ConfigParse(err) => write!(f, "failed to parse config: {}", err),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::ConfigIo(err) => Some(err),
            SimError::ConfigParse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::ConfigIo(err)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::ConfigParse(err)
    }
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;
