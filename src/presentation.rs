//! Per-ball presentation state
//!
//! Color, selection and role are kept apart from [`crate::sim::Ball`] so the
//! physics never sees UI concepts. A [`Marker`] refers to its ball by id.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::sim::Ball;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Resting color of every ball
pub const DEFAULT_COLOR: Color = [1.0, 1.0, 1.0, 1.0];
/// Pointer over a ball
pub const HOVER_COLOR: Color = [1.0, 1.0, 0.4, 1.0];
/// Ball picked by the subject
pub const SELECTED_COLOR: Color = [1.0, 0.35, 0.2, 1.0];
/// Target cue at the start of a trial
pub const HIGHLIGHT_COLOR: Color = [0.2, 0.9, 0.3, 1.0];

/// Which group a ball belongs to (no effect on physics)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Target,
    Distractor,
}

/// Mouse selection state, written only by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionState {
    #[default]
    Neutral,
    Hovered,
    Selected,
}

/// Presentation record for one ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub ball_id: u32,
    pub role: Role,
    pub color: Color,
    pub selection: SelectionState,
    /// Sticky flag: stays set through hover changes until reset to neutral
    pub is_selected: bool,
}

impl Marker {
    pub fn new(ball_id: u32, role: Role) -> Self {
        Self {
            ball_id,
            role,
            color: DEFAULT_COLOR,
            selection: SelectionState::Neutral,
            is_selected: false,
        }
    }

    pub fn is_target(&self) -> bool {
        self.role == Role::Target
    }

    /// Move to a selection state and update the color to match
    pub fn apply_selection(&mut self, state: SelectionState) {
        self.selection = state;
        match state {
            SelectionState::Neutral => {
                self.color = DEFAULT_COLOR;
                self.is_selected = false;
            }
            SelectionState::Hovered => {
                self.color = HOVER_COLOR;
            }
            SelectionState::Selected => {
                self.color = SELECTED_COLOR;
                self.is_selected = true;
            }
        }
    }

    /// Reset everything the input layer or cue phase changed
    pub fn reset(&mut self) {
        self.apply_selection(SelectionState::Neutral);
    }
}

/// Whether a pointer at `point` is inside the ball (edge excluded)
pub fn hit_test(ball: &Ball, point: DVec2) -> bool {
    ball.pos.distance(point) < ball.radius
}
