//! Movement/gathering state machine
//!
//! ```text
//! Idle --(target chosen)--> Moving --(within one step)--> Gathering --(duration)--> Idle
//! Idle --(in-place action)------------------------------> Gathering
//! ```
//!
//! The target lives inside the state, so `Moving` can never lack one.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::entity::character::Character;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActionState {
    Idle,
    Moving { target: Vec2 },
    Gathering { target: Vec2, progress: u32 },
}

impl ActionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ActionState::Idle)
    }

    pub fn target(&self) -> Option<Vec2> {
        match self {
            ActionState::Idle => None,
            ActionState::Moving { target } | ActionState::Gathering { target, .. } => Some(*target),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionState::Idle => "idle",
            ActionState::Moving { .. } => "moving",
            ActionState::Gathering { .. } => "gathering",
        }
    }
}

/// Result of advancing the state machine by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Still walking or gathering (or idle, nothing to do)
    InProgress,
    /// Gathering finished; the character is Idle again
    Completed { target: Vec2 },
}

impl Character {
    /// Health-scaled speed: 0.5x base at zero health, 1.5x at full health
    pub fn current_speed(&self) -> f64 {
        self.base_speed * (0.5 + self.health_fraction())
    }

    /// Walk toward the current target. Returns true on arrival, and
    /// immediately when there is no target to walk to.
    pub fn move_to_target(&mut self) -> bool {
        let Some(target) = self.state.target() else {
            return true;
        };
        let speed = self.current_speed();
        self.position.step_toward(target, speed)
    }

    /// Start walking to `target`
    pub fn begin_moving(&mut self, target: Vec2) {
        self.state = ActionState::Moving { target };
    }

    /// Start gathering in place at the current position
    pub fn begin_gathering_here(&mut self) {
        self.state = ActionState::Gathering { target: self.position, progress: 0 };
    }

    /// Drop the target and return to Idle
    pub fn reset_action_state(&mut self) {
        self.state = ActionState::Idle;
    }

    /// Advance one tick
    pub fn advance(&mut self) -> StepOutcome {
        match self.state {
            ActionState::Idle => StepOutcome::InProgress,
            ActionState::Moving { target } => {
                if self.move_to_target() {
                    self.state = ActionState::Gathering { target, progress: 0 };
                }
                StepOutcome::InProgress
            }
            ActionState::Gathering { target, progress } => {
                let progress = progress + 1;
                if progress >= self.gathering_duration {
                    self.state = ActionState::Idle;
                    StepOutcome::Completed { target }
                } else {
                    self.state = ActionState::Gathering { target, progress };
                    StepOutcome::InProgress
                }
            }
        }
    }
}
