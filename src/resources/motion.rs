//! Player motion state fed by the vision thread.

use bevy_ecs::prelude::Resource;

use crate::vision::motion::{Direction, MotionStep, MotionTracker};

/// How the player is steered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    Vision,
    Keyboard,
}

#[derive(Resource, Debug, Clone)]
pub struct PlayerMotion {
    pub tracker: MotionTracker,
    pub steering: Steering,
    /// Vertical displacement collected since the player was last moved.
    pub pending_dy: f32,
    /// Last tracked label, for the debug HUD.
    pub label: String,
    pub direction: Direction,
    /// Sequence number of the last applied detection frame.
    pub last_seq: u64,
}

impl PlayerMotion {
    pub fn new(steering: Steering) -> Self {
        Self {
            tracker: MotionTracker::new(),
            steering,
            pending_dy: 0.0,
            label: String::new(),
            direction: Direction::Still,
            last_seq: 0,
        }
    }

    /// Record a step computed from one detection frame.
    ///
    /// Tracked movement is doubled while `boosted`; idle drift is not.
    pub fn accumulate(&mut self, step: &MotionStep, boosted: bool) {
        let factor = if boosted && step.direction != Direction::Still {
            2.0
        } else {
            1.0
        };
        self.pending_dy += step.dy * factor;
        if let Some(label) = &step.label {
            self.label.clone_from(label);
        }
        self.direction = step.direction;
    }

    /// Take the collected displacement, leaving zero behind.
    pub fn take_dy(&mut self) -> f32 {
        std::mem::take(&mut self.pending_dy)
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
        self.pending_dy = 0.0;
        self.label.clear();
        self.direction = Direction::Still;
    }
}
