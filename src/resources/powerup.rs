//! Active power-up resource.
//!
//! At most one power-up is active. Picking up another replaces it and
//! restarts the countdown.

use bevy_ecs::prelude::Resource;

use crate::components::pickup::PowerUpKind;

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ActivePowerUp {
    kind: Option<PowerUpKind>,
    remaining: f32,
}

impl ActivePowerUp {
    pub fn activate(&mut self, kind: PowerUpKind, duration: f32) {
        self.kind = Some(kind);
        self.remaining = duration;
    }

    /// Advance the countdown; returns the kind that just expired, if any.
    pub fn tick(&mut self, dt: f32) -> Option<PowerUpKind> {
        let kind = self.kind?;
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.clear();
            return Some(kind);
        }
        None
    }

    pub fn clear(&mut self) {
        self.kind = None;
        self.remaining = 0.0;
    }

    pub fn kind(&self) -> Option<PowerUpKind> {
        self.kind
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.kind == Some(kind)
    }

    /// Whole seconds left, rounded down.
    pub fn seconds_left(&self) -> u32 {
        self.remaining.max(0.0) as u32
    }

    /// `"Power-Up: Magnet - Timer: 7 s"`, or `None` when nothing is active.
    pub fn hud_text(&self) -> Option<String> {
        self.kind.map(|kind| {
            format!(
                "Power-Up: {} - Timer: {} s",
                kind.name(),
                self.seconds_left()
            )
        })
    }
}
