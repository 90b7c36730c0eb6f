//! Randomized spawn timers.
//!
//! Each pickup kind has a countdown. When it has expired and fewer than the
//! configured maximum are alive, one pickup is spawned and the countdown is
//! re-armed with a random interval. An expired timer whose cap is reached
//! stays expired, so the spawn happens as soon as room frees up.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;

use crate::resources::gameconfig::GameplaySettings;

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    remaining: f32,
    interval: (f32, f32),
    max_alive: usize,
}

impl SpawnTimer {
    /// Timers start expired.
    pub fn new(interval: (f32, f32), max_alive: usize) -> Self {
        Self {
            remaining: 0.0,
            interval,
            max_alive,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Advance by `dt`. Returns true when a spawn should happen now, in
    /// which case the timer is re-armed.
    pub fn tick(&mut self, dt: f32, alive: usize, rng: &mut Rng) -> bool {
        if self.remaining > 0.0 {
            self.remaining -= dt;
        }
        if self.remaining > 0.0 || alive >= self.max_alive {
            return false;
        }
        let (min, max) = self.interval;
        self.remaining = min + rng.f32() * (max - min);
        true
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SpawnTimers {
    pub coil: SpawnTimer,
    pub bomb: SpawnTimer,
    pub powerup: SpawnTimer,
    pub rng: Rng,
}

impl SpawnTimers {
    pub fn new(settings: &GameplaySettings) -> Self {
        Self::with_rng(settings, Rng::new())
    }

    pub fn with_rng(settings: &GameplaySettings, rng: Rng) -> Self {
        Self {
            coil: SpawnTimer::new(settings.coil_interval, settings.coil_max),
            bomb: SpawnTimer::new(settings.bomb_interval, settings.bomb_max),
            powerup: SpawnTimer::new(settings.powerup_interval, settings.powerup_max),
            rng,
        }
    }
}
