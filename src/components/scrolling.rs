use bevy_ecs::prelude::Component;

/// Background layer scrolling left and wrapping every `width` pixels.
///
/// Drawn twice, at `-offset` and `width - offset`.
#[derive(Component, Clone, Copy, Debug)]
pub struct ScrollingBackground {
    pub offset: f32,
    /// Pixels per second.
    pub speed: f32,
    pub width: f32,
}

impl ScrollingBackground {
    pub fn new(speed: f32, width: f32) -> Self {
        Self {
            offset: 0.0,
            speed,
            width,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if self.width <= 0.0 {
            return;
        }
        self.offset = (self.offset + self.speed * dt).rem_euclid(self.width);
    }
}
