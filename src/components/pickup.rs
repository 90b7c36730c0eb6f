//! Things drifting toward the player.

use bevy_ecs::prelude::Component;

/// Power-up flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    SpeedBoost,
    Magnet,
    X2,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::SpeedBoost, PowerUpKind::Magnet, PowerUpKind::X2];

    /// Name shown in the HUD.
    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::SpeedBoost => "Speed Boost",
            PowerUpKind::Magnet => "Magnet",
            PowerUpKind::X2 => "X2",
        }
    }

    /// Texture key in the [`TextureStore`](crate::resources::texturestore::TextureStore).
    pub fn tex_key(&self) -> &'static str {
        match self {
            PowerUpKind::SpeedBoost => "speed_boost",
            PowerUpKind::Magnet => "magnet",
            PowerUpKind::X2 => "x2",
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pickup {
    Coil,
    Bomb,
    PowerUp(PowerUpKind),
}

impl Pickup {
    pub fn tex_key(&self) -> &'static str {
        match self {
            Pickup::Coil => "coil",
            Pickup::Bomb => "bomb",
            Pickup::PowerUp(kind) => kind.tex_key(),
        }
    }
}
