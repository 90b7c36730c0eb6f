//! Draw order of world sprites.

use bevy_ecs::prelude::Component;

/// Higher values are drawn later (on top). Sprites without one draw at 0.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const PICKUP: ZIndex = ZIndex(5);
    pub const BOSS: ZIndex = ZIndex(8);
    pub const PLAYER: ZIndex = ZIndex(10);
}
