//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component are kept when a new run wipes
//! the world (observers, registered systems).

use bevy_ecs::prelude::Component;

/// Tag component used to mark entities that should survive a world reset.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
