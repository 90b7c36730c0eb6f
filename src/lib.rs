//! Coil Rush library.
//!
//! Exposes the game's ECS components, resources, systems, events and the
//! vision pipeline for the binaries and integration tests.

pub mod assets;
pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
pub mod vision;
