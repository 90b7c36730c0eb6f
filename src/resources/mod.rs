//! ECS resources shared across systems.
//!
//! Submodules overview:
//! - [`debugmode`] – marker resource toggled by F11 to draw diagnostics
//! - [`gameconfig`] – settings loaded from the INI file
//! - [`gamestate`] – authoritative game state and pending transitions
//! - [`input`] – per-frame keyboard and mouse state
//! - [`motion`] – vision tracker state and the player step it produced
//! - [`powerup`] – the active power-up and its countdown
//! - [`runstate`] – score and boss progress of the current run
//! - [`screensize`] – window size in pixels
//! - [`spawner`] – randomized spawn timers
//! - [`systemsstore`] – registry of named one-shot systems
//! - [`texturestore`] – loaded textures by key
//! - [`worldsignals`] – global flags for cross-system signalling
//! - [`worldtime`] – frame delta and elapsed time

pub mod debugmode;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod motion;
pub mod powerup;
pub mod runstate;
pub mod screensize;
pub mod spawner;
pub mod systemsstore;
pub mod texturestore;
pub mod worldsignals;
pub mod worldtime;
