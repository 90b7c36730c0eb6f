//! ECS systems.
//!
//! Submodules overview:
//! - [`boss`] – boss trigger and player fire during the encounter
//! - [`button`] – menu button activation by mouse or ENTER
//! - [`collision`] – overlap detection and the gameplay rules it triggers
//! - [`gamestate`] – pending state check and run conditions
//! - [`input`] – read keyboard and mouse from raylib
//! - [`magnet`] – pull coils toward the player while the magnet is active
//! - [`movement`] – velocity integration, background scroll, off-screen cleanup
//! - [`pause`] – ESC pauses a run
//! - [`playermotion`] – apply vision or keyboard steering to the player
//! - [`powerup`] – power-up countdown
//! - [`render`] – draw the world, HUD and overlays
//! - [`spawner`] – timed pickup spawning
//! - [`time`] – world time update
//! - [`vision`] – drain detection frames from the vision thread

pub mod boss;
pub mod button;
pub mod collision;
pub mod gamestate;
pub mod input;
pub mod magnet;
pub mod movement;
pub mod pause;
pub mod playermotion;
pub mod powerup;
pub mod render;
pub mod spawner;
pub mod time;
pub mod vision;
