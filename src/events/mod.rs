//! Event types and observers.
//!
//! Submodules overview:
//! - [`button`] – a menu button was activated
//! - [`collision`] – two colliders overlap
//! - [`gamestate`] – apply a pending game state transition and run its hooks
//! - [`switchdebug`] – toggle debug mode

pub mod button;
pub mod collision;
pub mod gamestate;
pub mod switchdebug;
