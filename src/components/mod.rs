//! ECS components for entities.
//!
//! Submodules overview:
//! - [`boss`] – boss target and the shots fired at it
//! - [`boxcollider`] – axis-aligned rectangular collider for overlap checks
//! - [`button`] – clickable overlay button with an action
//! - [`dynamictext`] – text drawn in screen space
//! - [`filledrect`] – solid rectangle drawn instead of a texture
//! - [`group`] – tag component for grouping entities by name
//! - [`mapposition`] – world-space position (top-left) for an entity
//! - [`persistent`] – marker for entities that survive a new run
//! - [`pickup`] – coils, bombs and power-ups drifting toward the player
//! - [`player`] – the motion-controlled player
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`screenposition`] – screen-space position for overlay elements
//! - [`scrolling`] – horizontally wrapping background
//! - [`sprite`] – textured sprite drawn at a fixed size
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod boss;
pub mod boxcollider;
pub mod button;
pub mod dynamictext;
pub mod filledrect;
pub mod group;
pub mod mapposition;
pub mod persistent;
pub mod pickup;
pub mod player;
pub mod rigidbody;
pub mod screenposition;
pub mod scrolling;
pub mod sprite;
pub mod zindex;
