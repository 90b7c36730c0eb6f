//! State hooks addressable by name.
//!
//! [`register_hooks`](crate::game::register_hooks) fills the store once at
//! startup; the state-change observer looks hooks up by the names
//! [`transition_hooks`](crate::events::gamestate::transition_hooks) returns.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

#[derive(Resource, Default)]
pub struct SystemsStore {
    hooks: FxHashMap<&'static str, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, id: SystemId) {
        self.hooks.insert(name, id);
    }

    pub fn get(&self, name: &str) -> Option<SystemId> {
        self.hooks.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
