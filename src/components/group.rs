use bevy_ecs::prelude::Component;

/// Names the role of an entity ("player", "pickup", "shot", "ui", ...).
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Group {
    name: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
