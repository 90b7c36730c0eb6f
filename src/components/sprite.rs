use bevy_ecs::prelude::Component;

/// Sprite is identified by a texture key and the size it is drawn at.
///
/// Textures are stretched to `width` x `height`, so source images of any
/// resolution can be used.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            width,
            height,
        }
    }
}
