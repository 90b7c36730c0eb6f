use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

#[derive(Component, Clone, Debug)]
/// Text drawn at the entity's [`ScreenPosition`](super::screenposition::ScreenPosition)
/// with raylib's default font.
pub struct DynamicText {
    /// The text content to render.
    pub content: String,
    /// Font size in pixels.
    pub font_size: i32,
    /// Color of the text.
    pub color: Color,
    /// Ignore the x coordinate and center horizontally on screen.
    pub centered: bool,
}

impl DynamicText {
    pub fn new(content: impl Into<String>, font_size: i32, color: Color) -> Self {
        Self {
            content: content.into(),
            font_size,
            color,
            centered: false,
        }
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }
}
