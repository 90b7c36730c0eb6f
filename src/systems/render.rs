//! Rendering.
//!
//! Draw order: background, sprites by [`ZIndex`], filled rectangles, HUD,
//! overlay texts and buttons, then debug information when [`DebugMode`] is
//! present. Textures are stretched to the size stored in their [`Sprite`].
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boss::Boss;
use crate::components::boxcollider::BoxCollider;
use crate::components::button::Button;
use crate::components::dynamictext::DynamicText;
use crate::components::filledrect::FilledRect;
use crate::components::mapposition::MapPosition;
use crate::components::screenposition::ScreenPosition;
use crate::components::scrolling::ScrollingBackground;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::motion::PlayerMotion;
use crate::resources::powerup::ActivePowerUp;
use crate::resources::runstate::RunState;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;

const HUD_FONT_SIZE: i32 = 30;
const BUTTON_FONT_SIZE: i32 = 30;
const BACKGROUND_COLOR: Color = Color {
    r: 20,
    g: 60,
    b: 90,
    a: 255,
};
const SHADE_COLOR: Color = Color {
    r: 0,
    g: 0,
    b: 0,
    a: 120,
};

fn draw_stretched(d: &mut RaylibDrawHandle, tex: &Texture2D, x: f32, y: f32, w: f32, h: f32) {
    let src = Rectangle {
        x: 0.0,
        y: 0.0,
        width: tex.width as f32,
        height: tex.height as f32,
    };
    let dest = Rectangle {
        x,
        y,
        width: w,
        height: h,
    };
    d.draw_texture_pro(tex, src, dest, Vector2::zero(), 0.0, Color::WHITE);
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    textures: Res<TextureStore>,
    (screen, state, config): (Res<ScreenSize>, Res<GameState>, Res<GameConfig>),
    (run, powerup, motion): (Res<RunState>, Res<ActivePowerUp>, Res<PlayerMotion>),
    debug: Option<Res<DebugMode>>,
    backgrounds: Query<(&ScrollingBackground, &Sprite)>,
    sprites: Query<(&Sprite, &MapPosition, Option<&ZIndex>)>,
    rects: Query<(&FilledRect, &MapPosition)>,
    colliders: Query<(&BoxCollider, &MapPosition)>,
    bosses: Query<&Boss>,
    texts: Query<(&DynamicText, &ScreenPosition)>,
    buttons: Query<(&Button, &ScreenPosition)>,
) {
    let mut d = rl.begin_drawing(&th);
    d.clear_background(BACKGROUND_COLOR);

    for (background, sprite) in backgrounds.iter() {
        if let Some(tex) = textures.get(&sprite.tex_key) {
            let x = -background.offset;
            draw_stretched(&mut d, tex, x, 0.0, sprite.width, sprite.height);
            draw_stretched(&mut d, tex, x + background.width, 0.0, sprite.width, sprite.height);
        }
    }

    let mut to_draw: Vec<(&Sprite, &MapPosition, i32)> = sprites
        .iter()
        .map(|(s, p, z)| (s, p, z.map_or(0, |z| z.0)))
        .collect();
    to_draw.sort_by_key(|(_, _, z)| *z);
    for (sprite, pos, _) in to_draw {
        if let Some(tex) = textures.get(&sprite.tex_key) {
            draw_stretched(&mut d, tex, pos.pos.x, pos.pos.y, sprite.width, sprite.height);
        }
    }

    for (rect, pos) in rects.iter() {
        d.draw_rectangle(
            pos.pos.x as i32,
            pos.pos.y as i32,
            rect.width as i32,
            rect.height as i32,
            rect.color,
        );
    }

    // HUD
    match state.get() {
        GameStates::Playing => {
            d.draw_text(&format!("Score: {}", run.score), 10, 10, HUD_FONT_SIZE, Color::WHITE);
            if let Some(text) = powerup.hud_text() {
                d.draw_text(&text, 10, 50, HUD_FONT_SIZE, Color::YELLOW);
            }
        }
        GameStates::BossFight => {
            let hits = bosses.iter().next().map_or(0, |b| b.hits);
            let text = format!("Shots Fired: {}/{}", hits, config.gameplay.boss_hits);
            d.draw_text(&text, 10, 10, HUD_FONT_SIZE, Color::WHITE);
        }
        _ => {}
    }

    // Overlay screens
    if matches!(
        state.get(),
        GameStates::Menu | GameStates::Paused | GameStates::GameOver
    ) {
        d.draw_rectangle(0, 0, screen.w, screen.h, SHADE_COLOR);
    }
    for (text, pos) in texts.iter() {
        let x = if text.centered {
            (screen.w - measure_text(&text.content, text.font_size)) / 2
        } else {
            pos.pos.x as i32
        };
        d.draw_text(
            &text.content,
            x,
            pos.pos.y as i32,
            text.font_size,
            text.color,
        );
    }
    for (button, pos) in buttons.iter() {
        let (x, y) = (pos.pos.x as i32, pos.pos.y as i32);
        let (w, h) = (button.size.x as i32, button.size.y as i32);
        d.draw_rectangle(x, y, w, h, button.color);
        d.draw_rectangle_lines(x, y, w, h, Color::BLACK);
        d.draw_text(
            &button.label,
            x + 50,
            y + (h - BUTTON_FONT_SIZE) / 2,
            BUTTON_FONT_SIZE,
            Color::BLACK,
        );
    }

    if debug.is_some() {
        for (collider, position) in colliders.iter() {
            let (x, y, w, h) = collider.get_aabb(position.pos);
            d.draw_rectangle_lines(x as i32, y as i32, w as i32, h as i32, Color::RED);
        }
        let label = if motion.label.is_empty() {
            "-"
        } else {
            motion.label.as_str()
        };
        let text = format!(
            "Label: {} | Direction: {}",
            label,
            motion.direction.as_str()
        );
        d.draw_text(&text, 10, screen.h - 60, 20, Color::WHITE);
        let fps = d.get_fps();
        d.draw_text(
            &format!("DEBUG (F11) | FPS: {} | frame #{}", fps, motion.last_seq),
            10,
            screen.h - 30,
            20,
            Color::WHITE,
        );
    }
}
