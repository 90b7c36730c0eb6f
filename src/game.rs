//! Run setup, overlay screens and spawn helpers.
//!
//! The `pub fn`s taking system parameters are one-shot hooks registered in
//! the [`SystemsStore`](crate::resources::systemsstore::SystemsStore) and run
//! on state transitions (see
//! [`transition_hooks`](crate::events::gamestate::transition_hooks)).

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::{Color, Vector2};

use crate::components::boss::{Boss, Shot};
use crate::components::boxcollider::BoxCollider;
use crate::components::button::{Button, ButtonAction};
use crate::components::dynamictext::DynamicText;
use crate::components::filledrect::FilledRect;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::persistent::Persistent;
use crate::components::pickup::Pickup;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::screenposition::ScreenPosition;
use crate::components::scrolling::ScrollingBackground;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::events::button::button_clicked_observer;
use crate::events::gamestate::observe_gamestate_change_event;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::gameconfig::{GameConfig, GameplaySettings};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::motion::{PlayerMotion, Steering};
use crate::resources::powerup::ActivePowerUp;
use crate::resources::runstate::RunState;
use crate::resources::screensize::ScreenSize;
use crate::resources::spawner::SpawnTimers;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::worldsignals::{QUIT_GAME, WorldSignals};
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::collision_observer;

pub const UI_GROUP: &str = "ui";
const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 100.0;

// ------------------------------------------------------------------
// Spawn helpers
// ------------------------------------------------------------------

pub fn spawn_player(commands: &mut Commands, settings: &GameplaySettings, screen: ScreenSize) -> Entity {
    let size = settings.player_size;
    let (x, y) = player_home(settings, screen);
    commands
        .spawn((
            Player,
            Group::new("player"),
            MapPosition::new(x, y),
            Sprite::new("player", size, size),
            BoxCollider::new(size, size),
            ZIndex::PLAYER,
        ))
        .id()
}

/// Top-left corner that centres the player at `(screen_w/4, screen_h/2)`.
pub fn player_home(settings: &GameplaySettings, screen: ScreenSize) -> (f32, f32) {
    let half = settings.player_size / 2.0;
    (
        (screen.w / 4) as f32 - half,
        (screen.h / 2) as f32 - half,
    )
}

pub fn spawn_pickup(
    commands: &mut Commands,
    pickup: Pickup,
    x: f32,
    y: f32,
    settings: &GameplaySettings,
) -> Entity {
    let size = settings.pickup_size;
    commands
        .spawn((
            pickup,
            Group::new("pickup"),
            MapPosition::new(x, y),
            Sprite::new(pickup.tex_key(), size, size),
            BoxCollider::new(size, size),
            RigidBody::new(-settings.scroll_speed, 0.0),
            ZIndex::PICKUP,
        ))
        .id()
}

pub fn spawn_background(commands: &mut Commands, settings: &GameplaySettings, screen: ScreenSize) {
    let (w, h) = (screen.w as f32, screen.h as f32);
    commands.spawn((
        Group::new("background"),
        ScrollingBackground::new(settings.background_speed, w),
        Sprite::new("background", w, h),
    ));
}

pub fn spawn_boss(commands: &mut Commands, settings: &GameplaySettings, screen: ScreenSize) -> Entity {
    let size = settings.boss_size;
    let cx = (screen.w - 150) as f32;
    let cy = (screen.h / 2) as f32;
    commands
        .spawn((
            Boss::default(),
            Group::new("boss"),
            MapPosition::new(cx - size / 2.0, cy - size / 2.0),
            Sprite::new("boss", size, size),
            BoxCollider::new(size, size),
            ZIndex::BOSS,
        ))
        .id()
}

/// Spawn a shot centred at `(cx, cy)` travelling right.
pub fn spawn_shot(commands: &mut Commands, cx: f32, cy: f32, settings: &GameplaySettings) -> Entity {
    let size = settings.shot_size;
    commands
        .spawn((
            Shot,
            Group::new("shot"),
            MapPosition::new(cx - size / 2.0, cy - size / 2.0),
            FilledRect {
                width: size,
                height: size,
                color: Color::RED,
            },
            BoxCollider::new(size, size),
            RigidBody::new(settings.shot_speed, 0.0),
        ))
        .id()
}

fn spawn_text(commands: &mut Commands, text: DynamicText, y: f32) {
    commands.spawn((Group::new(UI_GROUP), ScreenPosition::new(0.0, y), text));
}

fn spawn_button(commands: &mut Commands, action: ButtonAction, label: &str, screen: ScreenSize, y: f32) {
    let x = screen.w as f32 / 2.0 - BUTTON_WIDTH / 2.0;
    commands.spawn((
        Group::new(UI_GROUP),
        ScreenPosition::new(x, y),
        Button::new(action, label, BUTTON_WIDTH, BUTTON_HEIGHT),
    ));
}

fn despawn_where(commands: &mut Commands, query: &Query<(Entity, &Group), Without<Persistent>>, keep: impl Fn(&str) -> bool) {
    for (entity, group) in query.iter() {
        if !keep(group.name()) {
            commands.entity(entity).despawn();
        }
    }
}

// ------------------------------------------------------------------
// State hooks
// ------------------------------------------------------------------

/// Entering Setup: everything is loaded by now, go to the start screen.
pub fn setup(mut next_state: ResMut<NextGameState>) {
    info!("Setup complete");
    next_state.set(GameStates::Menu);
}

/// Start screen: clear the world, show the title and the Start button.
pub fn enter_menu(
    mut commands: Commands,
    screen: Res<ScreenSize>,
    entities: Query<(Entity, &Group), Without<Persistent>>,
) {
    despawn_where(&mut commands, &entities, |_| false);
    let screen = *screen;
    let h = screen.h as f32;
    spawn_text(
        &mut commands,
        DynamicText::new("Underwater Object Game", 50, Color::WHITE).centered(),
        h / 2.0 - 150.0,
    );
    spawn_button(&mut commands, ButtonAction::Start, "Start", screen, h / 2.0 - 50.0);
}

/// New run: fresh world and counters.
#[allow(clippy::too_many_arguments)]
pub fn start_run(
    mut commands: Commands,
    config: Res<GameConfig>,
    screen: Res<ScreenSize>,
    mut run: ResMut<RunState>,
    mut powerup: ResMut<ActivePowerUp>,
    mut timers: ResMut<SpawnTimers>,
    mut motion: ResMut<PlayerMotion>,
    entities: Query<(Entity, &Group), Without<Persistent>>,
) {
    despawn_where(&mut commands, &entities, |name| name == UI_GROUP);
    run.reset();
    powerup.clear();
    let rng = timers.rng.clone();
    *timers = SpawnTimers::with_rng(&config.gameplay, rng);
    motion.reset();

    spawn_background(&mut commands, &config.gameplay, *screen);
    spawn_player(&mut commands, &config.gameplay, *screen);
    info!("Run started");
}

pub fn enter_pause(mut commands: Commands, screen: Res<ScreenSize>) {
    let screen = *screen;
    let h = screen.h as f32;
    spawn_text(
        &mut commands,
        DynamicText::new("Paused", 80, Color::WHITE).centered(),
        h / 2.0 - 150.0,
    );
    spawn_button(&mut commands, ButtonAction::Resume, "Resume", screen, h / 2.0);
}

/// Boss fight: pickups go away, the player is recentred, the boss appears.
pub fn enter_boss(
    mut commands: Commands,
    config: Res<GameConfig>,
    screen: Res<ScreenSize>,
    mut run: ResMut<RunState>,
    pickups: Query<Entity, With<Pickup>>,
    mut players: Query<&mut MapPosition, With<Player>>,
) {
    for entity in pickups.iter() {
        commands.entity(entity).despawn();
    }
    let (x, y) = player_home(&config.gameplay, *screen);
    for mut position in players.iter_mut() {
        position.pos = Vector2 { x, y };
    }
    run.fire_cooldown = 0.0;
    spawn_boss(&mut commands, &config.gameplay, *screen);
    info!("Boss fight started");
}

/// Boss defeated: remove it and its shots, back to collecting.
pub fn end_boss(
    mut commands: Commands,
    mut run: ResMut<RunState>,
    bosses: Query<Entity, Or<(With<Boss>, With<Shot>)>>,
) {
    for entity in bosses.iter() {
        commands.entity(entity).despawn();
    }
    run.boss_defeated = true;
    info!("Boss fight over, score {}", run.score);
}

pub fn enter_game_over(
    mut commands: Commands,
    screen: Res<ScreenSize>,
    run: Res<RunState>,
    mut powerup: ResMut<ActivePowerUp>,
) {
    powerup.clear();
    let screen = *screen;
    let h = screen.h as f32;
    spawn_text(
        &mut commands,
        DynamicText::new("Game Over", 80, Color::RED).centered(),
        h / 2.0 - 150.0,
    );
    spawn_text(
        &mut commands,
        DynamicText::new(format!("Score: {}", run.score), 50, Color::WHITE).centered(),
        h / 2.0 - 60.0,
    );
    spawn_button(&mut commands, ButtonAction::Restart, "Restart", screen, h / 2.0 + 20.0);
    info!("Game over with score {}", run.score);
}

pub fn despawn_ui(mut commands: Commands, entities: Query<(Entity, &Group), Without<Persistent>>) {
    despawn_where(&mut commands, &entities, |name| name != UI_GROUP);
    debug!("Overlay removed");
}

pub fn quit_game(mut signals: ResMut<WorldSignals>) {
    info!("Quitting");
    signals.set_flag(QUIT_GAME);
}

// ------------------------------------------------------------------
// Registration
// ------------------------------------------------------------------

fn register_hook<M>(
    world: &mut World,
    store: &mut SystemsStore,
    name: &'static str,
    system: impl IntoSystem<(), (), M> + 'static,
) {
    let id = world.register_system(system);
    // Registered systems are entities; keep them across world cleanups.
    world.entity_mut(id.entity()).insert(Persistent);
    store.insert(name, id);
}

/// Register every state hook and insert the [`SystemsStore`].
pub fn register_hooks(world: &mut World) {
    let mut store = SystemsStore::new();
    register_hook(world, &mut store, "setup", setup);
    register_hook(world, &mut store, "enter_menu", enter_menu);
    register_hook(world, &mut store, "start_run", start_run);
    register_hook(world, &mut store, "enter_pause", enter_pause);
    register_hook(world, &mut store, "enter_boss", enter_boss);
    register_hook(world, &mut store, "end_boss", end_boss);
    register_hook(world, &mut store, "enter_game_over", enter_game_over);
    register_hook(world, &mut store, "despawn_ui", despawn_ui);
    register_hook(world, &mut store, "quit_game", quit_game);
    debug!("Registered {} state hooks", store.len());
    world.insert_resource(store);
}

/// Spawn the global observers.
pub fn register_observers(world: &mut World) {
    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));
    world.spawn((Observer::new(collision_observer), Persistent));
    world.spawn((Observer::new(button_clicked_observer), Persistent));
    world.spawn((Observer::new(switch_debug_observer), Persistent));
    world.flush();
}

/// Insert the gameplay resources that do not depend on raylib.
pub fn insert_resources(world: &mut World, config: GameConfig, steering: Steering) {
    world.insert_resource(WorldTime::default());
    world.insert_resource(WorldSignals::default());
    world.insert_resource(ScreenSize {
        w: config.window_width as i32,
        h: config.window_height as i32,
    });
    world.insert_resource(InputState::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(RunState::default());
    world.insert_resource(ActivePowerUp::default());
    world.insert_resource(SpawnTimers::new(&config.gameplay));
    world.insert_resource(PlayerMotion::new(steering));
    world.insert_resource(config);
}
