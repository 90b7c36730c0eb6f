//! Game state integration tests: transition hooks, overlay screens and
//! button activation on a headless world.

use bevy_ecs::prelude::*;
use bevy_ecs::system::ScheduleSystem;
use raylib::prelude::Vector2;

use coilrush::components::boss::{Boss, Shot};
use coilrush::components::boxcollider::BoxCollider;
use coilrush::components::button::{Button, ButtonAction};
use coilrush::components::dynamictext::DynamicText;
use coilrush::components::group::Group;
use coilrush::components::mapposition::MapPosition;
use coilrush::components::pickup::{Pickup, PowerUpKind};
use coilrush::components::player::Player;
use coilrush::components::screenposition::ScreenPosition;
use coilrush::components::scrolling::ScrollingBackground;
use coilrush::events::gamestate::GameStateChangedEvent;
use coilrush::game;
use coilrush::resources::gameconfig::GameConfig;
use coilrush::resources::gamestate::{GameState, GameStates, NextGameState};
use coilrush::resources::input::InputState;
use coilrush::resources::motion::Steering;
use coilrush::resources::powerup::ActivePowerUp;
use coilrush::resources::runstate::RunState;
use coilrush::resources::worldsignals::WorldSignals;
use coilrush::systems::button::button_system;
use coilrush::systems::gamestate::check_pending_state;
use coilrush::systems::pause::pause_system;

fn make_world() -> World {
    let mut world = World::new();
    game::insert_resources(&mut world, GameConfig::new(), Steering::Keyboard);
    game::register_observers(&mut world);
    game::register_hooks(&mut world);
    world.flush();
    world
}

/// Request `state` and apply it the way the frame loop does.
fn go_to(world: &mut World, state: GameStates) {
    world.resource_mut::<NextGameState>().set(state);
    world.trigger(GameStateChangedEvent {});
    world.flush();
}

fn current(world: &World) -> GameStates {
    *world.resource::<GameState>().get()
}

fn count<C: Component>(world: &mut World) -> usize {
    world.query::<&C>().iter(world).count()
}

fn texts(world: &mut World) -> Vec<String> {
    world
        .query::<&DynamicText>()
        .iter(world)
        .map(|t| t.content.clone())
        .collect()
}

fn buttons(world: &mut World) -> Vec<ButtonAction> {
    world
        .query::<&Button>()
        .iter(world)
        .map(|b| b.action)
        .collect()
}

/// Run `system` for one frame, then apply whatever state it requested.
fn run_once<M>(world: &mut World, system: impl IntoScheduleConfigs<ScheduleSystem, M>) {
    let mut schedule = Schedule::default();
    schedule.add_systems(system);
    schedule.run(world);
    apply_pending(world);
}

fn apply_pending(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(check_pending_state);
    schedule.run(world);
}

/// Setup, then Menu, then a running game.
fn start_game(world: &mut World) {
    go_to(world, GameStates::Setup);
    // The setup hook requests the menu.
    apply_pending(world);
    go_to(world, GameStates::Playing);
}

#[test]
fn setup_leads_to_the_menu() {
    let mut world = make_world();
    go_to(&mut world, GameStates::Setup);
    assert_eq!(current(&world), GameStates::Setup);

    apply_pending(&mut world);

    assert_eq!(current(&world), GameStates::Menu);
    assert_eq!(texts(&mut world), vec!["Underwater Object Game".to_string()]);
    assert_eq!(buttons(&mut world), vec![ButtonAction::Start]);
}

#[test]
fn starting_a_run_spawns_player_and_background() {
    let mut world = make_world();
    start_game(&mut world);

    assert_eq!(current(&world), GameStates::Playing);
    assert_eq!(count::<Player>(&mut world), 1);
    assert_eq!(count::<ScrollingBackground>(&mut world), 1);
    assert_eq!(count::<Button>(&mut world), 0);
    assert!(texts(&mut world).is_empty());

    let mut players = world.query_filtered::<(&MapPosition, &BoxCollider), With<Player>>();
    let (position, collider) = players.single(&world).unwrap();
    let centre = collider.center(position.pos);
    assert_eq!((centre.x, centre.y), (200.0, 300.0));
}

#[test]
fn pause_and_resume_keep_the_run() {
    let mut world = make_world();
    start_game(&mut world);
    world.resource_mut::<RunState>().score = 3;
    world.spawn((
        Pickup::Coil,
        Group::new("pickup"),
        MapPosition::new(500.0, 300.0),
    ));

    world.resource_mut::<InputState>().action_back.update(true);
    run_once(&mut world, pause_system);
    assert_eq!(current(&world), GameStates::Paused);
    assert!(texts(&mut world).contains(&"Paused".to_string()));
    assert_eq!(buttons(&mut world), vec![ButtonAction::Resume]);

    world.resource_mut::<InputState>().action_back.update(false);
    world.resource_mut::<InputState>().action_confirm.update(true);
    run_once(&mut world, button_system);

    assert_eq!(current(&world), GameStates::Playing);
    assert_eq!(world.resource::<RunState>().score, 3);
    assert_eq!(count::<Pickup>(&mut world), 1);
    assert_eq!(count::<Player>(&mut world), 1);
    assert_eq!(count::<Button>(&mut world), 0);
}

#[test]
fn resume_returns_to_the_boss_fight() {
    let mut world = make_world();
    start_game(&mut world);
    go_to(&mut world, GameStates::BossFight);
    go_to(&mut world, GameStates::Paused);

    world.resource_mut::<InputState>().action_confirm.update(true);
    run_once(&mut world, button_system);

    assert_eq!(current(&world), GameStates::BossFight);
    assert_eq!(count::<Boss>(&mut world), 1);
}

#[test]
fn boss_fight_clears_pickups_and_recentres_player() {
    let mut world = make_world();
    start_game(&mut world);
    world.spawn((Pickup::Bomb, Group::new("pickup"), MapPosition::new(300.0, 300.0)));
    {
        let mut players = world.query_filtered::<&mut MapPosition, With<Player>>();
        let mut position = players.single_mut(&mut world).unwrap();
        position.pos = Vector2 { x: 136.0, y: 400.0 };
    }

    go_to(&mut world, GameStates::BossFight);

    assert_eq!(count::<Pickup>(&mut world), 0);
    assert_eq!(count::<Boss>(&mut world), 1);
    let mut players = world.query_filtered::<&MapPosition, With<Player>>();
    let position = players.single(&world).unwrap();
    assert_eq!((position.pos.x, position.pos.y), (136.0, 236.0));
}

#[test]
fn defeating_the_boss_resumes_collecting_once() {
    let mut world = make_world();
    start_game(&mut world);
    world.resource_mut::<RunState>().score = 5;
    go_to(&mut world, GameStates::BossFight);
    world.spawn((Shot, Group::new("shot"), MapPosition::new(400.0, 300.0)));

    go_to(&mut world, GameStates::Playing);

    assert_eq!(count::<Boss>(&mut world), 0);
    assert_eq!(count::<Shot>(&mut world), 0);
    assert_eq!(count::<Player>(&mut world), 1);
    let run = world.resource::<RunState>();
    assert!(run.boss_defeated);
    assert_eq!(run.score, 5);
}

#[test]
fn game_over_shows_score_and_restart_goes_to_menu() {
    let mut world = make_world();
    start_game(&mut world);
    world.resource_mut::<RunState>().score = 7;
    world
        .resource_mut::<ActivePowerUp>()
        .activate(PowerUpKind::X2, 10.0);

    go_to(&mut world, GameStates::GameOver);

    let shown = texts(&mut world);
    assert!(shown.contains(&"Game Over".to_string()));
    assert!(shown.contains(&"Score: 7".to_string()));
    assert_eq!(buttons(&mut world), vec![ButtonAction::Restart]);
    assert_eq!(world.resource::<ActivePowerUp>().kind(), None);

    // Click in the middle of the Restart button.
    let (pos, size) = {
        let mut query = world.query::<(&Button, &ScreenPosition)>();
        let (button, position) = query.single(&world).unwrap();
        (position.pos, button.size)
    };
    {
        let mut input = world.resource_mut::<InputState>();
        input.mouse_pos = Vector2 {
            x: pos.x + size.x / 2.0,
            y: pos.y + size.y / 2.0,
        };
        input.mouse_clicked = true;
    }
    run_once(&mut world, button_system);

    assert_eq!(current(&world), GameStates::Menu);
    assert_eq!(count::<Player>(&mut world), 0);
    assert_eq!(buttons(&mut world), vec![ButtonAction::Start]);
}

#[test]
fn new_run_after_game_over_starts_fresh() {
    let mut world = make_world();
    start_game(&mut world);
    world.resource_mut::<RunState>().score = 9;
    world.resource_mut::<RunState>().boss_defeated = true;
    go_to(&mut world, GameStates::GameOver);
    go_to(&mut world, GameStates::Menu);
    go_to(&mut world, GameStates::Playing);

    let run = world.resource::<RunState>();
    assert_eq!(run.score, 0);
    assert!(!run.boss_defeated);
    assert_eq!(count::<Player>(&mut world), 1);
}

#[test]
fn clicking_outside_buttons_does_nothing() {
    let mut world = make_world();
    go_to(&mut world, GameStates::Setup);
    apply_pending(&mut world);
    {
        let mut input = world.resource_mut::<InputState>();
        input.mouse_pos = Vector2 { x: 5.0, y: 5.0 };
        input.mouse_clicked = true;
    }

    run_once(&mut world, button_system);

    assert_eq!(current(&world), GameStates::Menu);
}

#[test]
fn quitting_raises_the_quit_flag() {
    let mut world = make_world();
    go_to(&mut world, GameStates::Quitting);
    assert!(world.resource::<WorldSignals>().quit_requested());
}

#[test]
fn hooks_and_observers_survive_world_cleanup() {
    let mut world = make_world();
    start_game(&mut world);
    go_to(&mut world, GameStates::GameOver);
    go_to(&mut world, GameStates::Menu);

    // The menu hook cleared every non-persistent entity; hooks still run.
    go_to(&mut world, GameStates::Playing);
    assert_eq!(count::<Player>(&mut world), 1);
}
