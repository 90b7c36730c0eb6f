//! Gameplay integration tests: movement, pickups, power-ups, spawning, the
//! boss fight and camera steering, run on a headless world.

use bevy_ecs::prelude::*;
use bevy_ecs::system::ScheduleSystem;
use crossbeam_channel::{bounded, unbounded};
use raylib::prelude::Vector2;

use coilrush::components::boss::{Boss, Shot};
use coilrush::components::boxcollider::BoxCollider;
use coilrush::components::mapposition::MapPosition;
use coilrush::components::pickup::{Pickup, PowerUpKind};
use coilrush::components::player::Player;
use coilrush::components::rigidbody::RigidBody;
use coilrush::components::sprite::Sprite;
use coilrush::game;
use coilrush::resources::gameconfig::{GameConfig, GameplaySettings};
use coilrush::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use coilrush::resources::input::InputState;
use coilrush::resources::motion::{PlayerMotion, Steering};
use coilrush::resources::powerup::ActivePowerUp;
use coilrush::resources::runstate::RunState;
use coilrush::resources::screensize::ScreenSize;
use coilrush::systems::boss::{boss_fire_system, boss_trigger_system};
use coilrush::systems::collision::collision_detector;
use coilrush::systems::magnet::magnet_system;
use coilrush::systems::movement::{movement, offscreen_cleanup};
use coilrush::systems::pause::pause_system;
use coilrush::systems::playermotion::{apply_player_motion, keyboard_steering};
use coilrush::systems::powerup::powerup_timer_system;
use coilrush::systems::spawner::spawn_system;
use coilrush::systems::time::update_world_time;
use coilrush::systems::vision::poll_vision_messages;
use coilrush::vision::detection::{BBox, Detection};
use coilrush::vision::worker::{DetectionFrame, VisionBridge, VisionMessage};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(steering: Steering) -> World {
    let mut world = World::new();
    game::insert_resources(&mut world, GameConfig::new(), steering);
    game::register_observers(&mut world);
    game::register_hooks(&mut world);
    world.flush();
    world.resource_mut::<GameState>().set(GameStates::Playing);
    world
}

fn run_system<M>(world: &mut World, system: impl IntoScheduleConfigs<ScheduleSystem, M>) {
    let mut schedule = Schedule::default();
    schedule.add_systems(system);
    schedule.run(world);
}

fn settings(world: &World) -> GameplaySettings {
    world.resource::<GameConfig>().gameplay.clone()
}

fn spawn_player_at(world: &mut World, x: f32, y: f32) -> Entity {
    world
        .spawn((
            Player,
            MapPosition::new(x, y),
            Sprite::new("player", 128.0, 128.0),
            BoxCollider::new(128.0, 128.0),
        ))
        .id()
}

fn spawn_pickup_at(world: &mut World, pickup: Pickup, x: f32, y: f32) -> Entity {
    world
        .spawn((
            pickup,
            MapPosition::new(x, y),
            BoxCollider::new(64.0, 64.0),
            RigidBody::new(-90.0, 0.0),
        ))
        .id()
}

fn pending_state(world: &World) -> Option<GameStates> {
    match world.resource::<NextGameState>().get() {
        NextGameStates::Pending(state) => Some(*state),
        NextGameStates::Unchanged => None,
    }
}

fn count<C: Component>(world: &mut World) -> usize {
    world.query::<&C>().iter(world).count()
}

// ------------------------------------------------------------------
// Movement
// ------------------------------------------------------------------

#[test]
fn pickups_scroll_left() {
    let mut world = make_world(Steering::Keyboard);
    let coil = spawn_pickup_at(&mut world, Pickup::Coil, 800.0, 300.0);

    update_world_time(&mut world, 0.5);
    run_system(&mut world, movement);

    let pos = world.get::<MapPosition>(coil).unwrap();
    assert!(approx_eq(pos.pos.x, 755.0));
    assert!(approx_eq(pos.pos.y, 300.0));
}

#[test]
fn frozen_bodies_do_not_move() {
    let mut world = make_world(Steering::Keyboard);
    let mut body = RigidBody::new(100.0, 0.0);
    body.frozen = true;
    let entity = world.spawn((MapPosition::new(10.0, 10.0), body)).id();

    update_world_time(&mut world, 1.0);
    run_system(&mut world, movement);

    assert!(approx_eq(world.get::<MapPosition>(entity).unwrap().pos.x, 10.0));
}

#[test]
fn offscreen_pickups_and_shots_are_removed() {
    let mut world = make_world(Steering::Keyboard);
    let gone = spawn_pickup_at(&mut world, Pickup::Bomb, -65.0, 300.0);
    let partly_visible = spawn_pickup_at(&mut world, Pickup::Coil, -63.0, 300.0);
    let far_shot = world
        .spawn((Shot, MapPosition::new(801.0, 300.0), BoxCollider::new(10.0, 10.0)))
        .id();
    let near_shot = world
        .spawn((Shot, MapPosition::new(790.0, 300.0), BoxCollider::new(10.0, 10.0)))
        .id();

    run_system(&mut world, offscreen_cleanup);

    assert!(world.get_entity(gone).is_err());
    assert!(world.get_entity(partly_visible).is_ok());
    assert!(world.get_entity(far_shot).is_err());
    assert!(world.get_entity(near_shot).is_ok());
}

// ------------------------------------------------------------------
// Collisions
// ------------------------------------------------------------------

#[test]
fn collecting_a_coil_scores_and_removes_it() {
    let mut world = make_world(Steering::Keyboard);
    spawn_player_at(&mut world, 100.0, 200.0);
    let coil = spawn_pickup_at(&mut world, Pickup::Coil, 150.0, 250.0);

    run_system(&mut world, collision_detector);

    assert_eq!(world.resource::<RunState>().score, 1);
    assert!(world.get_entity(coil).is_err());
    assert_eq!(pending_state(&world), None);
}

#[test]
fn x2_doubles_coil_points() {
    let mut world = make_world(Steering::Keyboard);
    world
        .resource_mut::<ActivePowerUp>()
        .activate(PowerUpKind::X2, 10.0);
    spawn_player_at(&mut world, 100.0, 200.0);
    spawn_pickup_at(&mut world, Pickup::Coil, 150.0, 250.0);
    spawn_pickup_at(&mut world, Pickup::Coil, 120.0, 210.0);

    run_system(&mut world, collision_detector);

    assert_eq!(world.resource::<RunState>().score, 4);
    assert_eq!(count::<Pickup>(&mut world), 0);
}

#[test]
fn bomb_ends_the_run() {
    let mut world = make_world(Steering::Keyboard);
    spawn_player_at(&mut world, 100.0, 200.0);
    spawn_pickup_at(&mut world, Pickup::Bomb, 150.0, 250.0);

    run_system(&mut world, collision_detector);

    assert_eq!(pending_state(&world), Some(GameStates::GameOver));
}

#[test]
fn pickups_far_from_the_player_are_ignored() {
    let mut world = make_world(Steering::Keyboard);
    spawn_player_at(&mut world, 100.0, 200.0);
    let coil = spawn_pickup_at(&mut world, Pickup::Coil, 600.0, 250.0);
    // Overlapping pickups do not interact with each other.
    spawn_pickup_at(&mut world, Pickup::Bomb, 610.0, 260.0);

    run_system(&mut world, collision_detector);

    assert_eq!(world.resource::<RunState>().score, 0);
    assert!(world.get_entity(coil).is_ok());
    assert_eq!(pending_state(&world), None);
}

#[test]
fn power_up_pickup_activates_it() {
    let mut world = make_world(Steering::Keyboard);
    spawn_player_at(&mut world, 100.0, 200.0);
    let pickup = spawn_pickup_at(
        &mut world,
        Pickup::PowerUp(PowerUpKind::Magnet),
        150.0,
        250.0,
    );

    run_system(&mut world, collision_detector);

    let powerup = world.resource::<ActivePowerUp>();
    assert!(powerup.is_active(PowerUpKind::Magnet));
    assert_eq!(powerup.seconds_left(), 10);
    assert!(world.get_entity(pickup).is_err());
}

#[test]
fn power_up_expires() {
    let mut world = make_world(Steering::Keyboard);
    world
        .resource_mut::<ActivePowerUp>()
        .activate(PowerUpKind::SpeedBoost, 1.0);

    update_world_time(&mut world, 0.6);
    run_system(&mut world, powerup_timer_system);
    assert!(world.resource::<ActivePowerUp>().is_active(PowerUpKind::SpeedBoost));

    run_system(&mut world, powerup_timer_system);
    assert_eq!(world.resource::<ActivePowerUp>().kind(), None);
}

// ------------------------------------------------------------------
// Magnet
// ------------------------------------------------------------------

#[test]
fn magnet_pulls_nearby_coils_only() {
    let mut world = make_world(Steering::Keyboard);
    world
        .resource_mut::<ActivePowerUp>()
        .activate(PowerUpKind::Magnet, 10.0);
    // Player centre is (164, 264).
    spawn_player_at(&mut world, 100.0, 200.0);
    // Coil centre 100px to the right of the player centre.
    let near = spawn_pickup_at(&mut world, Pickup::Coil, 232.0, 232.0);
    let far = spawn_pickup_at(&mut world, Pickup::Coil, 600.0, 232.0);
    let bomb = spawn_pickup_at(&mut world, Pickup::Bomb, 232.0, 232.0);

    update_world_time(&mut world, 0.25);
    run_system(&mut world, magnet_system);

    // 240 px/s for a quarter second.
    assert!(approx_eq(world.get::<MapPosition>(near).unwrap().pos.x, 172.0));
    assert!(approx_eq(world.get::<MapPosition>(near).unwrap().pos.y, 232.0));
    assert!(approx_eq(world.get::<MapPosition>(far).unwrap().pos.x, 600.0));
    assert!(approx_eq(world.get::<MapPosition>(bomb).unwrap().pos.x, 232.0));
}

#[test]
fn magnet_does_nothing_when_inactive() {
    let mut world = make_world(Steering::Keyboard);
    spawn_player_at(&mut world, 100.0, 200.0);
    let near = spawn_pickup_at(&mut world, Pickup::Coil, 232.0, 232.0);

    update_world_time(&mut world, 0.25);
    run_system(&mut world, magnet_system);

    assert!(approx_eq(world.get::<MapPosition>(near).unwrap().pos.x, 232.0));
}

// ------------------------------------------------------------------
// Spawning
// ------------------------------------------------------------------

#[test]
fn first_frame_spawns_one_of_each_kind() {
    let mut world = make_world(Steering::Keyboard);
    update_world_time(&mut world, 1.0 / 30.0);
    run_system(&mut world, spawn_system);

    let mut query = world.query::<(&Pickup, &MapPosition, &RigidBody)>();
    let pickups: Vec<_> = query.iter(&world).map(|(p, m, r)| (*p, *m, *r)).collect();
    assert_eq!(pickups.len(), 3);
    assert_eq!(pickups.iter().filter(|(p, _, _)| *p == Pickup::Coil).count(), 1);
    assert_eq!(pickups.iter().filter(|(p, _, _)| *p == Pickup::Bomb).count(), 1);
    for (_, position, body) in &pickups {
        assert!(position.pos.x >= 800.0);
        assert!((150.0..=536.0).contains(&position.pos.y));
        assert!(approx_eq(body.velocity.x, -90.0));
    }
}

#[test]
fn spawner_respects_caps() {
    let mut world = make_world(Steering::Keyboard);
    let max = settings(&world).coil_max;
    for i in 0..max {
        spawn_pickup_at(&mut world, Pickup::Coil, 400.0 + i as f32 * 70.0, 300.0);
    }

    // Long enough for every timer to expire many times over.
    for _ in 0..10 {
        update_world_time(&mut world, 30.0);
        run_system(&mut world, spawn_system);
    }

    let coils = world
        .query::<&Pickup>()
        .iter(&world)
        .filter(|p| **p == Pickup::Coil)
        .count();
    assert_eq!(coils, max);
    let bombs = world
        .query::<&Pickup>()
        .iter(&world)
        .filter(|p| **p == Pickup::Bomb)
        .count();
    assert_eq!(bombs, settings(&world).bomb_max);
}

// ------------------------------------------------------------------
// Boss
// ------------------------------------------------------------------

#[test]
fn boss_appears_at_score_threshold_once() {
    let mut world = make_world(Steering::Keyboard);
    world.resource_mut::<RunState>().score = 4;
    run_system(&mut world, boss_trigger_system);
    assert_eq!(pending_state(&world), None);

    world.resource_mut::<RunState>().score = 5;
    run_system(&mut world, boss_trigger_system);
    assert_eq!(pending_state(&world), Some(GameStates::BossFight));

    world.resource_mut::<NextGameState>().reset();
    world.resource_mut::<RunState>().boss_defeated = true;
    run_system(&mut world, boss_trigger_system);
    assert_eq!(pending_state(&world), None);
}

#[test]
fn bomb_and_boss_score_in_one_frame_ends_the_run() {
    let mut world = make_world(Steering::Keyboard);
    world.resource_mut::<RunState>().score = 4;
    spawn_player_at(&mut world, 100.0, 200.0);
    spawn_pickup_at(&mut world, Pickup::Coil, 120.0, 220.0);
    spawn_pickup_at(&mut world, Pickup::Bomb, 150.0, 250.0);

    run_system(&mut world, (collision_detector, boss_trigger_system).chain());

    assert_eq!(world.resource::<RunState>().score, 5);
    assert_eq!(pending_state(&world), Some(GameStates::GameOver));
}

#[test]
fn escape_does_not_cancel_a_game_over() {
    let mut world = make_world(Steering::Keyboard);
    spawn_player_at(&mut world, 100.0, 200.0);
    spawn_pickup_at(&mut world, Pickup::Bomb, 150.0, 250.0);
    world.resource_mut::<InputState>().action_back.update(true);

    run_system(
        &mut world,
        (collision_detector, boss_trigger_system, pause_system).chain(),
    );

    assert_eq!(pending_state(&world), Some(GameStates::GameOver));
}

#[test]
fn escape_pauses_a_run_in_progress() {
    let mut world = make_world(Steering::Keyboard);
    world.resource_mut::<InputState>().action_back.update(true);

    run_system(&mut world, pause_system);

    assert_eq!(pending_state(&world), Some(GameStates::Paused));
}

#[test]
fn holding_up_fires_at_the_configured_rate() {
    let mut world = make_world(Steering::Keyboard);
    world.resource_mut::<GameState>().set(GameStates::BossFight);
    spawn_player_at(&mut world, 100.0, 200.0);
    world.resource_mut::<InputState>().direction_up.active = true;

    let dt = settings(&world).fire_interval;
    for _ in 0..3 {
        update_world_time(&mut world, dt);
        run_system(&mut world, boss_fire_system);
    }
    assert_eq!(count::<Shot>(&mut world), 3);

    // Shots leave from just right of the player's centre.
    let mut query = world.query_filtered::<&MapPosition, With<Shot>>();
    for position in query.iter(&world) {
        assert!(approx_eq(position.pos.x, 164.0 + 50.0 - 5.0));
        assert!(approx_eq(position.pos.y, 264.0 - 5.0));
    }

    world.resource_mut::<InputState>().direction_up.active = false;
    update_world_time(&mut world, dt);
    run_system(&mut world, boss_fire_system);
    assert_eq!(count::<Shot>(&mut world), 3);
}

#[test]
fn shots_wear_the_boss_down() {
    let mut world = make_world(Steering::Keyboard);
    world.resource_mut::<GameState>().set(GameStates::BossFight);
    let boss = world
        .spawn((Boss::default(), MapPosition::new(550.0, 200.0), BoxCollider::new(200.0, 200.0)))
        .id();
    let hits_needed = settings(&world).boss_hits;

    for _ in 0..hits_needed - 1 {
        world.spawn((Shot, MapPosition::new(560.0, 250.0), BoxCollider::new(10.0, 10.0)));
    }
    run_system(&mut world, collision_detector);
    assert_eq!(world.get::<Boss>(boss).unwrap().hits, hits_needed - 1);
    assert_eq!(count::<Shot>(&mut world), 0);
    assert_eq!(pending_state(&world), None);

    world.spawn((Shot, MapPosition::new(560.0, 250.0), BoxCollider::new(10.0, 10.0)));
    run_system(&mut world, collision_detector);
    assert_eq!(world.get::<Boss>(boss).unwrap().hits, hits_needed);
    assert_eq!(pending_state(&world), Some(GameStates::Playing));
}

// ------------------------------------------------------------------
// Steering
// ------------------------------------------------------------------

#[test]
fn player_stays_in_playable_band() {
    let mut world = make_world(Steering::Keyboard);
    let player = spawn_player_at(&mut world, 100.0, 200.0);

    world.resource_mut::<PlayerMotion>().pending_dy = -500.0;
    run_system(&mut world, apply_player_motion);
    assert!(approx_eq(world.get::<MapPosition>(player).unwrap().pos.y, 150.0));

    world.resource_mut::<PlayerMotion>().pending_dy = 1000.0;
    run_system(&mut world, apply_player_motion);
    assert!(approx_eq(world.get::<MapPosition>(player).unwrap().pos.y, 472.0));
    assert_eq!(world.resource::<PlayerMotion>().pending_dy, 0.0);
}

#[test]
fn arrow_keys_steer_in_keyboard_mode() {
    let mut world = make_world(Steering::Keyboard);
    let player = spawn_player_at(&mut world, 100.0, 300.0);
    world.resource_mut::<InputState>().direction_down.active = true;

    update_world_time(&mut world, 0.5);
    run_system(&mut world, (keyboard_steering, apply_player_motion).chain());

    // 180 px/s for half a second.
    assert!(approx_eq(world.get::<MapPosition>(player).unwrap().pos.y, 390.0));
}

#[test]
fn arrow_keys_are_ignored_in_vision_mode() {
    let mut world = make_world(Steering::Vision);
    world.resource_mut::<InputState>().direction_down.active = true;

    update_world_time(&mut world, 0.5);
    run_system(&mut world, keyboard_steering);

    assert_eq!(world.resource::<PlayerMotion>().pending_dy, 0.0);
}

fn green_at(cy: f32) -> Detection {
    Detection {
        class_id: 1,
        label: "green".into(),
        confidence: 0.9,
        bbox: BBox::from_center(320.0, cy, 40.0, 40.0),
    }
}

fn frame(seq: u64, detections: Vec<Detection>) -> VisionMessage {
    VisionMessage::Frame(DetectionFrame {
        seq,
        width: 800,
        height: 600,
        detections,
        image: None,
    })
}

/// A bridge with no thread behind it, preloaded with `messages`.
fn scripted_bridge(messages: Vec<VisionMessage>) -> VisionBridge {
    let (tx_cmd, _rx_cmd) = unbounded();
    let (tx_msg, rx_msg) = bounded(messages.len().max(1));
    for message in messages {
        tx_msg.send(message).unwrap();
    }
    VisionBridge {
        tx_cmd,
        rx_msg,
        handle: None,
    }
}

#[test]
fn object_moving_up_pushes_the_player_down() {
    let mut world = make_world(Steering::Vision);
    world.insert_resource(scripted_bridge(vec![
        frame(1, vec![green_at(300.0)]),
        frame(2, vec![green_at(280.0)]),
    ]));

    run_system(&mut world, poll_vision_messages);

    let motion = world.resource::<PlayerMotion>();
    assert!(approx_eq(motion.pending_dy, 3.0));
    assert_eq!(motion.label, "green");
    assert_eq!(motion.last_seq, 2);
}

#[test]
fn speed_boost_doubles_camera_steps() {
    let mut world = make_world(Steering::Vision);
    world
        .resource_mut::<ActivePowerUp>()
        .activate(PowerUpKind::SpeedBoost, 10.0);
    world.insert_resource(scripted_bridge(vec![
        frame(1, vec![green_at(300.0)]),
        frame(2, vec![green_at(280.0)]),
    ]));

    run_system(&mut world, poll_vision_messages);

    assert!(approx_eq(world.resource::<PlayerMotion>().pending_dy, 6.0));
}

#[test]
fn camera_frames_outside_a_run_do_not_move_the_player() {
    let mut world = make_world(Steering::Vision);
    world.resource_mut::<GameState>().set(GameStates::Paused);
    world.insert_resource(scripted_bridge(vec![
        frame(1, vec![green_at(300.0)]),
        frame(2, vec![green_at(280.0)]),
    ]));

    run_system(&mut world, poll_vision_messages);

    let motion = world.resource::<PlayerMotion>();
    assert_eq!(motion.pending_dy, 0.0);
    // The tracker still saw the frames.
    assert_eq!(motion.tracker.previous("green"), Some((320, 280)));
}

#[test]
fn camera_loss_ends_the_run_and_falls_back_to_keyboard() {
    let mut world = make_world(Steering::Vision);
    world.insert_resource(scripted_bridge(vec![
        frame(1, vec![green_at(300.0)]),
        VisionMessage::Closed,
    ]));

    run_system(&mut world, poll_vision_messages);

    assert!(world.get_resource::<VisionBridge>().is_none());
    assert_eq!(world.resource::<PlayerMotion>().steering, Steering::Keyboard);
    assert_eq!(pending_state(&world), Some(GameStates::GameOver));
}

#[test]
fn player_spawns_at_home_position() {
    let world = make_world(Steering::Keyboard);
    let screen = *world.resource::<ScreenSize>();
    let (x, y) = game::player_home(&settings(&world), screen);
    assert!(approx_eq(x + 64.0, 200.0));
    assert!(approx_eq(y + 64.0, 300.0));
    let centre = BoxCollider::new(128.0, 128.0).center(Vector2 { x, y });
    assert!(approx_eq(centre.x, 200.0));
}
