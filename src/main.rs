//! Coil Rush main entry point.
//!
//! An underwater collecting game steered by colored objects held in front of
//! a camera, written in Rust using:
//! - **raylib** for windowing, input and drawing
//! - **bevy_ecs** for entity-component-system architecture
//! - **ONNX Runtime + OpenCV** (feature `vision`) for object detection
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, start the camera and detector on the vision thread
//! 2. Open the window and load every texture
//! 3. Register observers and state hooks, enter Setup
//! 4. Run the schedule once per frame until the window closes or the game quits
//! 5. Stop the vision thread
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! cargo run --release -- --keyboard   # no camera
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use coilrush::assets::load_textures;
use coilrush::events::gamestate::GameStateChangedEvent;
use coilrush::game;
use coilrush::resources::gameconfig::{CameraSelect, GameConfig};
use coilrush::resources::gamestate::{GameStates, NextGameState};
use coilrush::resources::motion::Steering;
use coilrush::resources::worldsignals::WorldSignals;
use coilrush::systems::boss::{boss_fire_system, boss_trigger_system};
use coilrush::systems::button::button_system;
use coilrush::systems::collision::collision_detector;
use coilrush::systems::gamestate::{
    check_pending_state, state_has_buttons, state_in_run, state_is_boss_fight, state_is_playing,
};
use coilrush::systems::input::update_input_state;
use coilrush::systems::magnet::magnet_system;
use coilrush::systems::movement::{movement, offscreen_cleanup, scroll_background};
use coilrush::systems::pause::pause_system;
use coilrush::systems::playermotion::{apply_player_motion, keyboard_steering};
use coilrush::systems::powerup::powerup_timer_system;
use coilrush::systems::render::render_system;
use coilrush::systems::spawner::spawn_system;
use coilrush::systems::time::update_world_time;
use coilrush::systems::vision::poll_vision_messages;
use coilrush::vision::{self, VisionError};
use coilrush::vision::worker::VisionBridge;

/// Underwater Object Game
#[derive(Parser)]
#[command(version, about = "Collect coils, dodge bombs, steer with colored objects in front of a camera.")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Camera index, or `auto` to scan for one.
    #[arg(long, value_name = "INDEX|auto")]
    camera: Option<String>,

    /// ONNX detection model.
    #[arg(long, value_name = "PATH")]
    model: Option<String>,

    /// Steer with the arrow keys instead of the camera.
    #[arg(long)]
    keyboard: bool,
}

fn load_config(cli: &Cli) -> Result<GameConfig, String> {
    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{} ({}); using defaults", e, cli.config.display());
    }
    if let Some(camera) = &cli.camera {
        config.vision.camera = CameraSelect::parse(camera)?;
    }
    if let Some(model) = &cli.model {
        config.vision.model_path = model.clone();
    }
    if cli.keyboard {
        config.vision.enabled = false;
    }
    Ok(config)
}

fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(poll_vision_messages.after(update_input_state));
    update.add_systems(button_system.run_if(state_has_buttons).after(update_input_state));
    update.add_systems(keyboard_steering.run_if(state_is_playing).after(update_input_state));
    update.add_systems(
        apply_player_motion
            .run_if(state_is_playing)
            .after(poll_vision_messages)
            .after(keyboard_steering),
    );
    update.add_systems(scroll_background.run_if(state_in_run));
    update.add_systems(spawn_system.run_if(state_is_playing));
    update.add_systems(magnet_system.run_if(state_is_playing).before(movement));
    update.add_systems(boss_fire_system.run_if(state_is_boss_fight).after(update_input_state));
    update.add_systems(movement.run_if(state_in_run).after(spawn_system).after(boss_fire_system));
    update.add_systems(offscreen_cleanup.run_if(state_in_run).after(movement));
    update.add_systems(powerup_timer_system.run_if(state_is_playing));
    update.add_systems(
        collision_detector
            .run_if(state_in_run)
            .after(movement)
            .after(apply_player_motion),
    );
    update.add_systems(boss_trigger_system.run_if(state_is_playing).after(collision_detector));
    // Pause runs after everything that can end the run this frame.
    update.add_systems(
        pause_system
            .run_if(state_in_run)
            .after(update_input_state)
            .after(poll_vision_messages)
            .after(collision_detector)
            .after(boss_trigger_system),
    );
    update.add_systems(
        check_pending_state
            .after(collision_detector)
            .after(boss_trigger_system)
            .after(button_system)
            .after(pause_system)
            .after(poll_vision_messages),
    );
    update.add_systems(render_system.after(check_pending_state).after(offscreen_cleanup));
    update
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    // --------------- Camera & detector ---------------
    let bridge = if config.vision.enabled {
        match vision::start(&config.vision, false) {
            Ok(bridge) => Some(bridge),
            Err(VisionError::Unsupported) => {
                warn!("Vision support not compiled in, steering with the arrow keys");
                None
            }
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        }
    } else {
        info!("Vision disabled, steering with the arrow keys");
        None
    };
    let steering = if bridge.is_some() {
        Steering::Vision
    } else {
        Steering::Keyboard
    };

    // --------------- Raylib window & assets ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title(&config.title)
        .build();
    rl.set_target_fps(config.target_fps);
    // ESC pauses instead of closing the window
    rl.set_exit_key(None);

    let textures = match load_textures(&mut rl, &thread, &config.assets) {
        Ok(textures) => textures,
        Err(e) => {
            error!("{}", e);
            if let Some(bridge) = bridge {
                bridge.shutdown();
            }
            std::process::exit(1);
        }
    };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    game::insert_resources(&mut world, config, steering);
    world.insert_resource(textures);
    if let Some(bridge) = bridge {
        world.insert_resource(bridge);
    }
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    game::register_observers(&mut world);
    game::register_hooks(&mut world);
    world.flush();

    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {}); // Enter Setup right away

    let mut update = build_schedule();
    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {:?}", e);
        std::process::exit(1);
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && !world.resource::<WorldSignals>().quit_requested()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }

    if let Some(bridge) = world.remove_resource::<VisionBridge>() {
        bridge.shutdown();
    }
    info!("Bye!");
}
