//! Game configuration resource.
//!
//! Settings are loaded from an INI file. Every key is optional; anything
//! missing keeps its default, so the game starts without a config file.
//! A malformed value is logged and skipped; the rest of the file still
//! applies.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! target_fps = 30
//! title = Underwater Object Game
//!
//! [gameplay]
//! coil_interval = 2, 6
//! coil_max = 5
//! boss_score = 5
//!
//! [motion]
//! dead_zone = 5
//! step = 3
//! idle_drift = 6
//! invert = true
//!
//! [vision]
//! enabled = true
//! camera = auto
//! model = best.onnx
//! target_labels = green:1, orange:2, blue:3
//!
//! [assets]
//! player = https://example.com/player.png
//!
//! [flow]
//! grid_size = 15
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::vision::flow::FlowSettings;
use crate::vision::motion::MotionSettings;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 30;
const DEFAULT_TITLE: &str = "Underwater Object Game";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Texture keys every run needs.
pub const ASSET_KEYS: [&str; 8] = [
    "player",
    "coil",
    "bomb",
    "background",
    "speed_boost",
    "magnet",
    "x2",
    "boss",
];

/// Spawning, scoring and boss tuning. Times are in seconds, speeds in
/// pixels per second.
#[derive(Debug, Clone, PartialEq)]
pub struct GameplaySettings {
    pub coil_interval: (f32, f32),
    pub coil_max: usize,
    pub bomb_interval: (f32, f32),
    pub bomb_max: usize,
    pub powerup_interval: (f32, f32),
    pub powerup_max: usize,
    /// Extra horizontal distance beyond the right edge for new coils and bombs.
    pub spawn_jitter: u32,
    pub powerup_jitter: u32,
    pub scroll_speed: f32,
    pub background_speed: f32,
    pub player_size: f32,
    pub pickup_size: f32,
    pub powerup_duration: f32,
    pub magnet_radius: f32,
    pub magnet_speed: f32,
    pub boss_score: u32,
    pub boss_size: f32,
    pub boss_hits: u32,
    pub shot_size: f32,
    pub shot_speed: f32,
    pub fire_interval: f32,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            coil_interval: (2.0, 6.0),
            coil_max: 5,
            bomb_interval: (4.0, 10.0),
            bomb_max: 3,
            powerup_interval: (10.0, 20.0),
            powerup_max: 2,
            spawn_jitter: 200,
            powerup_jitter: 400,
            scroll_speed: 90.0,
            background_speed: 30.0,
            player_size: 128.0,
            pickup_size: 64.0,
            powerup_duration: 10.0,
            magnet_radius: 200.0,
            magnet_speed: 240.0,
            boss_score: 5,
            boss_size: 200.0,
            boss_hits: 25,
            shot_size: 10.0,
            shot_speed: 300.0,
            fire_interval: 1.0 / 30.0,
        }
    }
}

/// Which camera to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSelect {
    /// Scan indices until one delivers a frame.
    Auto,
    Index(i32),
}

impl CameraSelect {
    pub fn parse(text: &str) -> Result<Self, String> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("auto") {
            return Ok(CameraSelect::Auto);
        }
        text.parse::<i32>()
            .map(CameraSelect::Index)
            .map_err(|_| format!("invalid camera '{}', expected 'auto' or an index", text))
    }
}

/// Camera and detector settings.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionSettings {
    pub enabled: bool,
    pub camera: CameraSelect,
    pub max_camera_scan: i32,
    pub model_path: String,
    pub input_size: u32,
    pub confidence: f32,
    pub iou: f32,
    /// Class names by model class id.
    pub class_names: Vec<String>,
    /// Size frames are resized to before detection.
    pub frame_width: u32,
    pub frame_height: u32,
    /// Undelivered detection frames kept by the worker channel.
    pub channel_capacity: usize,
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            camera: CameraSelect::Auto,
            max_camera_scan: 10,
            model_path: "best.onnx".into(),
            input_size: 640,
            confidence: 0.25,
            iou: 0.7,
            class_names: vec!["blue".into(), "green".into(), "orange".into()],
            frame_width: DEFAULT_WINDOW_WIDTH,
            frame_height: DEFAULT_WINDOW_HEIGHT,
            channel_capacity: 2,
        }
    }
}

/// Image source (URL or file path) per texture key.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSettings {
    pub sources: Vec<(String, String)>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            sources: ASSET_KEYS
                .iter()
                .map(|key| (key.to_string(), format!("assets/{}.png", key)))
                .collect(),
        }
    }
}

impl AssetSettings {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.sources
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: &str, source: impl Into<String>) {
        let source = source.into();
        match self.sources.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = source,
            None => self.sources.push((key.to_string(), source)),
        }
    }
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    pub title: String,
    pub gameplay: GameplaySettings,
    pub motion: MotionSettings,
    pub vision: VisionSettings,
    pub assets: AssetSettings,
    pub flow: FlowSettings,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Log a malformed value and fall back to `None` so the default stays.
fn or_warn<T>(section: &str, key: &str, value: Result<Option<T>, String>) -> Option<T> {
    value.unwrap_or_else(|e| {
        warn!("[{}] {}: {}; keeping default", section, key, e);
        None
    })
}

fn get_f32(config: &Ini, section: &str, key: &str) -> Option<f32> {
    or_warn(section, key, config.getfloat(section, key)).map(|v| v as f32)
}

fn get_u32(config: &Ini, section: &str, key: &str) -> Option<u32> {
    or_warn(section, key, config.getuint(section, key)).map(|v| v as u32)
}

fn get_bool(config: &Ini, section: &str, key: &str) -> Option<bool> {
    or_warn(section, key, config.getbool(section, key))
}

/// Parse `"min, max"` seconds. A single value means a fixed interval.
fn parse_range(text: &str) -> Result<(f32, f32), String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let parse = |s: &str| s.parse::<f32>().map_err(|_| format!("'{}' is not a number", s));
    let (min, max) = match parts.as_slice() {
        [one] => {
            let v = parse(one)?;
            (v, v)
        }
        [a, b] => (parse(a)?, parse(b)?),
        _ => return Err("expected 'min, max'".to_string()),
    };
    if min < 0.0 || max < min {
        return Err(format!("invalid range {}..{}", min, max));
    }
    Ok((min, max))
}

fn get_range(config: &Ini, section: &str, key: &str) -> Option<(f32, f32)> {
    let text = config.get(section, key)?;
    or_warn(section, key, parse_range(&text).map(Some))
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            title: DEFAULT_TITLE.into(),
            gameplay: GameplaySettings::default(),
            motion: MotionSettings::default(),
            vision: VisionSettings::default(),
            assets: AssetSettings::default(),
            flow: FlowSettings::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing or malformed values retain their current (default) values.
    /// Returns an error only if the file cannot be read.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = get_u32(config, "window", "width") {
            self.window_width = width;
        }
        if let Some(height) = get_u32(config, "window", "height") {
            self.window_height = height;
        }
        if let Some(fps) = get_u32(config, "window", "target_fps") {
            self.target_fps = fps;
        }
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }

        // [gameplay] section
        let g = &mut self.gameplay;
        if let Some(r) = get_range(config, "gameplay", "coil_interval") {
            g.coil_interval = r;
        }
        if let Some(r) = get_range(config, "gameplay", "bomb_interval") {
            g.bomb_interval = r;
        }
        if let Some(r) = get_range(config, "gameplay", "powerup_interval") {
            g.powerup_interval = r;
        }
        if let Some(v) = get_u32(config, "gameplay", "coil_max") {
            g.coil_max = v as usize;
        }
        if let Some(v) = get_u32(config, "gameplay", "bomb_max") {
            g.bomb_max = v as usize;
        }
        if let Some(v) = get_u32(config, "gameplay", "powerup_max") {
            g.powerup_max = v as usize;
        }
        if let Some(v) = get_u32(config, "gameplay", "spawn_jitter") {
            g.spawn_jitter = v;
        }
        if let Some(v) = get_u32(config, "gameplay", "powerup_jitter") {
            g.powerup_jitter = v;
        }
        for (key, slot) in [
            ("scroll_speed", &mut g.scroll_speed),
            ("background_speed", &mut g.background_speed),
            ("player_size", &mut g.player_size),
            ("pickup_size", &mut g.pickup_size),
            ("powerup_duration", &mut g.powerup_duration),
            ("magnet_radius", &mut g.magnet_radius),
            ("magnet_speed", &mut g.magnet_speed),
            ("boss_size", &mut g.boss_size),
            ("shot_size", &mut g.shot_size),
            ("shot_speed", &mut g.shot_speed),
            ("fire_interval", &mut g.fire_interval),
        ] {
            if let Some(v) = get_f32(config, "gameplay", key) {
                *slot = v;
            }
        }
        if let Some(v) = get_u32(config, "gameplay", "boss_score") {
            g.boss_score = v;
        }
        if let Some(v) = get_u32(config, "gameplay", "boss_hits") {
            g.boss_hits = v;
        }

        // [motion] section
        let m = &mut self.motion;
        for (key, slot) in [
            ("dead_zone", &mut m.dead_zone),
            ("step", &mut m.step),
            ("idle_drift", &mut m.idle_drift),
            ("keyboard_speed", &mut m.keyboard_speed),
        ] {
            if let Some(v) = get_f32(config, "motion", key) {
                *slot = v;
            }
        }
        if let Some(invert) = get_bool(config, "motion", "invert") {
            m.invert = invert;
        }

        // [vision] section
        let v = &mut self.vision;
        if let Some(enabled) = get_bool(config, "vision", "enabled") {
            v.enabled = enabled;
        }
        if let Some(camera) = config.get("vision", "camera") {
            match CameraSelect::parse(&camera) {
                Ok(camera) => v.camera = camera,
                Err(e) => warn!("[vision] camera: {}; keeping default", e),
            }
        }
        if let Some(limit) = get_u32(config, "vision", "max_camera_scan") {
            v.max_camera_scan = limit as i32;
        }
        if let Some(model) = config.get("vision", "model") {
            v.model_path = model;
        }
        if let Some(size) = get_u32(config, "vision", "input_size") {
            v.input_size = size;
        }
        if let Some(conf) = get_f32(config, "vision", "confidence") {
            v.confidence = conf;
        }
        if let Some(iou) = get_f32(config, "vision", "iou") {
            v.iou = iou;
        }
        if let Some(names) = config.get("vision", "class_names") {
            v.class_names = names
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(capacity) = get_u32(config, "vision", "channel_capacity") {
            v.channel_capacity = capacity.max(1) as usize;
        }
        if let Some(labels) = config.get("vision", "target_labels") {
            match MotionSettings::parse_labels(&labels) {
                Ok(labels) => self.motion.labels = labels,
                Err(e) => warn!("[vision] target_labels: {}; keeping default", e),
            }
        }
        // Detection frames follow the window size.
        self.vision.frame_width = self.window_width;
        self.vision.frame_height = self.window_height;

        // [assets] section
        for key in ASSET_KEYS {
            if let Some(source) = config.get("assets", key) {
                self.assets.set(key, source);
            }
        }

        // [flow] section
        let f = &mut self.flow;
        if let Some(v) = get_u32(config, "flow", "grid_size") {
            f.grid_size = v.max(1);
        }
        if let Some(v) = get_u32(config, "flow", "frame_width") {
            f.frame_width = v;
        }
        if let Some(v) = get_u32(config, "flow", "frame_height") {
            f.frame_height = v;
        }
        if let Some(v) = get_u32(config, "flow", "cc_per_detection") {
            f.cc_per_detection = v;
        }
        if let Some(v) = get_u32(config, "flow", "plot_interval") {
            f.plot_interval = v.max(1);
        }
        if let Some(v) = get_u32(config, "flow", "history_limit") {
            f.history_limit = v.max(1) as usize;
        }

        if self.motion.labels.is_empty() {
            warn!("No target labels configured; the player will only drift");
        }

        info!(
            "Loaded config: {}x{} window, fps={}, vision={}, model={}, camera={:?}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vision.enabled,
            self.vision.model_path,
            self.vision.camera
        );
    }
}
