//! Maps frame-to-frame centroid movement of tracked objects to player steps.
//!
//! Each tracked label keeps the centroid it had in the previous detection
//! frame. When the vertical delta leaves the dead zone the player is pushed
//! by `step * multiplier(label)`. With `invert` set (the default) an object
//! moving up in the image pushes the player down, and vice versa.
//!
//! A frame with no tracked label at all makes the player drift up by
//! `idle_drift`.

use rustc_hash::FxHashMap;

use crate::vision::detection::Detection;

/// Vertical direction reported for the last applied step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Still,
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Still => "",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Tunables for the motion mapper.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSettings {
    /// Minimum centroid movement in pixels before the player reacts.
    pub dead_zone: f32,
    /// Base player step in pixels per detection frame.
    pub step: f32,
    /// Upward drift in pixels when no tracked object is visible.
    pub idle_drift: f32,
    /// Object up moves the player down when true.
    pub invert: bool,
    /// Tracked labels and their step multipliers.
    pub labels: Vec<(String, f32)>,
    /// Keyboard steering speed in pixels per second.
    pub keyboard_speed: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            dead_zone: 5.0,
            step: 3.0,
            idle_drift: 6.0,
            invert: true,
            labels: vec![
                ("green".to_string(), 1.0),
                ("orange".to_string(), 2.0),
                ("blue".to_string(), 3.0),
            ],
            keyboard_speed: 180.0,
        }
    }
}

impl MotionSettings {
    /// Multiplier for a tracked label, `None` if the label is not tracked.
    pub fn multiplier(&self, label: &str) -> Option<f32> {
        self.labels
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, m)| *m)
    }

    /// Parse `green:1, orange:2, blue` style lists. A missing multiplier is 1.
    pub fn parse_labels(text: &str) -> Result<Vec<(String, f32)>, String> {
        let mut labels = Vec::new();
        for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, mult) = match part.split_once(':') {
                Some((name, mult)) => {
                    let mult = mult
                        .trim()
                        .parse::<f32>()
                        .map_err(|e| format!("Invalid multiplier for '{}': {}", name.trim(), e))?;
                    (name.trim(), mult)
                }
                None => (part, 1.0),
            };
            labels.push((name.to_string(), mult));
        }
        Ok(labels)
    }
}

/// Result of feeding one detection frame into the tracker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MotionStep {
    /// Vertical player displacement in pixels (positive is down).
    pub dy: f32,
    /// Last tracked label that produced movement.
    pub label: Option<String>,
    pub direction: Direction,
    /// Whether any tracked label was present in the frame.
    pub object_detected: bool,
}

/// Remembers the previous centroid of each tracked label.
#[derive(Debug, Clone, Default)]
pub struct MotionTracker {
    previous: FxHashMap<String, (i32, i32)>,
}

impl MotionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all previous positions.
    pub fn reset(&mut self) {
        self.previous.clear();
    }

    pub fn previous(&self, label: &str) -> Option<(i32, i32)> {
        self.previous.get(label).copied()
    }

    /// Consume one detection frame and return the player step it produces.
    ///
    /// Every detection of a tracked label is compared with the position that
    /// label had in the previous frame, so two green objects moving together
    /// push twice as far. Detections are taken in the order given (highest
    /// confidence first from the detector); the last one of each label
    /// becomes its previous position for the next frame.
    pub fn update(&mut self, detections: &[Detection], settings: &MotionSettings) -> MotionStep {
        let mut current: FxHashMap<String, (i32, i32)> = FxHashMap::default();
        let mut step = MotionStep::default();

        for det in detections {
            let Some(mult) = settings.multiplier(&det.label) else {
                continue;
            };
            let centroid = det.centroid();
            current.insert(det.label.clone(), centroid);
            step.object_detected = true;

            let Some((_, prev_y)) = self.previous.get(det.label.as_str()).copied() else {
                continue;
            };
            let delta_y = (centroid.1 - prev_y) as f32;
            let object_up = delta_y < -settings.dead_zone;
            let object_down = delta_y > settings.dead_zone;
            step.label = Some(det.label.clone());
            if !object_up && !object_down {
                continue;
            }
            let amount = settings.step * mult;
            if object_up == settings.invert {
                step.dy += amount;
                step.direction = Direction::Down;
            } else {
                step.dy -= amount;
                step.direction = Direction::Up;
            }
        }

        if !step.object_detected {
            step.dy -= settings.idle_drift;
        }
        self.previous = current;
        step
    }
}

/// Clamp a player's top edge to the playable band of the screen.
pub fn clamp_player_y(y: f32, player_height: f32, screen_height: f32) -> f32 {
    let top = (screen_height / 4.0).floor();
    let bottom = screen_height - player_height;
    y.max(top).min(bottom.max(top))
}
