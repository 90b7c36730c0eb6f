//! Grid-based flow analytics over detected object centroids.
//!
//! The frame is split into `grid_size x grid_size` cells. Every centroid in
//! the current frame is paired with every centroid of the previous frame;
//! each differing pair contributes a speed equal to the Euclidean grid-cell
//! displacement. The running mean of all speeds is the peak flow.

use serde::Serialize;

/// Patient class derived from a single speed sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PatientClass {
    Low,
    Medium,
    High,
}

impl PatientClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientClass::Low => "Low",
            PatientClass::Medium => "Medium",
            PatientClass::High => "High",
        }
    }
}

/// Settings for the flow analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSettings {
    pub grid_size: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Volume credited per detected object, in cc per second.
    pub cc_per_detection: u32,
    /// Frames between plot refreshes.
    pub plot_interval: u32,
    /// Half-open speed ranges per class, checked in order.
    pub thresholds: Vec<(PatientClass, f32, f32)>,
    /// Upper bound on the stored peak flow history.
    pub history_limit: usize,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            grid_size: 15,
            frame_width: 640,
            frame_height: 480,
            cc_per_detection: 600,
            plot_interval: 10,
            thresholds: vec![
                (PatientClass::Low, 0.0, 1.0),
                (PatientClass::Medium, 1.0, 2.0),
                (PatientClass::High, 2.0, 3.0),
            ],
            history_limit: 10_000,
        }
    }
}

impl FlowSettings {
    /// Cell width in pixels (integer division, at least 1).
    pub fn cell_width(&self) -> i32 {
        (self.frame_width / self.grid_size.max(1)).max(1) as i32
    }

    /// Cell height in pixels (integer division, at least 1).
    pub fn cell_height(&self) -> i32 {
        (self.frame_height / self.grid_size.max(1)).max(1) as i32
    }

    pub fn classify(&self, speed: f32) -> Option<PatientClass> {
        self.thresholds
            .iter()
            .find(|(_, lower, upper)| *lower <= speed && speed < *upper)
            .map(|(class, _, _)| *class)
    }
}

/// What one frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowReading {
    pub ball_count: usize,
    pub cc_per_sec: u32,
    /// Class shown on screen; sticky across frames that classify nothing.
    pub patient_class: Option<PatientClass>,
    /// Speeds computed this frame.
    pub speeds: Vec<f32>,
}

/// Accumulates speed samples and peak flow across frames.
#[derive(Debug, Clone)]
pub struct FlowAnalyzer {
    settings: FlowSettings,
    previous: Vec<(i32, i32)>,
    speed_count: u64,
    speed_sum: f64,
    peak_flow: Vec<f32>,
    last_class: Option<PatientClass>,
    frames: u64,
}

impl FlowAnalyzer {
    pub fn new(settings: FlowSettings) -> Self {
        Self {
            settings,
            previous: Vec::new(),
            speed_count: 0,
            speed_sum: 0.0,
            peak_flow: Vec::new(),
            last_class: None,
            frames: 0,
        }
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// Feed the centroids of one frame.
    pub fn observe(&mut self, centroids: &[(i32, i32)]) -> FlowReading {
        self.frames += 1;
        let cw = self.settings.cell_width();
        let ch = self.settings.cell_height();
        let mut classified = None;
        let mut speeds = Vec::new();
        let previous = std::mem::replace(&mut self.previous, centroids.to_vec());

        for &(cx, cy) in centroids {
            for &(px, py) in &previous {
                if (cx, cy) == (px, py) {
                    continue;
                }
                let dx = (cx.div_euclid(cw) - px.div_euclid(cw)) as f32;
                let dy = (cy.div_euclid(ch) - py.div_euclid(ch)) as f32;
                let speed = (dx * dx + dy * dy).sqrt();
                speeds.push(speed);
                self.speed_count += 1;
                self.speed_sum += speed as f64;
                self.push_peak_flow((self.speed_sum / self.speed_count as f64) as f32);
                if let Some(class) = self.settings.classify(speed) {
                    classified = Some(class);
                }
            }
        }

        if classified.is_some() {
            self.last_class = classified;
        }

        FlowReading {
            ball_count: centroids.len(),
            cc_per_sec: centroids.len() as u32 * self.settings.cc_per_detection,
            patient_class: self.last_class,
            speeds,
        }
    }

    fn push_peak_flow(&mut self, value: f32) {
        self.peak_flow.push(value);
        let limit = self.settings.history_limit.max(1);
        if self.peak_flow.len() > limit {
            let excess = self.peak_flow.len() - limit;
            self.peak_flow.drain(..excess);
        }
    }

    /// Whether the plot should be refreshed after the current frame.
    pub fn plot_due(&self) -> bool {
        let interval = self.settings.plot_interval.max(1) as u64;
        self.frames > 0 && self.frames % interval == 0
    }

    pub fn peak_flow(&self) -> &[f32] {
        &self.peak_flow
    }

    pub fn mean_speed(&self) -> Option<f32> {
        (self.speed_count > 0).then(|| (self.speed_sum / self.speed_count as f64) as f32)
    }

    pub fn speed_count(&self) -> u64 {
        self.speed_count
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_class(&self) -> Option<PatientClass> {
        self.last_class
    }
}

/// Serializable end-of-session summary.
#[derive(Debug, Clone, Serialize)]
pub struct FlowSummary {
    pub frames: u64,
    pub speed_samples: u64,
    pub mean_speed: Option<f32>,
    pub patient_class: Option<PatientClass>,
    pub peak_flow: Vec<f32>,
}

impl From<&FlowAnalyzer> for FlowSummary {
    fn from(analyzer: &FlowAnalyzer) -> Self {
        Self {
            frames: analyzer.frames(),
            speed_samples: analyzer.speed_count(),
            mean_speed: analyzer.mean_speed(),
            patient_class: analyzer.last_class(),
            peak_flow: analyzer.peak_flow().to_vec(),
        }
    }
}
