//! Flow meter.
//!
//! Shows the camera with detected objects, a grid over the frame, the
//! patient class and volume rate derived from the detections, and a live
//! "Peak Flow Over Time" plot. Press Q or close the window to quit.
//!
//! ```sh
//! cargo run --release --bin flowmeter -- --summary session.json
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info, warn};
use raylib::prelude::*;

use coilrush::resources::gameconfig::{CameraSelect, GameConfig};
use coilrush::vision;
use coilrush::vision::detection::Detection;
use coilrush::vision::flow::{FlowAnalyzer, FlowReading, FlowSummary};
use coilrush::vision::worker::VisionMessage;

const PANEL_WIDTH: i32 = 420;
const PLOT_MARGIN: f32 = 40.0;

/// Grid-based flow analytics over camera detections
#[derive(Parser)]
#[command(version, about = "Estimate flow and patient class from objects moving in front of a camera.")]
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

    /// Write a JSON session summary here on exit.
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,
}

/// Map `values` into the rectangle as a polyline, x over index and y over
/// value, with at most one point per horizontal pixel.
fn plot_points(values: &[f32], area: Rectangle) -> Vec<Vector2> {
    if values.is_empty() || area.width <= 0.0 {
        return Vec::new();
    }
    let max = values.iter().copied().fold(1.0_f32, f32::max);
    let stride = (values.len() as f32 / area.width).ceil().max(1.0) as usize;
    let last = (values.len() - 1).max(1) as f32;
    values
        .iter()
        .enumerate()
        .step_by(stride)
        .map(|(i, v)| Vector2 {
            x: area.x + area.width * i as f32 / last,
            y: area.y + area.height - area.height * (v / max),
        })
        .collect()
}

fn to_rgba(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .flat_map(|p| [p[0], p[1], p[2], 255])
        .collect()
}

fn write_summary(path: &Path, analyzer: &FlowAnalyzer) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &FlowSummary::from(analyzer))
        .map_err(|e| format!("{}: {}", path.display(), e))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{} ({}); using defaults", e, cli.config.display());
    }
    if let Some(camera) = &cli.camera {
        match CameraSelect::parse(camera) {
            Ok(camera) => config.vision.camera = camera,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        }
    }
    if let Some(model) = &cli.model {
        config.vision.model_path = model.clone();
    }
    let flow = config.flow.clone();
    config.vision.frame_width = flow.frame_width;
    config.vision.frame_height = flow.frame_height;

    let bridge = match vision::start(&config.vision, true) {
        Ok(bridge) => bridge,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let (fw, fh) = (flow.frame_width as i32, flow.frame_height as i32);
    let (mut rl, thread) = raylib::init()
        .size(fw + PANEL_WIDTH, fh)
        .title("Flow Meter")
        .build();
    rl.set_target_fps(config.target_fps);
    rl.set_exit_key(None);

    let blank = Image::gen_image_color(fw, fh, Color::BLACK);
    let mut frame_texture = match rl.load_texture_from_image(&thread, &blank) {
        Ok(texture) => texture,
        Err(e) => {
            error!("Failed to create frame texture: {}", e);
            bridge.shutdown();
            std::process::exit(1);
        }
    };

    let (cw, ch) = (flow.cell_width(), flow.cell_height());
    let mut analyzer = FlowAnalyzer::new(flow.clone());
    let mut detections: Vec<Detection> = Vec::new();
    let mut reading: Option<FlowReading> = None;
    let mut plot: Vec<f32> = Vec::new();
    let mut camera_open = true;

    while !rl.window_should_close() && !rl.is_key_pressed(KeyboardKey::KEY_Q) && camera_open {
        for msg in bridge.drain() {
            match msg {
                VisionMessage::Frame(frame) => {
                    if let Some(image) = &frame.image {
                        if let Err(e) = frame_texture.update_texture(&to_rgba(image.as_raw())) {
                            warn!("Frame upload failed: {}", e);
                        }
                    }
                    let centroids: Vec<(i32, i32)> =
                        frame.detections.iter().map(Detection::centroid).collect();
                    reading = Some(analyzer.observe(&centroids));
                    if analyzer.plot_due() {
                        plot = analyzer.peak_flow().to_vec();
                    }
                    detections = frame.detections;
                }
                VisionMessage::Closed => {
                    info!("Camera closed");
                    camera_open = false;
                }
                VisionMessage::Failed(reason) => {
                    error!("Vision stopped: {}", reason);
                    camera_open = false;
                }
            }
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::RAYWHITE);
        d.draw_texture(&frame_texture, 0, 0, Color::WHITE);

        for i in 1..flow.grid_size as i32 {
            d.draw_line(i * cw, 0, i * cw, fh, Color::GRAY);
            d.draw_line(0, i * ch, fw, i * ch, Color::GRAY);
        }

        for det in &detections {
            let b = det.bbox;
            d.draw_rectangle_lines(
                b.x1 as i32,
                b.y1 as i32,
                b.width() as i32,
                b.height() as i32,
                Color::GREEN,
            );
            d.draw_text(&det.label, b.x1 as i32, b.y1 as i32 - 22, 20, Color::LIME);
        }

        let class = reading
            .as_ref()
            .and_then(|r| r.patient_class)
            .map_or("N/A", |c| c.as_str());
        let cc = reading.as_ref().map_or(0, |r| r.cc_per_sec);
        d.draw_text(&format!("Patient Class: {}", class), 10, 10, 24, Color::GREEN);
        d.draw_text(&format!("CC/sec: {}", cc), 10, 40, 24, Color::GREEN);

        // Peak flow panel
        let px = fw as f32;
        let area = Rectangle {
            x: px + PLOT_MARGIN,
            y: PLOT_MARGIN * 1.5,
            width: PANEL_WIDTH as f32 - PLOT_MARGIN * 1.5,
            height: fh as f32 - PLOT_MARGIN * 3.0,
        };
        d.draw_text("Peak Flow Over Time", px as i32 + 20, 15, 20, Color::DARKGRAY);
        d.draw_rectangle_lines_ex(area, 1.0, Color::DARKGRAY);
        d.draw_text(
            "Frames",
            (area.x + area.width / 2.0) as i32 - 30,
            (area.y + area.height) as i32 + 10,
            16,
            Color::DARKGRAY,
        );
        d.draw_text("Peak Flow", px as i32 + 4, area.y as i32 - 20, 16, Color::DARKGRAY);
        let points = plot_points(&plot, area);
        for pair in points.windows(2) {
            d.draw_line_v(pair[0], pair[1], Color::BLUE);
        }
        if let Some(last) = plot.last() {
            d.draw_text(
                &format!("{:.2}", last),
                (area.x + area.width) as i32 - 50,
                area.y as i32 + 5,
                16,
                Color::BLUE,
            );
        }
    }

    bridge.shutdown();
    info!(
        "Processed {} frames, {} speed samples",
        analyzer.frames(),
        analyzer.speed_count()
    );
    if let Some(path) = &cli.summary {
        match write_summary(path, &analyzer) {
            Ok(()) => info!("Summary written to {}", path.display()),
            Err(e) => error!("Failed to write summary: {}", e),
        }
    }
}
