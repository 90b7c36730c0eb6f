//! Camera, object detection, and the logic built on detections.
//!
//! Submodules overview:
//! - [`detection`] – boxes, detections, the [`Detector`]/[`FrameSource`] traits, decoding and NMS
//! - [`motion`] – maps centroid movement of tracked labels to player steps
//! - [`flow`] – grid-based speed heuristic and patient classification
//! - [`worker`] – background thread that reads frames and runs detection
//! - `camera` – OpenCV capture device (feature `vision`)
//! - `yolo` – ONNX Runtime YOLO detector (feature `vision`)
//!
//! [`Detector`]: detection::Detector
//! [`FrameSource`]: detection::FrameSource

use log::info;
use thiserror::Error;

use crate::resources::gameconfig::VisionSettings;
use crate::vision::worker::VisionBridge;

pub mod detection;
pub mod flow;
pub mod motion;
pub mod worker;

#[cfg(feature = "vision")]
pub mod camera;
#[cfg(feature = "vision")]
pub mod yolo;

/// Errors raised while opening or using the camera and detector.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("No camera found.")]
    NoCamera,
    #[error("camera {index} could not be opened")]
    CameraUnavailable { index: i32 },
    #[error("camera error: {0}")]
    Camera(String),
    #[error("failed to load detection model '{path}': {reason}")]
    Model { path: String, reason: String },
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("vision support was not compiled in (enable the `vision` feature)")]
    Unsupported,
}

/// Open the camera, load the detector and start the vision thread.
///
/// `keep_frames` attaches every analyzed frame to its detections.
#[cfg(feature = "vision")]
pub fn start(settings: &VisionSettings, keep_frames: bool) -> Result<VisionBridge, VisionError> {
    use crate::resources::gameconfig::CameraSelect;

    let (w, h) = (settings.frame_width, settings.frame_height);
    let camera = match settings.camera {
        CameraSelect::Auto => camera::Camera::auto_detect(settings.max_camera_scan, w, h)?,
        CameraSelect::Index(index) => camera::Camera::open(index, w, h)?,
    };
    let detector = yolo::YoloDetector::load(yolo::YoloSettings {
        model_path: settings.model_path.clone(),
        input_size: settings.input_size,
        confidence: settings.confidence,
        iou: settings.iou,
        class_names: settings.class_names.clone(),
    })?;
    info!("Vision ready on camera {}", camera.index());
    Ok(VisionBridge::spawn(
        Box::new(camera),
        Box::new(detector),
        keep_frames,
        settings.channel_capacity,
    ))
}

/// Without the `vision` feature there is no camera to open.
#[cfg(not(feature = "vision"))]
pub fn start(_settings: &VisionSettings, _keep_frames: bool) -> Result<VisionBridge, VisionError> {
    info!("Built without vision support");
    Err(VisionError::Unsupported)
}
