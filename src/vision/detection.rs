//! Detection types and the pure parts of the detector pipeline.
//!
//! A [`Detector`] turns an RGB frame into a list of [`Detection`]s whose
//! bounding boxes are expressed in frame pixels. A [`FrameSource`] yields
//! frames until the device stops delivering them.
//!
//! [`decode_predictions`] and [`non_max_suppression`] are kept free of any
//! inference runtime so they can be tested without a model.

use image::RgbImage;
use serde::Serialize;

use crate::vision::VisionError;

/// Axis-aligned box in frame pixels, corner format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a box from centre/size format.
    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self {
            x1: cx - w * 0.5,
            y1: cy - h * 0.5,
            x2: cx + w * 0.5,
            y2: cy + h * 0.5,
        }
    }

    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Integer centre of the box, truncated toward zero.
    pub fn centroid(&self) -> (i32, i32) {
        (
            ((self.x1 + self.x2) / 2.0) as i32,
            ((self.y1 + self.y2) / 2.0) as i32,
        )
    }

    /// Intersection over union with another box. Zero when either is empty.
    pub fn iou(&self, other: &BBox) -> f32 {
        let ix1 = self.x1.max(other.x1);
        let iy1 = self.y1.max(other.y1);
        let ix2 = self.x2.min(other.x2);
        let iy2 = self.y2.min(other.y2);
        let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
        let union = self.area() + other.area() - inter;
        if union <= 0.0 { 0.0 } else { inter / union }
    }

    /// Scale both axes, used to map model-space boxes back to frame pixels.
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        Self {
            x1: self.x1 * sx,
            y1: self.y1 * sy,
            x2: self.x2 * sx,
            y2: self.y2 * sy,
        }
    }
}

/// One detected object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub class_id: usize,
    pub label: String,
    pub confidence: f32,
    pub bbox: BBox,
}

impl Detection {
    pub fn centroid(&self) -> (i32, i32) {
        self.bbox.centroid()
    }
}

/// Something that turns frames into detections.
pub trait Detector: Send {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>, VisionError>;
}

/// Something that produces camera frames. `Ok(None)` means the stream ended.
pub trait FrameSource: Send {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, VisionError>;
}

/// Thresholds used when decoding raw model output.
#[derive(Debug, Clone, Copy)]
pub struct DecodeParams {
    pub confidence: f32,
    pub iou: f32,
    /// Side length of the square model input.
    pub input_size: f32,
    pub frame_width: f32,
    pub frame_height: f32,
}

/// Decode a YOLOv8-style output tensor laid out as `[4 + nc, anchors]`.
///
/// Rows 0..4 hold centre x, centre y, width, height in model-input pixels;
/// the remaining rows hold per-class scores. `class_names` maps class ids
/// to labels; ids past its end are named `class<N>`.
pub fn decode_predictions(
    data: &[f32],
    num_attrs: usize,
    num_anchors: usize,
    params: &DecodeParams,
    class_names: &[String],
) -> Vec<Detection> {
    if num_attrs <= 4 || data.len() < num_attrs * num_anchors {
        return Vec::new();
    }
    let num_classes = num_attrs - 4;
    let at = |row: usize, col: usize| data[row * num_anchors + col];
    let sx = params.frame_width / params.input_size;
    let sy = params.frame_height / params.input_size;

    let mut candidates = Vec::new();
    for anchor in 0..num_anchors {
        let mut best_class = 0usize;
        let mut best_score = f32::MIN;
        for class in 0..num_classes {
            let score = at(4 + class, anchor);
            if score > best_score {
                best_score = score;
                best_class = class;
            }
        }
        if best_score < params.confidence {
            continue;
        }
        let bbox = BBox::from_center(
            at(0, anchor),
            at(1, anchor),
            at(2, anchor),
            at(3, anchor),
        )
        .scaled(sx, sy);
        let label = class_names
            .get(best_class)
            .cloned()
            .unwrap_or_else(|| format!("class{}", best_class));
        candidates.push(Detection {
            class_id: best_class,
            label,
            confidence: best_score,
            bbox,
        });
    }
    non_max_suppression(candidates, params.iou)
}

/// Class-aware greedy NMS. Output is sorted by confidence, highest first.
pub fn non_max_suppression(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    let mut kept: Vec<Detection> = Vec::with_capacity(detections.len());
    for det in detections {
        let suppressed = kept
            .iter()
            .any(|k| k.class_id == det.class_id && k.bbox.iou(&det.bbox) > iou_threshold);
        if !suppressed {
            kept.push(det);
        }
    }
    kept
}
