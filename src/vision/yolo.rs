//! YOLO object detector on ONNX Runtime.
//!
//! Expects an Ultralytics export: input `images` shaped `[1, 3, S, S]`
//! (RGB, 0..1) and output `output0` shaped `[1, 4 + classes, anchors]`.

use image::RgbImage;
use image::imageops::{self, FilterType};
use log::info;
use ndarray::Array4;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;

use crate::vision::VisionError;
use crate::vision::detection::{DecodeParams, Detection, Detector, decode_predictions};

/// Settings for [`YoloDetector`].
#[derive(Debug, Clone, PartialEq)]
pub struct YoloSettings {
    pub model_path: String,
    pub input_size: u32,
    pub confidence: f32,
    pub iou: f32,
    pub class_names: Vec<String>,
}

fn model_err<E: std::fmt::Display>(path: &str) -> impl Fn(E) -> VisionError + '_ {
    move |e| VisionError::Model {
        path: path.to_string(),
        reason: e.to_string(),
    }
}

fn infer_err<E: std::fmt::Display>(e: E) -> VisionError {
    VisionError::Inference(e.to_string())
}

pub struct YoloDetector {
    session: Session,
    settings: YoloSettings,
}

impl YoloDetector {
    pub fn load(settings: YoloSettings) -> Result<Self, VisionError> {
        if !std::path::Path::new(&settings.model_path).exists() {
            return Err(VisionError::Model {
                path: settings.model_path.clone(),
                reason: "file not found".into(),
            });
        }
        let path = settings.model_path.as_str();
        let session = Session::builder()
            .map_err(model_err(path))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(model_err(path))?
            .commit_from_file(path)
            .map_err(model_err(path))?;
        info!(
            "Loaded detection model '{}' (input {}x{}, {} class names)",
            settings.model_path,
            settings.input_size,
            settings.input_size,
            settings.class_names.len()
        );
        Ok(Self { session, settings })
    }

    fn preprocess(&self, frame: &RgbImage) -> Array4<f32> {
        let size = self.settings.input_size;
        let resized = imageops::resize(frame, size, size, FilterType::Triangle);
        let s = size as usize;
        let mut tensor = Array4::<f32>::zeros((1, 3, s, s));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for c in 0..3 {
                tensor[[0, c, y as usize, x as usize]] = pixel[c] as f32 / 255.0;
            }
        }
        tensor
    }
}

impl Detector for YoloDetector {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Detection>, VisionError> {
        let input = self.preprocess(frame);
        let input_tensor = Tensor::from_array(input).map_err(infer_err)?;
        let outputs = self
            .session
            .run(ort::inputs!["images" => input_tensor])
            .map_err(infer_err)?;
        let output: ndarray::ArrayViewD<f32> = outputs["output0"]
            .try_extract_array()
            .map_err(infer_err)?;

        let shape = output.shape();
        if shape.len() != 3 {
            return Err(VisionError::Inference(format!(
                "unexpected output shape {:?}",
                shape
            )));
        }
        let (num_attrs, num_anchors) = (shape[1], shape[2]);
        let data: Vec<f32> = output.iter().copied().collect();
        let params = DecodeParams {
            confidence: self.settings.confidence,
            iou: self.settings.iou,
            input_size: self.settings.input_size as f32,
            frame_width: frame.width() as f32,
            frame_height: frame.height() as f32,
        };
        Ok(decode_predictions(
            &data,
            num_attrs,
            num_anchors,
            &params,
            &self.settings.class_names,
        ))
    }
}
