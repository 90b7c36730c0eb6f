//! OpenCV camera capture.
//!
//! Frames are resized to the requested size and converted from BGR to RGB
//! before they leave this module.

use image::RgbImage;
use log::{debug, info};
use opencv::core::{AlgorithmHint, Mat, Size};
use opencv::prelude::*;
use opencv::{imgproc, videoio};

use crate::vision::VisionError;
use crate::vision::detection::FrameSource;

fn camera_err(e: opencv::Error) -> VisionError {
    VisionError::Camera(e.to_string())
}

/// A camera opened by device index.
pub struct Camera {
    capture: videoio::VideoCapture,
    index: i32,
    width: u32,
    height: u32,
}

impl Camera {
    /// Open camera `index`, delivering frames of `width` x `height`.
    pub fn open(index: i32, width: u32, height: u32) -> Result<Self, VisionError> {
        let capture = videoio::VideoCapture::new(index, videoio::CAP_ANY).map_err(camera_err)?;
        if !capture.is_opened().map_err(camera_err)? {
            return Err(VisionError::CameraUnavailable { index });
        }
        info!("Opened camera {} ({}x{} frames)", index, width, height);
        Ok(Self {
            capture,
            index,
            width,
            height,
        })
    }

    /// Scan indices `0..max_index` and return the first camera that
    /// delivers a frame.
    pub fn auto_detect(max_index: i32, width: u32, height: u32) -> Result<Self, VisionError> {
        for index in 0..max_index {
            let Ok(mut camera) = Self::open(index, width, height) else {
                debug!("Camera {} not available", index);
                continue;
            };
            let mut frame = Mat::default();
            if camera.capture.read(&mut frame).unwrap_or(false) && !frame.empty() {
                return Ok(camera);
            }
            debug!("Camera {} opened but returned no frame", index);
        }
        Err(VisionError::NoCamera)
    }

    pub fn index(&self) -> i32 {
        self.index
    }
}

impl FrameSource for Camera {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, VisionError> {
        let mut bgr = Mat::default();
        if !self.capture.read(&mut bgr).map_err(camera_err)? || bgr.empty() {
            return Ok(None);
        }

        let mut resized = Mat::default();
        imgproc::resize(
            &bgr,
            &mut resized,
            Size::new(self.width as i32, self.height as i32),
            0.0,
            0.0,
            imgproc::INTER_LINEAR,
        )
        .map_err(camera_err)?;

        let mut rgb = Mat::default();
        imgproc::cvt_color(
            &resized,
            &mut rgb,
            imgproc::COLOR_BGR2RGB,
            0,
            AlgorithmHint::ALGO_HINT_DEFAULT,
        )
        .map_err(camera_err)?;

        let bytes = rgb.data_bytes().map_err(camera_err)?.to_vec();
        RgbImage::from_raw(self.width, self.height, bytes)
            .map(Some)
            .ok_or_else(|| VisionError::Camera("unexpected frame buffer size".into()))
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        let _ = self.capture.release();
        debug!("Released camera {}", self.index);
    }
}
