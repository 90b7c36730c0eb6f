//! Background detection thread.
//!
//! [`vision_thread`] owns the frame source and the detector. It reads a
//! frame, runs detection, and sends a [`VisionMessage::Frame`] to the main
//! thread over a bounded channel, so a slow consumer throttles capture
//! instead of queueing frames without limit.
//!
//! The loop ends when:
//! - the source reports the end of the stream ([`VisionMessage::Closed`]),
//! - the source or detector fails ([`VisionMessage::Failed`]),
//! - [`VisionCmd::Shutdown`] is received, or
//! - the receiving side is dropped.

use std::thread::JoinHandle;

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded, unbounded};
use image::RgbImage;
use log::{debug, info, warn};

use crate::vision::detection::{Detection, Detector, FrameSource};

/// Commands accepted by the vision thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisionCmd {
    Shutdown,
}

/// Detections for one camera frame.
#[derive(Debug, Clone)]
pub struct DetectionFrame {
    /// Monotonic frame counter, starting at 1.
    pub seq: u64,
    pub width: u32,
    pub height: u32,
    pub detections: Vec<Detection>,
    /// The analyzed frame, only when the bridge was spawned with `keep_frames`.
    pub image: Option<RgbImage>,
}

/// Messages sent from the vision thread.
#[derive(Debug, Clone)]
pub enum VisionMessage {
    Frame(DetectionFrame),
    Closed,
    Failed(String),
}

/// Main-thread handle on a running vision thread.
///
/// Inserted as a resource by the game; the flow tool uses it directly.
#[derive(Resource)]
pub struct VisionBridge {
    pub tx_cmd: Sender<VisionCmd>,
    pub rx_msg: Receiver<VisionMessage>,
    pub handle: Option<JoinHandle<()>>,
}

impl VisionBridge {
    /// Spawn the vision thread.
    ///
    /// `capacity` bounds the number of undelivered frames.
    pub fn spawn(
        source: Box<dyn FrameSource>,
        detector: Box<dyn Detector>,
        keep_frames: bool,
        capacity: usize,
    ) -> Self {
        let (tx_cmd, rx_cmd) = unbounded::<VisionCmd>();
        let (tx_msg, rx_msg) = bounded::<VisionMessage>(capacity.max(1));
        let handle = std::thread::Builder::new()
            .name("vision".into())
            .spawn(move || vision_thread(source, detector, rx_cmd, tx_msg, keep_frames))
            .ok();
        if handle.is_none() {
            warn!("[vision] failed to spawn thread");
        }
        Self {
            tx_cmd,
            rx_msg,
            handle,
        }
    }

    /// Drain every message available right now without blocking.
    pub fn drain(&self) -> Vec<VisionMessage> {
        self.rx_msg.try_iter().collect()
    }

    /// Ask the thread to stop and wait for it.
    pub fn shutdown(mut self) {
        let _ = self.tx_cmd.send(VisionCmd::Shutdown);
        // Unblock a pending send on a full channel.
        while self.rx_msg.try_recv().is_ok() {}
        if let Some(handle) = self.handle.take() {
            drop(self.rx_msg);
            let _ = handle.join();
        }
    }
}

/// Entry point of the vision thread.
pub fn vision_thread(
    mut source: Box<dyn FrameSource>,
    mut detector: Box<dyn Detector>,
    rx_cmd: Receiver<VisionCmd>,
    tx_msg: Sender<VisionMessage>,
    keep_frames: bool,
) {
    info!(
        "[vision] thread starting (id={:?})",
        std::thread::current().id()
    );
    let mut seq = 0u64;

    loop {
        match rx_cmd.try_recv() {
            Ok(VisionCmd::Shutdown) | Err(TryRecvError::Disconnected) => {
                debug!("[vision] shutdown requested");
                break;
            }
            Err(TryRecvError::Empty) => {}
        }

        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                info!("[vision] camera stream ended after {} frames", seq);
                let _ = tx_msg.send(VisionMessage::Closed);
                break;
            }
            Err(e) => {
                warn!("[vision] frame read failed: {}", e);
                let _ = tx_msg.send(VisionMessage::Failed(e.to_string()));
                break;
            }
        };

        let detections = match detector.detect(&frame) {
            Ok(detections) => detections,
            Err(e) => {
                warn!("[vision] detection failed: {}", e);
                let _ = tx_msg.send(VisionMessage::Failed(e.to_string()));
                break;
            }
        };
        seq += 1;

        let message = VisionMessage::Frame(DetectionFrame {
            seq,
            width: frame.width(),
            height: frame.height(),
            detections,
            image: keep_frames.then_some(frame),
        });
        if tx_msg.send(message).is_err() {
            debug!("[vision] receiver dropped");
            break;
        }
    }
    info!("[vision] thread exiting");
}
