//! The pose-tracking pipeline.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};
use tagtrack_core::{extract_pose, Pose};

use crate::aggregate::filter_poses;
use crate::camera::{select_frame, Camera, CameraError, ImageFormat};
use crate::config::{ConfigError, TrackerConfig};
use crate::detector::MarkerDetector;
use crate::error::TrackerError;
use crate::preprocess::decode_gray;
use crate::worker::DetectionWorker;

/// Optional per-query deadline, checked between pipeline steps.
///
/// Expiry aborts the invocation with [`TrackerError::Timeout`]; partial
/// results are discarded, never returned.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    expires: Option<Instant>,
}

impl Deadline {
    pub fn after(timeout: Option<Duration>) -> Self {
        Self {
            expires: timeout.map(|t| Instant::now() + t),
        }
    }

    /// Time left, `None` for an unbounded query.
    pub fn remaining(&self) -> Option<Duration> {
        self.expires
            .map(|e| e.saturating_duration_since(Instant::now()))
    }

    pub fn check(&self) -> Result<(), TrackerError> {
        match self.remaining() {
            Some(left) if left.is_zero() => Err(TrackerError::Timeout),
            _ => Ok(()),
        }
    }
}

/// Fiducial marker pose tracker.
///
/// One invocation of [`TagTracker::get_poses`] fetches intrinsics and a
/// frame from the camera, reduces the frame to grayscale, runs the
/// detector on its dedicated worker and converts each detection into a
/// [`Pose`] keyed by marker id. Invocations share no mutable state and
/// may run concurrently; the worker serializes the detector itself.
pub struct TagTracker {
    camera: Arc<dyn Camera>,
    worker: DetectionWorker,
    config: TrackerConfig,
}

impl TagTracker {
    /// Validate the configuration and bind the collaborators.
    pub fn new(
        config: TrackerConfig,
        camera: Arc<dyn Camera>,
        detector: Box<dyn MarkerDetector>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if *detector.family() != config.family {
            return Err(ConfigError::FamilyMismatch {
                configured: config.family.to_string(),
                detector: detector.family().to_string(),
            });
        }
        info!(
            "tracker for camera `{}`, family {}, marker width {} mm",
            config.camera_name, config.family, config.marker_width_mm
        );
        Ok(Self {
            camera,
            worker: DetectionWorker::spawn(detector),
            config,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Poses of the requested markers, keyed by marker id.
    ///
    /// An empty `requested` slice returns every detected marker; ids
    /// that match nothing are absent from the result rather than errors.
    pub fn get_poses(
        &self,
        requested: &[String],
        timeout: Option<Duration>,
    ) -> Result<HashMap<String, Pose>, TrackerError> {
        let deadline = Deadline::after(timeout);

        let intrinsics = self.camera.properties()?;
        deadline.check()?;

        let frames = self.camera.images()?;
        let encoded =
            select_frame(&frames).ok_or(CameraError::UnsupportedFormat(ImageFormat::Jpeg))?;
        deadline.check()?;

        let gray = decode_gray(encoded)?;
        debug!("decoded {}x{} frame", gray.width, gray.height);
        deadline.check()?;

        let markers = self.worker.detect(
            gray,
            intrinsics,
            self.config.marker_width_m(),
            deadline.remaining(),
        )?;
        info!("detected {} marker(s)", markers.len());

        let mut poses = Vec::with_capacity(markers.len());
        for marker in &markers {
            poses.push((marker.id, extract_pose(marker, self.config.report_unit)?));
        }
        Ok(filter_poses(poses, requested))
    }

    /// Geometry reporting is a pass-through surface and not implemented.
    pub fn geometries(&self) -> Result<Vec<serde_json::Value>, TrackerError> {
        Err(TrackerError::Unimplemented("get_geometries"))
    }

    /// Arbitrary command dispatch is a pass-through surface and not
    /// implemented.
    pub fn command(&self, _command: &serde_json::Value) -> Result<serde_json::Value, TrackerError> {
        Err(TrackerError::Unimplemented("do_command"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_deadline_never_expires() {
        let deadline = Deadline::after(None);
        assert!(deadline.remaining().is_none());
        deadline.check().expect("no deadline");
    }

    #[test]
    fn elapsed_deadline_fails_check() {
        let deadline = Deadline::after(Some(Duration::ZERO));
        assert!(matches!(deadline.check(), Err(TrackerError::Timeout)));
    }

    #[test]
    fn future_deadline_passes_check() {
        let deadline = Deadline::after(Some(Duration::from_secs(60)));
        deadline.check().expect("plenty of time");
        assert!(deadline.remaining().expect("bounded") > Duration::from_secs(59));
    }
}
