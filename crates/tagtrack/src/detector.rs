//! Marker detection capability contract.
//!
//! Detection itself is an external capability. The trait fixes the
//! marker family and any detector options at construction time, so the
//! per-call surface is just image + intrinsics + physical marker size
//! and there is no conditional dispatch in the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};
use tagtrack_core::{CameraIntrinsics, DetectedMarker, GrayImage};

/// Name of a fiducial encoding scheme, e.g. `tag16h5` (16-bit tags at
/// Hamming distance 5) or `tag36h11`. Opaque to the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerFamily(String);

impl MarkerFamily {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn tag16h5() -> Self {
        Self::new("tag16h5")
    }

    pub fn tag36h11() -> Self {
        Self::new("tag36h11")
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MarkerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The external detection capability failed outright. Finding zero
/// markers is *not* a failure and comes back as an empty list.
#[derive(thiserror::Error, Debug)]
#[error("marker detection failed: {0}")]
pub struct DetectError(pub String);

/// Pose-capable marker detector.
///
/// `marker_width_m` is the physical tag side length in meters; with it
/// and the intrinsics the detector reports rotation and translation in
/// meters. Implementations are stateless across calls apart from the
/// family/options fixed at construction.
pub trait MarkerDetector: Send {
    fn family(&self) -> &MarkerFamily;

    fn detect(
        &self,
        image: &GrayImage,
        intrinsics: &CameraIntrinsics,
        marker_width_m: f64,
    ) -> Result<Vec<DetectedMarker>, DetectError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_helpers_and_display() {
        assert_eq!(MarkerFamily::tag16h5().as_str(), "tag16h5");
        assert_eq!(MarkerFamily::tag36h11().to_string(), "tag36h11");
        assert!(MarkerFamily::new("").is_empty());
    }

    #[test]
    fn family_is_transparent_in_json() {
        let family: MarkerFamily = serde_json::from_str("\"tag16h5\"").expect("parse");
        assert_eq!(family, MarkerFamily::tag16h5());
    }
}
