//! Camera collaborator contract.
//!
//! The tracker never owns a camera; it borrows one through the [`Camera`]
//! trait and fetches intrinsics fresh on every invocation.

use serde::{Deserialize, Serialize};
use tagtrack_core::CameraIntrinsics;

/// Encodings a camera may hand back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// An encoded frame as delivered by the camera.
#[derive(Clone, Debug)]
pub struct EncodedImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

/// Camera collaborator failures, propagated unchanged to the caller of
/// the pose query. The tracker performs no retries and no fallback.
#[derive(thiserror::Error, Debug)]
pub enum CameraError {
    #[error("camera reports no intrinsic calibration")]
    MissingIntrinsics,

    #[error("camera is not connected")]
    Disconnected,

    #[error("camera cannot deliver {0:?} frames")]
    UnsupportedFormat(ImageFormat),

    #[error("camera failure: {0}")]
    Other(String),
}

/// External camera capability.
///
/// Implementations must tolerate concurrent read-only use; a
/// non-reentrant backend should serialize internally.
pub trait Camera: Send + Sync {
    /// Current intrinsics. Called once per pose query, never cached by
    /// the tracker: the camera may be reconfigured between queries.
    fn properties(&self) -> Result<CameraIntrinsics, CameraError>;

    /// One encoded frame in the requested format.
    fn image(&self, format: ImageFormat) -> Result<EncodedImage, CameraError>;

    /// All encodings the camera can deliver for the current frame. The
    /// default asks for a single JPEG frame.
    fn images(&self) -> Result<Vec<EncodedImage>, CameraError> {
        Ok(vec![self.image(ImageFormat::Jpeg)?])
    }
}

/// Pick a JPEG-compatible representation out of a multi-encoding frame
/// set, falling back to the first available frame. Whether that frame
/// actually decodes is settled later, in the preprocessor.
pub fn select_frame(frames: &[EncodedImage]) -> Option<&EncodedImage> {
    frames
        .iter()
        .find(|f| f.format == ImageFormat::Jpeg)
        .or_else(|| frames.first())
}

/// Canned camera: fixed intrinsics plus pre-encoded frames.
///
/// Stands in for a real camera in tests and offline runs against recorded
/// frames.
#[derive(Clone, Debug)]
pub struct StaticCamera {
    intrinsics: CameraIntrinsics,
    frames: Vec<EncodedImage>,
}

impl StaticCamera {
    pub fn new(intrinsics: CameraIntrinsics, frames: Vec<EncodedImage>) -> Self {
        Self { intrinsics, frames }
    }
}

impl Camera for StaticCamera {
    fn properties(&self) -> Result<CameraIntrinsics, CameraError> {
        Ok(self.intrinsics)
    }

    fn image(&self, format: ImageFormat) -> Result<EncodedImage, CameraError> {
        self.frames
            .iter()
            .find(|f| f.format == format)
            .cloned()
            .ok_or(CameraError::UnsupportedFormat(format))
    }

    fn images(&self) -> Result<Vec<EncodedImage>, CameraError> {
        Ok(self.frames.clone())
    }
}
