use tagtrack_core::InvalidRotation;

use crate::camera::CameraError;
use crate::detector::DetectError;
use crate::preprocess::DecodeError;

/// Errors surfaced by a pose query.
///
/// Every dependency failure propagates verbatim; there is no partial
/// success and no internal retry.
#[derive(thiserror::Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error(transparent)]
    InvalidRotation(#[from] InvalidRotation),

    #[error("pose query timed out")]
    Timeout,

    #[error("detection worker exited")]
    WorkerExited,

    #[error("`{0}` is not implemented")]
    Unimplemented(&'static str),
}
