//! Core numeric types for fiducial-marker pose tracking.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete marker detector, camera backend or image codec:
//! it owns the quaternion <-> orientation-vector conversion, the pose
//! extraction from raw detector output, and the lightweight grayscale
//! buffer handed to detectors.

mod image;
mod logger;
mod orientation;
mod pose;
mod types;

pub use image::{GrayImage, GrayImageError};
pub use logger::{init, init_with_level};
pub use orientation::{OrientationError, OrientationVector};
pub use pose::{extract_pose, rotation_to_quaternion, InvalidRotation, Pose, PoseUnit};
pub use types::{CameraIntrinsics, DetectedMarker};
