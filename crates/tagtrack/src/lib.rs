//! Fiducial marker pose tracking.
//!
//! This crate wires the pieces of a detection-to-pose pipeline together:
//! - a [`Camera`] collaborator supplies intrinsics and encoded frames,
//! - [`preprocess`] reduces a frame to the grayscale buffer detectors
//!   consume,
//! - a [`MarkerDetector`] capability (family and options fixed at
//!   construction) reports per-marker rotation and translation,
//! - `tagtrack-core` converts each detection into a position plus
//!   swing-twist orientation vector,
//! - the result is filtered down to the requested marker ids.
//!
//! ## Quickstart
//!
//! ```no_run
//! use std::sync::Arc;
//! use tagtrack::{MarkerFamily, StaticCamera, TagTracker, TrackerConfig};
//! use tagtrack::camera::{EncodedImage, ImageFormat};
//! use tagtrack_core::CameraIntrinsics;
//!
//! # fn detector() -> Box<dyn tagtrack::MarkerDetector> { unimplemented!() }
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let camera = Arc::new(StaticCamera::new(
//!     CameraIntrinsics::new(608.7, 609.4, 320.2, 239.5),
//!     vec![EncodedImage { format: ImageFormat::Jpeg, bytes: std::fs::read("cam.jpg")? }],
//! ));
//! let config = TrackerConfig {
//!     camera_name: "cam".into(),
//!     family: MarkerFamily::tag16h5(),
//!     marker_width_mm: 22.5,
//!     report_unit: Default::default(),
//! };
//! let tracker = TagTracker::new(config, camera, detector())?;
//! let poses = tracker.get_poses(&[], None)?;
//! println!("tracked {} marker(s)", poses.len());
//! # Ok(())
//! # }
//! ```

pub use tagtrack_core as core;

pub mod aggregate;
pub mod camera;
pub mod config;
pub mod detector;
pub mod preprocess;
pub mod tracker;
pub mod worker;

mod error;

pub use camera::{Camera, CameraError, EncodedImage, ImageFormat, StaticCamera};
pub use config::{ConfigError, TrackerConfig};
pub use detector::{DetectError, MarkerDetector, MarkerFamily};
pub use error::TrackerError;
pub use tracker::{Deadline, TagTracker};

pub use tagtrack_core::{
    CameraIntrinsics, DetectedMarker, GrayImage, OrientationVector, Pose, PoseUnit,
};
