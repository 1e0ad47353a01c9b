use nalgebra::{Matrix3, Point2, Vector3};
use serde::{Deserialize, Serialize};

/// Pinhole camera intrinsics in pixel units.
///
/// Fetched fresh from the camera on every pipeline invocation; the camera
/// may be reconfigured between calls, so these are never cached.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    pub focal_x: f64,
    pub focal_y: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl CameraIntrinsics {
    pub fn new(focal_x: f64, focal_y: f64, center_x: f64, center_y: f64) -> Self {
        Self {
            focal_x,
            focal_y,
            center_x,
            center_y,
        }
    }

    /// Parameter vector in the `[fx, fy, cx, cy]` ordering detectors expect.
    #[inline]
    pub fn as_array(&self) -> [f64; 4] {
        [self.focal_x, self.focal_y, self.center_x, self.center_y]
    }
}

/// One raw marker detection, in the detector's native length unit (meters).
///
/// `rotation` and `translation` place the marker in the camera frame;
/// `corners` are the four detected tag corners in pixel coordinates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DetectedMarker {
    pub id: i32,
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
    pub corners: [Point2<f64>; 4],
}
