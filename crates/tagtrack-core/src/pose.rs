//! Pose extraction from raw detector output.

use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::orientation::OrientationVector;
use crate::types::DetectedMarker;

/// Max absolute deviation of `R^T R` from the identity before a rotation
/// matrix is rejected.
const ORTHONORMAL_TOL: f64 = 1e-6;

/// The detector returned a matrix that is not a proper rotation. This is
/// a defect in the external capability and is surfaced, never silently
/// re-orthonormalized.
#[derive(thiserror::Error, Debug)]
pub enum InvalidRotation {
    #[error("rotation matrix is not orthonormal (max deviation {deviation:.3e})")]
    NotOrthonormal { deviation: f64 },

    #[error("rotation matrix is a reflection (determinant {det:.6})")]
    Reflection { det: f64 },
}

/// Length unit poses are reported in. The detector itself always works in
/// meters; the scale below is applied exactly once, in [`extract_pose`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoseUnit {
    #[default]
    Millimeters,
    Meters,
}

impl PoseUnit {
    /// Scale factor from the detector's meters to this unit.
    #[inline]
    pub fn per_meter(self) -> f64 {
        match self {
            PoseUnit::Millimeters => 1000.0,
            PoseUnit::Meters => 1.0,
        }
    }
}

/// Marker pose in the camera frame: position in the configured report
/// unit plus a swing-twist orientation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: OrientationVector,
}

/// Validate a detector rotation matrix and convert it to a quaternion.
pub fn rotation_to_quaternion(r: &Matrix3<f64>) -> Result<UnitQuaternion<f64>, InvalidRotation> {
    let deviation = (r.transpose() * r - Matrix3::identity()).abs().max();
    if deviation > ORTHONORMAL_TOL {
        return Err(InvalidRotation::NotOrthonormal { deviation });
    }
    let det = r.determinant();
    if det <= 0.0 {
        return Err(InvalidRotation::Reflection { det });
    }
    Ok(UnitQuaternion::from_rotation_matrix(
        &Rotation3::from_matrix_unchecked(*r),
    ))
}

/// Turn one raw detection into a [`Pose`].
///
/// The translation comes out of the detector in meters and is scaled to
/// `unit` here and nowhere else.
pub fn extract_pose(marker: &DetectedMarker, unit: PoseUnit) -> Result<Pose, InvalidRotation> {
    let q = rotation_to_quaternion(&marker.rotation)?;
    Ok(Pose {
        position: marker.translation * unit.per_meter(),
        orientation: OrientationVector::from_quaternion(&q),
    })
}
