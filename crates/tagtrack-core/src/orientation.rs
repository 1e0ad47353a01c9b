//! Swing-twist orientation encoding.
//!
//! An [`OrientationVector`] describes a rotation as the unit direction the
//! body's +Z axis points in the camera frame ("swing") plus the residual
//! spin in degrees about that direction ("twist"). It is isomorphic to a
//! unit quaternion up to the double-cover sign; conversions here always
//! pick a deterministic representative.

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Threshold on `|oz - ±1|` below which the direction counts as a pole.
const POLE_EPS: f64 = 1e-8;

#[derive(thiserror::Error, Debug)]
pub enum OrientationError {
    #[error("orientation axis has zero norm")]
    ZeroAxis,
}

/// Unit direction plus spin angle about that direction.
///
/// Invariants: `(ox, oy, oz)` has unit norm, `theta` is in degrees within
/// `(-180, 180]` (a value landing exactly on the boundary resolves to
/// `+180`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientationVector {
    pub ox: f64,
    pub oy: f64,
    pub oz: f64,
    /// Spin about `(ox, oy, oz)` in degrees.
    pub theta: f64,
}

impl OrientationVector {
    pub fn new(ox: f64, oy: f64, oz: f64, theta: f64) -> Self {
        Self { ox, oy, oz, theta }
    }

    /// Direction component as a vector.
    #[inline]
    pub fn axis(&self) -> Vector3<f64> {
        Vector3::new(self.ox, self.oy, self.oz)
    }

    /// Decompose a unit quaternion into swing and twist.
    ///
    /// The direction is the rotated reference axis `q * ez`, unit-length
    /// by construction. The twist is recovered by factoring
    /// `q = swing * twist` with `swing` the shortest arc taking `ez` to
    /// the direction and `twist` a rotation about `ez`.
    ///
    /// The shortest arc degenerates at the two poles, so those take
    /// dedicated branches (each continuous with the generic formula):
    /// - direction `~ +ez`: the swing is the identity and the whole
    ///   quaternion is twist, `theta = 2*atan2(q.k, q.w)`;
    /// - direction `~ -ez`: the swing is pinned to the half-turn about
    ///   +X, which leaves `theta = 2*atan2(-q.j, q.i)`.
    pub fn from_quaternion(q: &UnitQuaternion<f64>) -> Self {
        let d = q * Vector3::z();
        let qq = q.quaternion();

        let theta_rad = if d.z > 1.0 - POLE_EPS {
            2.0 * qq.k.atan2(qq.w)
        } else if d.z < -1.0 + POLE_EPS {
            2.0 * (-qq.j).atan2(qq.i)
        } else {
            let swing = UnitQuaternion::rotation_between(&Vector3::z(), &d)
                .unwrap_or_else(UnitQuaternion::identity);
            let twist = swing.inverse() * q;
            let t = twist.quaternion();
            2.0 * t.k.atan2(t.w)
        };

        Self {
            ox: d.x,
            oy: d.y,
            oz: d.z,
            theta: wrap_degrees(theta_rad.to_degrees()),
        }
    }

    /// Rebuild the quaternion: swing taking `ez` to the axis, composed
    /// with the twist about `ez`, in canonical sign.
    ///
    /// The axis is renormalized; a zero-norm axis is an error. The pole
    /// branch selection matches [`Self::from_quaternion`] so round trips
    /// reproduce the same rotation.
    pub fn to_quaternion(&self) -> Result<UnitQuaternion<f64>, OrientationError> {
        let axis = self.axis();
        let norm = axis.norm();
        if norm < 1e-12 {
            return Err(OrientationError::ZeroAxis);
        }
        let d = axis / norm;

        let swing = if d.z < -1.0 + POLE_EPS {
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI)
        } else {
            UnitQuaternion::rotation_between(&Vector3::z(), &d)
                .unwrap_or_else(UnitQuaternion::identity)
        };
        let twist = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.theta.to_radians());

        Ok(canonicalize(swing * twist))
    }
}

/// Wrap an angle in degrees into `(-180, 180]`.
fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = (deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}

/// Fix the double-cover sign: non-negative real part, and if the real
/// part vanishes the first non-zero imaginary component is made positive.
fn canonicalize(q: UnitQuaternion<f64>) -> UnitQuaternion<f64> {
    let c = q.quaternion().coords;
    let flip = if c.w.abs() > 1e-12 {
        c.w < 0.0
    } else if c.x.abs() > 1e-12 {
        c.x < 0.0
    } else if c.y.abs() > 1e-12 {
        c.y < 0.0
    } else {
        c.z < 0.0
    };
    if flip {
        UnitQuaternion::new_unchecked(-q.into_inner())
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    /// |q1 . q2|, 1 for equal rotations regardless of cover sign.
    fn rotation_dot(a: &UnitQuaternion<f64>, b: &UnitQuaternion<f64>) -> f64 {
        a.quaternion().coords.dot(&b.quaternion().coords).abs()
    }

    fn assert_invariants(ov: &OrientationVector) {
        assert_relative_eq!(ov.axis().norm(), 1.0, epsilon = 1e-9);
        assert!(
            ov.theta > -180.0 && ov.theta <= 180.0,
            "theta {} out of (-180, 180]",
            ov.theta
        );
    }

    fn assert_round_trip(q: &UnitQuaternion<f64>) {
        let ov = OrientationVector::from_quaternion(q);
        assert_invariants(&ov);
        let back = ov.to_quaternion().expect("unit axis");
        assert!(
            rotation_dot(q, &back) >= 1.0 - 1e-6,
            "round trip drifted: {q} -> {ov:?} -> {back}"
        );
    }

    #[test]
    fn identity_maps_to_plus_z_zero_twist() {
        let ov = OrientationVector::from_quaternion(&UnitQuaternion::identity());
        assert_relative_eq!(ov.ox, 0.0, epsilon = 1e-12);
        assert_relative_eq!(ov.oy, 0.0, epsilon = 1e-12);
        assert_relative_eq!(ov.oz, 1.0, epsilon = 1e-12);
        assert_relative_eq!(ov.theta, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn pure_z_rotation_is_pure_twist() {
        for deg in [30.0, 90.0, -90.0, 179.0, -179.0] {
            let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), f64::to_radians(deg));
            let ov = OrientationVector::from_quaternion(&q);
            assert_relative_eq!(ov.oz, 1.0, epsilon = 1e-9);
            assert_relative_eq!(ov.theta, deg, epsilon = 1e-9);
            assert_round_trip(&q);
        }
    }

    #[test]
    fn half_turn_about_z_keeps_theta_in_range() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI);
        let ov = OrientationVector::from_quaternion(&q);
        assert_relative_eq!(ov.theta, 180.0, epsilon = 1e-9);
        assert_round_trip(&q);
    }

    #[test]
    fn quarter_turn_about_x_is_pure_swing() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2);
        let ov = OrientationVector::from_quaternion(&q);
        assert_relative_eq!(ov.ox, 0.0, epsilon = 1e-9);
        assert_relative_eq!(ov.oy, -1.0, epsilon = 1e-9);
        assert_relative_eq!(ov.oz, 0.0, epsilon = 1e-9);
        assert_relative_eq!(ov.theta, 0.0, epsilon = 1e-9);
        assert_round_trip(&q);
    }

    #[test]
    fn south_pole_half_turn_about_x() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI);
        let ov = OrientationVector::from_quaternion(&q);
        assert_relative_eq!(ov.oz, -1.0, epsilon = 1e-12);
        assert_relative_eq!(ov.theta, 0.0, epsilon = 1e-9);
        assert_round_trip(&q);
    }

    #[test]
    fn south_pole_half_turn_about_y() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI);
        let ov = OrientationVector::from_quaternion(&q);
        assert_relative_eq!(ov.oz, -1.0, epsilon = 1e-12);
        assert_relative_eq!(ov.theta.abs(), 180.0, epsilon = 1e-9);
        assert_round_trip(&q);
    }

    #[test]
    fn south_pole_with_twist_round_trips_exactly() {
        for deg in [-135.0, -10.0, 45.0, 170.0] {
            let swing = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI);
            let twist = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), f64::to_radians(deg));
            let q = swing * twist;
            let ov = OrientationVector::from_quaternion(&q);
            assert_relative_eq!(ov.oz, -1.0, epsilon = 1e-12);
            assert_relative_eq!(ov.theta, deg, epsilon = 1e-9);
            assert_round_trip(&q);
        }
    }

    #[test]
    fn near_pole_round_trips() {
        // Approach both poles from several azimuths; the generic branch
        // must stay stable right up to the pole threshold.
        for tilt in [1e-3, 1e-5, 1e-7, PI - 1e-7, PI - 1e-5, PI - 1e-3] {
            for azimuth in [0.0, 1.0, 2.5, 4.0] {
                let spin = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), azimuth);
                let tilt_axis = nalgebra::Unit::new_normalize(spin * Vector3::x());
                let swing = UnitQuaternion::from_axis_angle(&tilt_axis, tilt);
                for twist_deg in [-170.0, -45.0, 0.0, 60.0, 179.0] {
                    let twist = UnitQuaternion::from_axis_angle(
                        &Vector3::z_axis(),
                        f64::to_radians(twist_deg),
                    );
                    assert_round_trip(&(swing * twist));
                }
            }
        }
    }

    #[test]
    fn round_trip_grid_of_axis_angles() {
        let axes = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-0.3, 0.8, -0.52),
            Vector3::new(2.0, -1.0, 0.25),
        ];
        let angles = [-179.0, -120.5, -90.0, -30.0, 0.0, 15.0, 90.0, 150.0, 180.0];
        for axis in axes {
            let axis = nalgebra::Unit::new_normalize(axis);
            for deg in angles {
                let q = UnitQuaternion::from_axis_angle(&axis, f64::to_radians(deg));
                assert_round_trip(&q);
            }
        }
    }

    #[test]
    fn canonical_sign_is_deterministic() {
        let ov = OrientationVector::new(0.0, 0.0, 1.0, 180.0);
        let q = ov.to_quaternion().expect("unit axis");
        // Half-turn about z: real part is zero, so k is forced positive.
        assert!(q.quaternion().k > 0.0);

        let generic = OrientationVector::new(0.6, 0.0, 0.8, 40.0);
        let q = generic.to_quaternion().expect("unit axis");
        assert!(q.quaternion().w > 0.0);
    }

    #[test]
    fn axis_is_renormalized() {
        let scaled = OrientationVector::new(0.0, 0.0, 2.0, 90.0);
        let unit = OrientationVector::new(0.0, 0.0, 1.0, 90.0);
        let a = scaled.to_quaternion().expect("unit axis");
        let b = unit.to_quaternion().expect("unit axis");
        assert!(rotation_dot(&a, &b) >= 1.0 - 1e-12);
    }

    #[test]
    fn zero_axis_is_rejected() {
        let err = OrientationVector::new(0.0, 0.0, 0.0, 10.0)
            .to_quaternion()
            .unwrap_err();
        assert!(matches!(err, OrientationError::ZeroAxis));
    }

    #[test]
    fn wrap_degrees_boundaries() {
        assert_relative_eq!(wrap_degrees(180.0), 180.0);
        assert_relative_eq!(wrap_degrees(-180.0), 180.0);
        assert_relative_eq!(wrap_degrees(190.0), -170.0);
        assert_relative_eq!(wrap_degrees(-190.0), 170.0);
        assert_relative_eq!(wrap_degrees(360.0), 0.0);
        assert_relative_eq!(wrap_degrees(359.0), -1.0);
    }
}
