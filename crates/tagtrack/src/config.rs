//! Validated tracker configuration.
//!
//! The surrounding service hands attributes over as loosely-typed
//! key/value pairs; they are resolved into this struct exactly once at
//! setup. A missing or malformed attribute is a typed, fatal error and
//! the pipeline never runs.

use serde::{Deserialize, Serialize};
use tagtrack_core::PoseUnit;

use crate::detector::MarkerFamily;

/// Configuration errors, fatal at setup time.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing required `{0}` attribute")]
    MissingAttribute(&'static str),

    #[error("marker_width_mm must be positive and finite (got {0})")]
    InvalidMarkerWidth(f64),

    #[error("configured family `{configured}` but the detector serves `{detector}`")]
    FamilyMismatch { configured: String, detector: String },
}

/// Tracker attributes resolved at setup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Name of the camera collaborator to resolve.
    pub camera_name: String,
    /// Fiducial family the detector is built for.
    pub family: MarkerFamily,
    /// Physical tag side length in millimeters.
    pub marker_width_mm: f64,
    /// Unit poses are reported in. Defaults to millimeters.
    #[serde(default)]
    pub report_unit: PoseUnit,
}

impl TrackerConfig {
    /// Check required attributes; called once before the tracker is
    /// constructed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.camera_name.is_empty() {
            return Err(ConfigError::MissingAttribute("camera_name"));
        }
        if self.family.is_empty() {
            return Err(ConfigError::MissingAttribute("family"));
        }
        if !self.marker_width_mm.is_finite() || self.marker_width_mm <= 0.0 {
            return Err(ConfigError::InvalidMarkerWidth(self.marker_width_mm));
        }
        Ok(())
    }

    /// Marker width in the meters the detector expects. This is the only
    /// place the configured millimeters are converted.
    #[inline]
    pub fn marker_width_m(&self) -> f64 {
        self.marker_width_mm / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config() -> TrackerConfig {
        TrackerConfig {
            camera_name: "cam".into(),
            family: MarkerFamily::tag16h5(),
            marker_width_mm: 22.5,
            report_unit: PoseUnit::default(),
        }
    }

    #[test]
    fn valid_config_passes() {
        config().validate().expect("valid");
    }

    #[test]
    fn marker_width_converts_to_meters() {
        assert_relative_eq!(config().marker_width_m(), 0.0225, epsilon = 1e-12);
    }

    #[test]
    fn empty_camera_name_is_fatal() {
        let mut cfg = config();
        cfg.camera_name.clear();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingAttribute("camera_name"))
        ));
    }

    #[test]
    fn empty_family_is_fatal() {
        let mut cfg = config();
        cfg.family = MarkerFamily::new("");
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingAttribute("family"))
        ));
    }

    #[test]
    fn non_positive_marker_width_is_fatal() {
        for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let mut cfg = config();
            cfg.marker_width_mm = bad;
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::InvalidMarkerWidth(_))
            ));
        }
    }

    #[test]
    fn report_unit_defaults_to_millimeters_in_json() {
        let cfg: TrackerConfig = serde_json::from_str(
            r#"{"camera_name": "cam", "family": "tag16h5", "marker_width_mm": 22.5}"#,
        )
        .expect("parse");
        assert_eq!(cfg.report_unit, PoseUnit::Millimeters);
    }
}
