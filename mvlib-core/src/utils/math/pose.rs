//! Pose data model for MVLib telemetry.
//!
//! A [`Pose`] is a planar robot position plus heading. Odometry backends
//! report it through a [`PoseSample`], which is either a concrete pose or an
//! explicit "unavailable" marker.
//!
//! # Example
//! ```rust
//! use mvlib_core::utils::math::pose::{Pose, PoseSample};
//! let sample = PoseSample::from(Some(Pose::new(12.5, -3.0, 90.0)));
//! assert_eq!(sample.pose().map(|p| p.theta), Some(90.0));
//! ```
//!
extern crate alloc;

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Robot position and heading as reported by odometry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Horizontal position (in)
    pub x: f32,
    /// Vertical position (in)
    pub y: f32,
    /// Heading (deg), in whatever convention the backend reports
    pub theta: f32,
}

impl Pose {
    pub const fn new(
        x: f32,
        y: f32,
        theta: f32,
    ) -> Self {
        Self { x, y, theta }
    }

    /// Planar distance to another pose (in). Heading is ignored.
    pub fn distance_to(
        &self,
        other: &Pose,
    ) -> f32 {
        libm::hypotf(other.x - self.x, other.y - self.y)
    }
}

/// Result of one pose query.
///
/// Serialized as JSON with tag `"s"`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "s", rename_all = "snake_case")]
pub enum PoseSample {
    /// Backend reported a pose.
    Pose(Pose),
    /// No data this sample (no chassis, odometry off, no getter).
    #[default]
    Unavailable,
}

impl PoseSample {
    pub fn is_available(&self) -> bool {
        matches!(self, PoseSample::Pose(_))
    }

    pub fn pose(&self) -> Option<Pose> {
        match self {
            PoseSample::Pose(p) => Some(*p),
            PoseSample::Unavailable => None,
        }
    }
}

impl From<Option<Pose>> for PoseSample {
    fn from(value: Option<Pose>) -> Self {
        value.map_or(PoseSample::Unavailable, PoseSample::Pose)
    }
}

impl From<Pose> for PoseSample {
    fn from(value: Pose) -> Self {
        PoseSample::Pose(value)
    }
}

impl From<PoseSample> for Option<Pose> {
    fn from(value: PoseSample) -> Self {
        value.pose()
    }
}

/// One logger sample stamped with the logger clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseRecord {
    /// Milliseconds since boot
    #[serde(rename = "t")]
    pub timestamp_ms: u64,
    #[serde(rename = "pose")]
    pub sample: PoseSample,
}

impl PoseRecord {
    /// Render the record as a single JSON telemetry line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_option() {
        assert_eq!(PoseSample::from(None), PoseSample::Unavailable);
        let p = Pose::new(1.0, 2.0, 45.0);
        assert_eq!(PoseSample::from(Some(p)), PoseSample::Pose(p));
        assert_eq!(Option::<Pose>::from(PoseSample::Pose(p)), Some(p));
    }

    #[test]
    fn test_default_is_unavailable() {
        assert!(!PoseSample::default().is_available());
        assert_eq!(Pose::default(), Pose::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_distance_ignores_heading() {
        let a = Pose::new(0.0, 0.0, 0.0);
        let b = Pose::new(3.0, 4.0, 180.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_json_shape() {
        let json = serde_json::to_string(&PoseSample::Pose(Pose::new(12.5, -3.0, 90.0))).unwrap();
        assert_eq!(json, r#"{"s":"pose","x":12.5,"y":-3.0,"theta":90.0}"#);

        let json = serde_json::to_string(&PoseSample::Unavailable).unwrap();
        assert_eq!(json, r#"{"s":"unavailable"}"#);
    }

    #[test]
    fn test_record_json_line() {
        let rec = PoseRecord {
            timestamp_ms: 250,
            sample: PoseSample::Unavailable,
        };
        assert_eq!(rec.to_json().unwrap(), r#"{"t":250,"pose":{"s":"unavailable"}}"#);

        let parsed: PoseRecord =
            serde_json::from_str(r#"{"t":7,"pose":{"s":"pose","x":1.0,"y":2.0,"theta":45.0}}"#)
                .unwrap();
        assert_eq!(parsed.sample, PoseSample::Pose(Pose::new(1.0, 2.0, 45.0)));
    }
}
