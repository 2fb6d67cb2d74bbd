//! Point observations fed to the field interpolators.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Upper bound of the flood-risk scale.
pub const MAX_RISK: f64 = 100.0;

/// A scalar sample at a known position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarObservation {
    pub position: GeoPoint,
    pub value: f64,
}

impl ScalarObservation {
    pub fn new(position: GeoPoint, value: f64) -> Self {
        Self { position, value }
    }

    /// A flood-risk sample, clamped into `[0, 100]`.
    pub fn risk(position: GeoPoint, score: f64) -> Self {
        Self {
            position,
            value: score.clamp(0.0, MAX_RISK),
        }
    }
}

/// A directional sample (wind) at a known position.
///
/// `bearing` follows the meteorological convention: degrees clockwise from
/// north, giving the direction the wind blows *from*.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorObservation {
    pub position: GeoPoint,
    pub magnitude: f64,
    pub bearing: f64,
}

impl VectorObservation {
    /// Create a vector sample with the bearing wrapped into `[0, 360)`.
    pub fn new(position: GeoPoint, magnitude: f64, bearing: f64) -> Self {
        Self {
            position,
            magnitude,
            bearing: normalize_bearing(bearing),
        }
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_bearing(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_is_clamped() {
        let p = GeoPoint::new(3.0, 101.0);
        assert_eq!(ScalarObservation::risk(p, 140.0).value, 100.0);
        assert_eq!(ScalarObservation::risk(p, -5.0).value, 0.0);
        assert_eq!(ScalarObservation::risk(p, 42.0).value, 42.0);
    }

    #[test]
    fn test_normalize_bearing() {
        assert_eq!(normalize_bearing(0.0), 0.0);
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert_eq!(normalize_bearing(-90.0), 270.0);
        assert_eq!(normalize_bearing(725.0), 5.0);
        let tiny = normalize_bearing(-1e-20);
        assert!((0.0..360.0).contains(&tiny));
    }
}
