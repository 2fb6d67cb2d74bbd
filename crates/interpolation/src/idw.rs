//! Inverse Distance Weighting.
//!
//! Weights are `1 / d^power` where `d` is the planar distance in degrees.
//! A query within `exact_match_threshold` of an observation takes that
//! observation's value directly; the first such observation in stored order
//! wins, even if a later one is closer.

use field_common::config::DEFAULT_EXACT_MATCH_THRESHOLD_DEG;
use field_common::{GeoPoint, ScalarObservation, VectorObservation};
use serde::{Deserialize, Serialize};

/// Default distance exponent for flood risk.
pub const RISK_POWER: f64 = 2.5;

/// Default distance exponent for wind.
pub const WIND_POWER: f64 = 2.0;

/// IDW parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdwParams {
    /// Distance exponent (higher = more local influence)
    pub power: f64,
    /// Queries closer than this (degrees) snap to the observation
    pub exact_match_threshold: f64,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self::risk()
    }
}

impl IdwParams {
    pub fn new(power: f64, exact_match_threshold: f64) -> Self {
        Self {
            power,
            exact_match_threshold,
        }
    }

    pub fn with_power(power: f64) -> Self {
        Self::new(power, DEFAULT_EXACT_MATCH_THRESHOLD_DEG)
    }

    /// Parameters for the flood-risk field.
    pub fn risk() -> Self {
        Self::with_power(RISK_POWER)
    }

    /// Parameters for the wind field.
    pub fn wind() -> Self {
        Self::with_power(WIND_POWER)
    }
}

/// Interpolated wind at a query point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindVector {
    /// Resultant speed (m/s): mean speed scaled by directional agreement
    pub magnitude: f64,
    /// Direction the wind blows from, degrees clockwise from north in `[0, 360)`
    pub bearing: f64,
    /// Weighted mean speed ignoring direction
    pub mean_speed: f64,
}

impl WindVector {
    pub fn new(magnitude: f64, bearing: f64) -> Self {
        Self {
            magnitude,
            bearing,
            mean_speed: magnitude,
        }
    }

    /// Direction the wind blows toward.
    pub fn downwind_bearing(&self) -> f64 {
        (self.bearing + 180.0).rem_euclid(360.0)
    }
}

/// Estimate a scalar value at `query` with default threshold.
pub fn interpolate_scalar(observations: &[ScalarObservation], query: GeoPoint, power: f64) -> f64 {
    scalar_idw(observations, query, &IdwParams::with_power(power))
}

/// Estimate a wind vector at `query` with default threshold.
pub fn interpolate_vector(
    observations: &[VectorObservation],
    query: GeoPoint,
    power: f64,
) -> WindVector {
    vector_idw(observations, query, &IdwParams::with_power(power))
}

/// Scalar IDW. An empty observation set yields 0.
pub fn scalar_idw(observations: &[ScalarObservation], query: GeoPoint, params: &IdwParams) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for obs in observations {
        let d = obs.position.planar_distance(&query);
        if d < params.exact_match_threshold {
            return obs.value;
        }
        let w = 1.0 / d.powf(params.power);
        weighted_sum += w * obs.value;
        weight_total += w;
    }

    if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        0.0
    }
}

/// Vector IDW using a weighted circular mean of bearings.
///
/// Bearings are averaged as unit vectors so 350° and 10° meet at 0°, not
/// 180°. The returned magnitude is the weighted mean speed multiplied by the
/// mean resultant length, so directions that cancel also cancel the speed.
pub fn vector_idw(observations: &[VectorObservation], query: GeoPoint, params: &IdwParams) -> WindVector {
    let mut sum_u = 0.0;
    let mut sum_v = 0.0;
    let mut sum_mag = 0.0;
    let mut weight_total = 0.0;

    for obs in observations {
        let d = obs.position.planar_distance(&query);
        if d < params.exact_match_threshold {
            return WindVector::new(obs.magnitude, obs.bearing);
        }
        let w = 1.0 / d.powf(params.power);
        let rad = obs.bearing.to_radians();
        sum_u += w * rad.sin();
        sum_v += w * rad.cos();
        sum_mag += w * obs.magnitude;
        weight_total += w;
    }

    if weight_total <= 0.0 {
        return WindVector::default();
    }

    let u = sum_u / weight_total;
    let v = sum_v / weight_total;
    let mean_speed = sum_mag / weight_total;
    let resultant = (u * u + v * v).sqrt().min(1.0);

    let mut bearing = u.atan2(v).to_degrees();
    if bearing < 0.0 {
        bearing += 360.0;
    }
    if bearing >= 360.0 {
        bearing -= 360.0;
    }

    WindVector {
        magnitude: mean_speed * resultant,
        bearing,
        mean_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(lat: f64, lon: f64, value: f64) -> ScalarObservation {
        ScalarObservation::new(GeoPoint::new(lat, lon), value)
    }

    fn vector(lat: f64, lon: f64, magnitude: f64, bearing: f64) -> VectorObservation {
        VectorObservation::new(GeoPoint::new(lat, lon), magnitude, bearing)
    }

    #[test]
    fn test_empty_scalar_is_zero() {
        assert_eq!(interpolate_scalar(&[], GeoPoint::new(3.0, 101.0), 2.5), 0.0);
    }

    #[test]
    fn test_empty_vector_is_zero() {
        let w = interpolate_vector(&[], GeoPoint::new(3.0, 101.0), 2.0);
        assert_eq!(w, WindVector::default());
    }

    #[test]
    fn test_exact_match_scalar() {
        let obs = vec![scalar(3.0, 101.0, 42.0), scalar(5.0, 103.0, 7.0)];
        assert_eq!(interpolate_scalar(&obs, GeoPoint::new(3.0, 101.0), 2.5), 42.0);
        assert_eq!(interpolate_scalar(&obs, GeoPoint::new(3.005, 101.0), 2.5), 42.0);
    }

    #[test]
    fn test_exact_match_is_first_found_not_nearest() {
        // Both within the threshold; the second is closer but the first wins.
        let obs = vec![scalar(0.0, 0.009, 1.0), scalar(0.0, 0.001, 2.0)];
        assert_eq!(interpolate_scalar(&obs, GeoPoint::new(0.0, 0.0), 2.5), 1.0);
    }

    #[test]
    fn test_threshold_override() {
        let obs = vec![scalar(0.0, 0.0, 10.0), scalar(0.0, 1.0, 90.0)];
        let params = IdwParams::new(2.5, 0.5);
        assert_eq!(scalar_idw(&obs, GeoPoint::new(0.0, 0.4), &params), 10.0);
    }

    #[test]
    fn test_exact_match_vector_unmodified() {
        let obs = vec![vector(3.0, 101.0, 12.0, 275.0), vector(5.0, 101.0, 4.0, 10.0)];
        let w = interpolate_vector(&obs, GeoPoint::new(3.0, 101.0), 2.0);
        assert_eq!(w.magnitude, 12.0);
        assert_eq!(w.bearing, 275.0);
    }

    #[test]
    fn test_circular_mean_wraps_through_north() {
        let obs = vec![vector(0.0, -1.0, 10.0, 350.0), vector(0.0, 1.0, 10.0, 10.0)];
        let w = interpolate_vector(&obs, GeoPoint::new(0.0, 0.0), 2.0);
        assert!(w.bearing < 0.5 || w.bearing > 359.5, "bearing {}", w.bearing);
        assert!(w.magnitude > 9.0);
        assert!((w.mean_speed - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_aligned_bearings_keep_mean_speed() {
        let obs = vec![vector(0.0, -1.0, 4.0, 90.0), vector(0.0, 1.0, 8.0, 90.0)];
        let w = interpolate_vector(&obs, GeoPoint::new(0.0, 0.0), 2.0);
        assert!((w.magnitude - 6.0).abs() < 1e-9);
        assert!((w.bearing - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_downwind_bearing() {
        assert_eq!(WindVector::new(5.0, 270.0).downwind_bearing(), 90.0);
        assert_eq!(WindVector::new(5.0, 180.0).downwind_bearing(), 0.0);
    }
}
