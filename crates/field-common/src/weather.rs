//! City-level weather reports supplied by the data-fetch layer.
//!
//! Reports arrive as JSON arrays (live API results and demo data share the
//! same shape). Each report is turned into one flood-risk scalar sample and
//! one wind vector sample.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FieldError, FieldResult};
use crate::geo::GeoPoint;
use crate::observation::{ScalarObservation, VectorObservation};

/// Current conditions at one named location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Sustained wind speed (m/s)
    pub wind_speed: f64,
    /// Gust speed (m/s); feeds defaults to the sustained speed when absent
    #[serde(default)]
    pub wind_gust_speed: Option<f64>,
    /// Direction the wind blows from, degrees clockwise from north
    #[serde(default)]
    pub wind_bearing: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Rainfall over the last 1h (or 3h when that is all the feed has), mm
    #[serde(default)]
    pub rainfall: f64,
    pub description: String,
}

impl WeatherReport {
    /// Parse a JSON array of reports.
    pub fn list_from_json(json: &str) -> FieldResult<Vec<WeatherReport>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON array of reports from disk.
    pub fn list_from_file(path: impl AsRef<std::path::Path>) -> FieldResult<Vec<WeatherReport>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FieldError::ObservationParse(format!("{}: {}", path.display(), e)))?;
        Self::list_from_json(&content)
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// Check the report can be turned into observations.
    pub fn validate(&self) -> FieldResult<()> {
        if !self.position().is_valid() {
            return Err(FieldError::InvalidObservation(format!(
                "{}: position ({}, {}) out of range",
                self.name, self.lat, self.lon
            )));
        }
        if !self.wind_speed.is_finite() || self.wind_speed < 0.0 {
            return Err(FieldError::InvalidObservation(format!(
                "{}: wind speed {} must be a non-negative number",
                self.name, self.wind_speed
            )));
        }
        if !self.wind_bearing.is_finite() {
            return Err(FieldError::InvalidObservation(format!(
                "{}: wind bearing is not finite",
                self.name
            )));
        }
        Ok(())
    }

    /// Flood risk score in `[0, 100]`.
    ///
    /// Rainfall contributes up to 40 points, saturated air 20, strong wind 20
    /// and a stormy description 20.
    pub fn risk_score(&self) -> u8 {
        let mut score: u32 = 0;

        if self.rainfall > 50.0 {
            score += 40;
        } else if self.rainfall > 20.0 {
            score += 25;
        } else if self.rainfall > 5.0 {
            score += 15;
        }

        if self.humidity > 85.0 {
            score += 20;
        }

        if self.wind_speed >= WindLevel::STRONG_THRESHOLD {
            score += 20;
        }

        let description = self.description.to_lowercase();
        if description.contains("heavy") || description.contains("thunder") {
            score += 20;
        }

        score.min(100) as u8
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score() as f64)
    }

    pub fn wind_level(&self) -> WindLevel {
        WindLevel::from_speed(self.wind_speed)
    }

    /// Flood-risk sample for the heat field.
    pub fn risk_observation(&self) -> ScalarObservation {
        ScalarObservation::risk(self.position(), self.risk_score() as f64)
    }

    /// Wind sample for the arrow field.
    pub fn wind_observation(&self) -> VectorObservation {
        VectorObservation::new(self.position(), self.wind_speed, self.wind_bearing)
    }
}

/// Flood-risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 60.0 {
            RiskLevel::High
        } else if score >= 30.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wind strength band used to tint station markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WindLevel {
    Light,
    Moderate,
    Strong,
    Storm,
}

impl WindLevel {
    pub const MODERATE_THRESHOLD: f64 = 8.0;
    pub const STRONG_THRESHOLD: f64 = 14.0;
    pub const STORM_THRESHOLD: f64 = 20.0;

    pub fn from_speed(speed: f64) -> Self {
        if speed >= Self::STORM_THRESHOLD {
            WindLevel::Storm
        } else if speed >= Self::STRONG_THRESHOLD {
            WindLevel::Strong
        } else if speed >= Self::MODERATE_THRESHOLD {
            WindLevel::Moderate
        } else {
            WindLevel::Light
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WindLevel::Light => "LIGHT",
            WindLevel::Moderate => "MODERATE",
            WindLevel::Strong => "STRONG",
            WindLevel::Storm => "STORM",
        }
    }
}

impl fmt::Display for WindLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(rainfall: f64, humidity: f64, wind_speed: f64, description: &str) -> WeatherReport {
        WeatherReport {
            name: "Test".to_string(),
            lat: 3.139,
            lon: 101.6869,
            wind_speed,
            wind_gust_speed: None,
            wind_bearing: 45.0,
            humidity,
            temperature: 30.0,
            rainfall,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_clear_day_scores_zero() {
        assert_eq!(report(0.0, 65.0, 3.0, "clear sky").risk_score(), 0);
    }

    #[test]
    fn test_score_is_capped() {
        let r = report(80.0, 95.0, 22.0, "heavy thunderstorm");
        assert_eq!(r.risk_score(), 100);
        assert_eq!(r.risk_level(), RiskLevel::High);
    }

    #[test]
    fn test_rainfall_bands() {
        assert_eq!(report(5.0, 0.0, 0.0, "").risk_score(), 0);
        assert_eq!(report(5.1, 0.0, 0.0, "").risk_score(), 15);
        assert_eq!(report(20.5, 0.0, 0.0, "").risk_score(), 25);
        assert_eq!(report(50.5, 0.0, 0.0, "").risk_score(), 40);
    }

    #[test]
    fn test_description_is_case_insensitive() {
        assert_eq!(report(0.0, 0.0, 0.0, "Heavy Rain").risk_score(), 20);
    }

    #[test]
    fn test_wind_levels() {
        assert_eq!(WindLevel::from_speed(3.0), WindLevel::Light);
        assert_eq!(WindLevel::from_speed(8.0), WindLevel::Moderate);
        assert_eq!(WindLevel::from_speed(14.0), WindLevel::Strong);
        assert_eq!(WindLevel::from_speed(20.0), WindLevel::Storm);
    }

    #[test]
    fn test_camel_case_json() {
        let json = r#"[{"name":"Ipoh","lat":4.5975,"lon":101.0901,"windSpeed":4,
            "windGustSpeed":7,"windBearing":315,"humidity":70,"temperature":30,
            "rainfall":0,"description":"clear sky"}]"#;
        let reports = WeatherReport::list_from_json(json).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].wind_bearing, 315.0);
        assert_eq!(reports[0].wind_gust_speed, Some(7.0));
    }
}
