//! Common fixtures for field tests.

use field_common::{BoundingBox, GeoPoint, ScalarObservation, VectorObservation, WeatherReport};

/// The demo weather reports shipped with the CLI.
pub const MALAYSIA_DEMO_JSON: &str = include_str!("../../../data/malaysia_demo.json");

/// The 12 Malaysian demo cities.
pub fn malaysia_demo_reports() -> Vec<WeatherReport> {
    WeatherReport::list_from_json(MALAYSIA_DEMO_JSON).expect("demo data is valid JSON")
}

/// Heat-field extent used by default.
pub fn malaysia_heat_bbox() -> BoundingBox {
    BoundingBox::new(0.8, 7.5, 99.5, 119.5).expect("valid bbox")
}

/// Wind-field extent used by default.
pub fn malaysia_wind_bbox() -> BoundingBox {
    BoundingBox::new(1.0, 7.2, 99.5, 119.0).expect("valid bbox")
}

/// Three risk samples at unit-square corners; their IDW value at (0.5, 0.5)
/// with power 2.5 is exactly 50.
pub fn unit_square_risks() -> Vec<ScalarObservation> {
    vec![
        ScalarObservation::new(GeoPoint::new(0.0, 0.0), 10.0),
        ScalarObservation::new(GeoPoint::new(0.0, 1.0), 90.0),
        ScalarObservation::new(GeoPoint::new(1.0, 0.0), 50.0),
    ]
}

/// Two equal-speed winds from opposite directions, equidistant from the origin.
pub fn opposing_winds(speed: f64) -> Vec<VectorObservation> {
    vec![
        VectorObservation::new(GeoPoint::new(0.0, -1.0), speed, 0.0),
        VectorObservation::new(GeoPoint::new(0.0, 1.0), speed, 180.0),
    ]
}

/// A single report with everything needed for a valid observation.
pub fn report(name: &str, lat: f64, lon: f64, wind_speed: f64, wind_bearing: f64) -> WeatherReport {
    WeatherReport {
        name: name.to_string(),
        lat,
        lon,
        wind_speed,
        wind_gust_speed: None,
        wind_bearing,
        humidity: 75.0,
        temperature: 30.0,
        rainfall: 0.0,
        description: "few clouds".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_reports_parse() {
        let reports = malaysia_demo_reports();
        assert_eq!(reports.len(), 12);
        assert!(reports.iter().all(|r| r.validate().is_ok()));
        assert_eq!(reports[0].name, "Kuala Lumpur");
    }

    #[test]
    fn test_demo_reports_inside_heat_bbox() {
        let bbox = malaysia_heat_bbox();
        assert!(malaysia_demo_reports()
            .iter()
            .all(|r| bbox.contains(&r.position())));
    }
}
