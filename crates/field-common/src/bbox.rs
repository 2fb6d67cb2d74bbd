//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};
use crate::geo::GeoPoint;

/// A geographic bounding box in degrees.
///
/// Invariant: `lat_min < lat_max` and `lon_min < lon_max`. Use
/// [`BoundingBox::new`] to construct a checked box; deserialized boxes are
/// checked by [`BoundingBox::validate`] as part of config validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Create a new bounding box, rejecting empty or inverted extents.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> FieldResult<Self> {
        let bbox = Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    /// Parse a WMS-style BBOX string: "lon_min,lat_min,lon_max,lat_max"
    pub fn from_wms_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |p: &str| {
            p.parse::<f64>()
                .map_err(|_| BboxParseError::InvalidNumber(p.to_string()))
        };

        let lon_min = parse(parts[0])?;
        let lat_min = parse(parts[1])?;
        let lon_max = parse(parts[2])?;
        let lat_max = parse(parts[3])?;

        Self::new(lat_min, lat_max, lon_min, lon_max)
            .map_err(|e| BboxParseError::InvalidExtent(e.to_string()))
    }

    /// Check the ordering invariant.
    pub fn validate(&self) -> FieldResult<()> {
        let all_finite = [self.lat_min, self.lat_max, self.lon_min, self.lon_max]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(FieldError::InvalidBbox(format!(
                "non-finite coordinate in {:?}",
                self
            )));
        }
        if self.lat_min >= self.lat_max {
            return Err(FieldError::InvalidBbox(format!(
                "lat_min {} must be below lat_max {}",
                self.lat_min, self.lat_max
            )));
        }
        if self.lon_min >= self.lon_max {
            return Err(FieldError::InvalidBbox(format!(
                "lon_min {} must be below lon_max {}",
                self.lon_min, self.lon_max
            )));
        }
        Ok(())
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Longitude extent in degrees.
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// North-west corner, the top-left of a north-up map.
    pub fn north_west(&self) -> GeoPoint {
        GeoPoint::new(self.lat_max, self.lon_min)
    }

    /// South-east corner, the bottom-right of a north-up map.
    pub fn south_east(&self) -> GeoPoint {
        GeoPoint::new(self.lat_min, self.lon_max)
    }

    /// Check if a point is contained within this bbox (edges inclusive).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.lat_min
            && point.lat <= self.lat_max
            && point.lon >= self.lon_min
            && point.lon <= self.lon_max
    }

    /// Check if a point lies strictly inside this bbox.
    pub fn strictly_contains(&self, point: &GeoPoint) -> bool {
        point.lat > self.lat_min
            && point.lat < self.lat_max
            && point.lon > self.lon_min
            && point.lon < self.lon_max
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid BBOX format: {0}. Expected 'lon_min,lat_min,lon_max,lat_max'")]
    InvalidFormat(String),

    #[error("Invalid number in BBOX: {0}")]
    InvalidNumber(String),

    #[error("Invalid BBOX extent: {0}")]
    InvalidExtent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wms_bbox() {
        let bbox = BoundingBox::from_wms_string("99.5,0.8,119.5,7.5").unwrap();
        assert_eq!(bbox.lon_min, 99.5);
        assert_eq!(bbox.lat_min, 0.8);
        assert_eq!(bbox.lon_max, 119.5);
        assert_eq!(bbox.lat_max, 7.5);
    }

    #[test]
    fn test_corners() {
        let bbox = BoundingBox::new(0.8, 7.5, 99.5, 119.5).unwrap();
        assert_eq!(bbox.north_west(), GeoPoint::new(7.5, 99.5));
        assert_eq!(bbox.south_east(), GeoPoint::new(0.8, 119.5));
    }
}
