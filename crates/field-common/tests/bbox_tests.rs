//! Tests for BoundingBox construction and queries.

use field_common::bbox::{BboxParseError, BoundingBox};
use field_common::{FieldError, GeoPoint};

fn malaysia() -> BoundingBox {
    BoundingBox::new(0.8, 7.5, 99.5, 119.5).unwrap()
}

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = malaysia();
    assert_eq!(bbox.lat_min, 0.8);
    assert_eq!(bbox.lat_max, 7.5);
    assert_eq!(bbox.lon_min, 99.5);
    assert_eq!(bbox.lon_max, 119.5);
}

#[test]
fn test_bbox_rejects_inverted_latitude() {
    let result = BoundingBox::new(7.5, 0.8, 99.5, 119.5);
    assert!(matches!(result, Err(FieldError::InvalidBbox(_))));
}

#[test]
fn test_bbox_rejects_inverted_longitude() {
    let result = BoundingBox::new(0.8, 7.5, 119.5, 99.5);
    assert!(matches!(result, Err(FieldError::InvalidBbox(_))));
}

#[test]
fn test_bbox_rejects_zero_extent() {
    assert!(BoundingBox::new(5.0, 5.0, 0.0, 1.0).is_err());
    assert!(BoundingBox::new(0.0, 1.0, 5.0, 5.0).is_err());
}

#[test]
fn test_bbox_rejects_nan() {
    assert!(BoundingBox::new(f64::NAN, 1.0, 0.0, 1.0).is_err());
}

// ============================================================================
// from_wms_string tests
// ============================================================================

#[test]
fn test_parse_wms_bbox_order() {
    // lon_min, lat_min, lon_max, lat_max
    let bbox = BoundingBox::from_wms_string("99.5,1.0,119.0,7.2").unwrap();
    assert_eq!(bbox, BoundingBox::new(1.0, 7.2, 99.5, 119.0).unwrap());
}

#[test]
fn test_parse_wms_bbox_whitespace_tolerated() {
    let bbox = BoundingBox::from_wms_string(" 0, 0, 10, 5 ").unwrap();
    assert_eq!(bbox.lat_max, 5.0);
    assert_eq!(bbox.lon_max, 10.0);
}

#[test]
fn test_parse_wms_bbox_invalid_format() {
    let result = BoundingBox::from_wms_string("0,0,100");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
    let result = BoundingBox::from_wms_string("");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_wms_bbox_invalid_number() {
    let result = BoundingBox::from_wms_string("abc,0,100,100");
    assert!(matches!(result, Err(BboxParseError::InvalidNumber(_))));
}

#[test]
fn test_parse_wms_bbox_inverted_extent() {
    let result = BoundingBox::from_wms_string("100,0,50,10");
    assert!(matches!(result, Err(BboxParseError::InvalidExtent(_))));
}

// ============================================================================
// Query tests
// ============================================================================

#[test]
fn test_bbox_spans() {
    let bbox = malaysia();
    assert!((bbox.lat_span() - 6.7).abs() < 1e-9);
    assert!((bbox.lon_span() - 20.0).abs() < 1e-9);
}

#[test]
fn test_contains_edges_inclusive() {
    let bbox = BoundingBox::new(0.0, 1.0, 0.0, 1.0).unwrap();
    assert!(bbox.contains(&GeoPoint::new(0.0, 0.0)));
    assert!(bbox.contains(&GeoPoint::new(1.0, 1.0)));
    assert!(!bbox.strictly_contains(&GeoPoint::new(0.0, 0.5)));
    assert!(bbox.strictly_contains(&GeoPoint::new(0.5, 0.5)));
    assert!(!bbox.contains(&GeoPoint::new(1.5, 0.5)));
}
