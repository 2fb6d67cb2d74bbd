//! Geographic to screen coordinate mapping.
//!
//! The host owns the real map projection; the renderer only needs a way to
//! turn a [`GeoPoint`] into pixels and the size of the drawing surface.

use field_common::{BoundingBox, GeoPoint};
use serde::{Deserialize, Serialize};

/// Position in screen pixels, origin top-left, y down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point `distance` pixels away along a compass bearing (0 = up, clockwise).
    pub fn offset_along(&self, bearing_rad: f64, distance: f32) -> ScreenPoint {
        ScreenPoint::new(
            self.x + (bearing_rad.sin() as f32) * distance,
            self.y - (bearing_rad.cos() as f32) * distance,
        )
    }
}

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Whether `point` lies within the viewport grown by `margin` on each side.
    pub fn contains_with_margin(&self, point: ScreenPoint, margin: f32) -> bool {
        point.x >= -margin
            && point.x <= self.width + margin
            && point.y >= -margin
            && point.y <= self.height + margin
    }
}

/// Geographic to screen mapping supplied by the host map.
pub trait Projection {
    fn project(&self, point: GeoPoint) -> ScreenPoint;
}

impl<F> Projection for F
where
    F: Fn(GeoPoint) -> ScreenPoint,
{
    fn project(&self, point: GeoPoint) -> ScreenPoint {
        self(point)
    }
}

/// Equirectangular mapping of a bounding box onto a viewport.
///
/// Longitude maps linearly to x and latitude to y with north up. Adequate at
/// country scale near the equator; used by the CLI and tests in place of a
/// real map widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquirectangularView {
    pub bbox: BoundingBox,
    pub viewport: Viewport,
}

impl EquirectangularView {
    pub fn new(bbox: BoundingBox, viewport: Viewport) -> Self {
        Self { bbox, viewport }
    }

    /// Inverse mapping from pixels back to coordinates.
    pub fn unproject(&self, point: ScreenPoint) -> GeoPoint {
        let lon = self.bbox.lon_min + (point.x as f64 / self.viewport.width as f64) * self.bbox.lon_span();
        let lat = self.bbox.lat_max - (point.y as f64 / self.viewport.height as f64) * self.bbox.lat_span();
        GeoPoint::new(lat, lon)
    }
}

impl Projection for EquirectangularView {
    fn project(&self, point: GeoPoint) -> ScreenPoint {
        let x = (point.lon - self.bbox.lon_min) / self.bbox.lon_span() * self.viewport.width as f64;
        let y = (self.bbox.lat_max - point.lat) / self.bbox.lat_span() * self.viewport.height as f64;
        ScreenPoint::new(x as f32, y as f32)
    }
}
