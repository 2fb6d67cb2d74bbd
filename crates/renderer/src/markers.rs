//! Station markers: a wind-level circle, a wind arrow and a speed label at
//! each reporting city.

use field_common::{GeoPoint, MarkerConfig, WindLevel};
use interpolation::Station;
use tracing::debug;

use crate::arrows::{ArrowGeometry, ArrowStyle};
use crate::compositor::{LayerOutcome, SkipReason};
use crate::gradient::Color;
use crate::projection::{Projection, ScreenPoint, Viewport};
use crate::target::{RenderTarget, TextAnchor};

/// Kilometres per degree of latitude.
const KM_PER_DEG_LAT: f64 = 111.32;

/// Vertical gap between the station and its speed label.
const LABEL_OFFSET_PX: f32 = 15.0;

/// Opaque color for a wind level.
pub fn wind_level_color(level: WindLevel) -> Color {
    match level {
        WindLevel::Storm => Color::rgb(244, 67, 54),
        WindLevel::Strong => Color::rgb(255, 152, 0),
        WindLevel::Moderate => Color::rgb(255, 235, 59),
        WindLevel::Light => Color::rgb(76, 175, 80),
    }
}

/// Translucent fill of the circle around a station.
pub fn circle_color(level: WindLevel) -> Color {
    let alpha = match level {
        WindLevel::Light => 60,
        _ => 80,
    };
    wind_level_color(level).with_alpha(alpha)
}

/// Vertices of a circle of `radius_km` around `center`.
///
/// Longitude radius is widened by `1 / cos(lat)` so the ring stays round on
/// the ground.
pub fn circle_points(center: GeoPoint, radius_km: f64, segments: usize) -> Vec<GeoPoint> {
    let lat_radius = radius_km / KM_PER_DEG_LAT;
    let lon_radius = lat_radius / center.lat.to_radians().cos().max(1e-6);

    (0..segments)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / segments as f64;
            GeoPoint::new(
                center.lat + lat_radius * angle.cos(),
                center.lon + lon_radius * angle.sin(),
            )
        })
        .collect()
}

/// Marker layer state derived from configuration.
#[derive(Debug, Clone)]
pub struct MarkerLayer {
    config: MarkerConfig,
    style: ArrowStyle,
}

impl MarkerLayer {
    pub fn new(config: &MarkerConfig) -> Self {
        Self {
            config: config.clone(),
            style: ArrowStyle::fixed(
                config.base_arrow_len,
                config.arrow_len_per_speed,
                config.head_size,
                config.stroke_width,
            ),
        }
    }

    pub fn render(
        &self,
        target: &mut dyn RenderTarget,
        projection: &dyn Projection,
        viewport: Viewport,
        stations: &[Station],
    ) -> LayerOutcome {
        if viewport.is_empty() {
            return LayerOutcome::Skipped(SkipReason::DegenerateViewport);
        }

        let mut primitives = 0;
        for station in stations {
            let ring: Vec<ScreenPoint> =
                circle_points(station.position, self.config.radius_km, self.config.circle_segments)
                    .into_iter()
                    .map(|p| projection.project(p))
                    .collect();
            target.fill_polygon(&ring, circle_color(station.wind_level));

            let anchor = projection.project(station.position);
            ArrowGeometry::new(anchor, station.wind_speed, station.wind_bearing, &self.style)
                .draw(target, wind_level_color(station.wind_level));

            target.draw_text(
                &format!("{:.0} m/s", station.wind_speed),
                ScreenPoint::new(anchor.x, anchor.y - LABEL_OFFSET_PX),
                self.config.label_size,
                Color::WHITE,
                TextAnchor::Middle,
            );
            primitives += 4;
        }

        debug!(layer = "markers", stations = stations.len(), "Rendered station markers");
        LayerOutcome::Drawn { primitives }
    }
}
