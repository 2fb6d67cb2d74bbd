//! Wind arrow geometry and the interpolated wind field layer.
//!
//! Arrows point downwind (bearing + 180°). Shaft length, head size and
//! stroke width grow with speed up to configured caps.

use std::time::Instant;

use field_common::{FieldResult, SampleGrid, VectorObservation, WindConfig};
use interpolation::{vector_idw, IdwParams};
use tracing::debug;

use crate::compositor::{LayerOutcome, SkipReason};
use crate::gradient::{wind_color, Color, GradientTable};
use crate::heatmap::CellLayout;
use crate::projection::{Projection, ScreenPoint, Viewport};
use crate::target::RenderTarget;

/// Angle between the shaft and each side of the arrowhead.
const HEAD_ANGLE_DEG: f64 = 150.0;

/// Speed-dependent arrow sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    pub base_len: f32,
    pub len_per_speed: f32,
    pub max_len: f32,
    pub base_head: f32,
    pub head_per_speed: f32,
    pub max_head: f32,
    pub base_stroke: f32,
    pub stroke_per_speed: f32,
}

impl ArrowStyle {
    /// Field arrows: head grows by 1px per 5 m/s, stroke by 1px per 15 m/s.
    pub fn from_config(config: &WindConfig) -> Self {
        Self {
            base_len: config.base_arrow_len,
            len_per_speed: config.arrow_len_per_speed,
            max_len: config.max_arrow_len,
            base_head: config.base_head_size,
            head_per_speed: 1.0 / 5.0,
            max_head: config.max_head_size,
            base_stroke: config.base_stroke_width,
            stroke_per_speed: 1.0 / 15.0,
        }
    }

    /// Fixed head and stroke, uncapped length.
    pub fn fixed(base_len: f32, len_per_speed: f32, head: f32, stroke: f32) -> Self {
        Self {
            base_len,
            len_per_speed,
            max_len: f32::INFINITY,
            base_head: head,
            head_per_speed: 0.0,
            max_head: head,
            base_stroke: stroke,
            stroke_per_speed: 0.0,
        }
    }

    pub fn length(&self, speed: f64) -> f32 {
        (self.base_len + speed as f32 * self.len_per_speed).min(self.max_len)
    }

    pub fn head_size(&self, speed: f64) -> f32 {
        (self.base_head + speed as f32 * self.head_per_speed).min(self.max_head)
    }

    pub fn stroke_width(&self, speed: f64) -> f32 {
        self.base_stroke + speed as f32 * self.stroke_per_speed
    }
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self::from_config(&WindConfig::default())
    }
}

/// Screen-space arrow ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGeometry {
    pub tail: ScreenPoint,
    pub tip: ScreenPoint,
    /// Tip plus the two back corners of the head
    pub head: [ScreenPoint; 3],
    pub stroke_width: f32,
}

impl ArrowGeometry {
    /// Arrow anchored at `anchor` for wind blowing from `bearing_deg`.
    pub fn new(anchor: ScreenPoint, speed: f64, bearing_deg: f64, style: &ArrowStyle) -> Self {
        let rad = (bearing_deg + 180.0).to_radians();
        let tip = anchor.offset_along(rad, style.length(speed));

        let head_size = style.head_size(speed);
        let spread = HEAD_ANGLE_DEG.to_radians();
        let left = tip.offset_along(rad + spread, head_size);
        let right = tip.offset_along(rad - spread, head_size);

        Self {
            tail: anchor,
            tip,
            head: [tip, left, right],
            stroke_width: style.stroke_width(speed),
        }
    }

    pub fn draw(&self, target: &mut dyn RenderTarget, color: Color) {
        target.draw_line(self.tail, self.tip, self.stroke_width, color);
        target.fill_polygon(&self.head, color);
    }
}

/// Wind layer state derived from configuration.
#[derive(Debug, Clone)]
pub struct WindLayer {
    grid: SampleGrid,
    params: IdwParams,
    table: GradientTable,
    style: ArrowStyle,
    max_speed: f64,
    cull_margin_px: f32,
}

impl WindLayer {
    pub fn new(config: &WindConfig, exact_match_threshold: f64) -> FieldResult<Self> {
        Ok(Self {
            grid: config.grid()?,
            params: IdwParams::new(config.power, exact_match_threshold),
            table: GradientTable::wind(),
            style: ArrowStyle::from_config(config),
            max_speed: config.max_speed,
            cull_margin_px: config.cull_margin_px,
        })
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Draw one arrow per grid cell whose anchor is near the viewport.
    pub fn render(
        &self,
        target: &mut dyn RenderTarget,
        projection: &dyn Projection,
        viewport: Viewport,
        observations: &[VectorObservation],
    ) -> LayerOutcome {
        if viewport.is_empty() || CellLayout::from_projection(&self.grid, projection, 0.0).is_none() {
            debug!(layer = "wind", "Viewport or projected bbox is degenerate; skipping frame");
            return LayerOutcome::Skipped(SkipReason::DegenerateViewport);
        }

        let start = Instant::now();
        let mut drawn = 0;
        let mut culled = 0;
        for cell in self.grid.cells() {
            let anchor = projection.project(cell.center);
            if !viewport.contains_with_margin(anchor, self.cull_margin_px) {
                culled += 1;
                continue;
            }

            let wind = vector_idw(observations, cell.center, &self.params);
            // Resultant magnitude: arrows shrink where neighbouring bearings disagree
            let color = wind_color(&self.table, wind.magnitude, self.max_speed);
            ArrowGeometry::new(anchor, wind.magnitude, wind.bearing, &self.style).draw(target, color);
            drawn += 1;
        }

        debug!(
            layer = "wind",
            arrows = drawn,
            culled = culled,
            observations = observations.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Rendered wind field"
        );
        // Each arrow is a shaft plus a head
        LayerOutcome::Drawn { primitives: drawn * 2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_wind_points_down() {
        let arrow = ArrowGeometry::new(ScreenPoint::new(100.0, 100.0), 0.0, 0.0, &ArrowStyle::default());
        assert!((arrow.tip.x - 100.0).abs() < 1e-4);
        assert!((arrow.tip.y - 112.0).abs() < 1e-4);
    }

    #[test]
    fn test_west_wind_points_east() {
        let arrow = ArrowGeometry::new(ScreenPoint::new(0.0, 0.0), 10.0, 270.0, &ArrowStyle::default());
        // 12 + 1.8 * 10
        assert!((arrow.tip.x - 30.0).abs() < 1e-4);
        assert!(arrow.tip.y.abs() < 1e-4);
    }

    #[test]
    fn test_sizes_capped() {
        let style = ArrowStyle::default();
        assert_eq!(style.length(100.0), 55.0);
        assert_eq!(style.head_size(100.0), 14.0);
        assert!((style.stroke_width(15.0) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_head_sits_behind_tip() {
        let arrow = ArrowGeometry::new(ScreenPoint::new(0.0, 0.0), 5.0, 180.0, &ArrowStyle::default());
        // South wind blows north: tip above anchor, head corners below tip
        assert!(arrow.tip.y < 0.0);
        assert!(arrow.head[1].y > arrow.tip.y);
        assert!(arrow.head[2].y > arrow.tip.y);
        assert!(arrow.head[1].x * arrow.head[2].x < 0.0);
    }

    #[test]
    fn test_fixed_style() {
        let style = ArrowStyle::fixed(50.0, 2.5, 18.0, 4.0);
        assert_eq!(style.length(40.0), 150.0);
        assert_eq!(style.head_size(40.0), 18.0);
        assert_eq!(style.stroke_width(40.0), 4.0);
    }
}
