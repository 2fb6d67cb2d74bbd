//! Flood-risk heat field.
//!
//! Every cell of the sample grid becomes one filled rectangle colored by the
//! interpolated risk at the cell center. Rectangles are grown by a small
//! overlap so anti-aliased edges of neighbours never leave hairline gaps.

use std::time::Instant;

use field_common::{HeatConfig, FieldResult, SampleGrid, ScalarObservation};
use interpolation::{scalar_idw, IdwParams};
use tracing::debug;

use crate::compositor::{LayerOutcome, SkipReason};
use crate::gradient::{risk_color, GradientTable};
use crate::projection::{Projection, Viewport};
use crate::target::RenderTarget;

/// Pixel placement of grid cells for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    pub origin_x: f32,
    pub origin_y: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub overlap: f32,
}

impl CellLayout {
    /// Project the grid's bbox corners and divide the span into cells.
    ///
    /// Returns `None` when the projected box has zero or negative width or
    /// height.
    pub fn from_projection(grid: &SampleGrid, projection: &dyn Projection, overlap: f32) -> Option<Self> {
        let top_left = projection.project(grid.bbox().north_west());
        let bottom_right = projection.project(grid.bbox().south_east());

        let span_x = bottom_right.x - top_left.x;
        let span_y = bottom_right.y - top_left.y;
        if !(span_x > 0.0 && span_y > 0.0) {
            return None;
        }

        Some(Self {
            origin_x: top_left.x,
            origin_y: top_left.y,
            cell_width: span_x / grid.cols() as f32,
            cell_height: span_y / grid.rows() as f32,
            overlap,
        })
    }

    /// `(x, y, width, height)` of one cell including the overlap.
    pub fn rect(&self, row: usize, col: usize) -> (f32, f32, f32, f32) {
        (
            self.origin_x + col as f32 * self.cell_width,
            self.origin_y + row as f32 * self.cell_height,
            self.cell_width + self.overlap,
            self.cell_height + self.overlap,
        )
    }
}

/// Heat layer state derived from configuration.
#[derive(Debug, Clone)]
pub struct HeatLayer {
    grid: SampleGrid,
    params: IdwParams,
    table: GradientTable,
    seam_overlap_px: f32,
}

impl HeatLayer {
    pub fn new(config: &HeatConfig, exact_match_threshold: f64) -> FieldResult<Self> {
        Ok(Self {
            grid: config.grid()?,
            params: IdwParams::new(config.power, exact_match_threshold),
            table: GradientTable::risk(),
            seam_overlap_px: config.seam_overlap_px,
        })
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Draw one rectangle per cell. An empty observation set still yields a
    /// uniform field at risk 0.
    pub fn render(
        &self,
        target: &mut dyn RenderTarget,
        projection: &dyn Projection,
        viewport: Viewport,
        observations: &[ScalarObservation],
    ) -> LayerOutcome {
        if viewport.is_empty() {
            return LayerOutcome::Skipped(SkipReason::DegenerateViewport);
        }
        let Some(layout) = CellLayout::from_projection(&self.grid, projection, self.seam_overlap_px) else {
            debug!(layer = "heat", "Projected bbox is degenerate; skipping frame");
            return LayerOutcome::Skipped(SkipReason::DegenerateViewport);
        };

        let start = Instant::now();
        let mut drawn = 0;
        for cell in self.grid.cells() {
            let risk = scalar_idw(observations, cell.center, &self.params);
            let (x, y, w, h) = layout.rect(cell.row, cell.col);
            target.fill_rect(x, y, w, h, risk_color(&self.table, risk));
            drawn += 1;
        }

        debug!(
            layer = "heat",
            cells = drawn,
            observations = observations.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Rendered heat field"
        );
        LayerOutcome::Drawn { primitives: drawn }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ScreenPoint;
    use field_common::{BoundingBox, GeoPoint};

    fn grid() -> SampleGrid {
        SampleGrid::new(2, 4, BoundingBox::new(0.0, 2.0, 100.0, 104.0).unwrap()).unwrap()
    }

    #[test]
    fn test_layout_divides_span() {
        let proj = |p: GeoPoint| ScreenPoint::new(((p.lon - 100.0) * 100.0) as f32, ((2.0 - p.lat) * 50.0) as f32);
        let layout = CellLayout::from_projection(&grid(), &proj, 1.0).unwrap();
        assert_eq!(layout.cell_width, 100.0);
        assert_eq!(layout.cell_height, 50.0);
        assert_eq!(layout.rect(1, 2), (200.0, 50.0, 101.0, 51.0));
    }

    #[test]
    fn test_layout_degenerate() {
        let flat = |_: GeoPoint| ScreenPoint::new(10.0, 10.0);
        assert!(CellLayout::from_projection(&grid(), &flat, 1.0).is_none());

        // Mirrored projection gives a negative span
        let mirrored = |p: GeoPoint| ScreenPoint::new(-(p.lon as f32), p.lat as f32);
        assert!(CellLayout::from_projection(&grid(), &mirrored, 1.0).is_none());
    }
}
