//! Title banner and flood-risk legend bar.
//!
//! Layout is anchored to the viewport edges, so the legend does not depend on
//! the projection or on observation data.

use field_common::LegendConfig;

use crate::compositor::{LayerOutcome, SkipReason};
use crate::font;
use crate::gradient::{color_for, Color, GradientTable};
use crate::projection::{ScreenPoint, Viewport};
use crate::target::{RenderTarget, TextAnchor};

const PANEL_COLOR: Color = Color::new(10, 25, 41, 160);
const BORDER_COLOR: Color = Color::new(255, 255, 255, 100);
const BORDER_WIDTH: f32 = 1.5;
const ACCENT_COLOR: Color = Color::rgb(0, 229, 255);

const TITLE_MARGIN_RIGHT: f32 = 30.0;
const TITLE_BASELINE: f32 = 60.0;
const TITLE_SIZE: f32 = 42.0;
const SUBTITLE_SIZE: f32 = 28.0;
const SUBTITLE_GAP: f32 = 28.0;
const TITLE_PANEL_PADDING: f32 = 10.0;
const TITLE_PANEL_HEIGHT: f32 = 80.0;

const BAR_FRACTION: f32 = 0.7;
const BAR_BOTTOM_MARGIN: f32 = 80.0;
const BAR_SLICES: usize = 100;
const SCALE_TITLE_SIZE: f32 = 20.0;
const TICK_LABEL_SIZE: f32 = 22.0;

/// Legend bar placement for a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BarLayout {
    pub fn new(viewport: Viewport, config: &LegendConfig) -> Self {
        let width = (viewport.width * BAR_FRACTION).min(config.max_bar_width);
        Self {
            x: (viewport.width - width) / 2.0,
            y: viewport.height - BAR_BOTTOM_MARGIN,
            width,
            height: config.bar_height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LegendLayer {
    config: LegendConfig,
    table: GradientTable,
}

impl LegendLayer {
    pub fn new(config: &LegendConfig) -> Self {
        Self {
            config: config.clone(),
            table: GradientTable::risk().with_alpha(255),
        }
    }

    pub fn render(&self, target: &mut dyn RenderTarget, viewport: Viewport) -> LayerOutcome {
        if viewport.is_empty() {
            return LayerOutcome::Skipped(SkipReason::DegenerateViewport);
        }
        let mut primitives = self.draw_title(target, viewport);
        primitives += self.draw_bar(target, viewport);
        LayerOutcome::Drawn { primitives }
    }

    fn draw_title(&self, target: &mut dyn RenderTarget, viewport: Viewport) -> usize {
        let x = viewport.width - TITLE_MARGIN_RIGHT;
        let y = TITLE_BASELINE;

        let text_width = font::text_width(&self.config.region_name, TITLE_SIZE)
            .max(font::text_width(&self.config.title, SUBTITLE_SIZE));
        let panel_width = text_width + 2.0 * TITLE_PANEL_PADDING;
        target.fill_rect(
            x + TITLE_PANEL_PADDING - panel_width,
            y - 50.0,
            panel_width,
            TITLE_PANEL_HEIGHT,
            PANEL_COLOR,
        );
        target.draw_text(
            &self.config.region_name,
            ScreenPoint::new(x, y),
            TITLE_SIZE,
            Color::WHITE,
            TextAnchor::End,
        );
        target.draw_text(
            &self.config.title,
            ScreenPoint::new(x, y + SUBTITLE_GAP),
            SUBTITLE_SIZE,
            ACCENT_COLOR,
            TextAnchor::End,
        );
        3
    }

    fn draw_bar(&self, target: &mut dyn RenderTarget, viewport: Viewport) -> usize {
        let bar = BarLayout::new(viewport, &self.config);

        // Panel and border
        let (left, top) = (bar.x - 20.0, bar.y - 35.0);
        let (right, bottom) = (bar.x + bar.width + 20.0, bar.y + bar.height + 35.0);
        target.fill_rect(left, top, right - left, bottom - top, PANEL_COLOR);
        let corners = [
            ScreenPoint::new(left, top),
            ScreenPoint::new(right, top),
            ScreenPoint::new(right, bottom),
            ScreenPoint::new(left, bottom),
        ];
        for i in 0..corners.len() {
            target.draw_line(corners[i], corners[(i + 1) % corners.len()], BORDER_WIDTH, BORDER_COLOR);
        }

        target.draw_text(
            &self.config.scale_title,
            ScreenPoint::new(bar.x + bar.width / 2.0, bar.y - 12.0),
            SCALE_TITLE_SIZE,
            Color::WHITE,
            TextAnchor::Middle,
        );

        let slice = bar.width / BAR_SLICES as f32;
        for i in 0..BAR_SLICES {
            let t = (i as f64 + 0.5) / BAR_SLICES as f64;
            let x = bar.x + i as f32 * slice;
            // Slices overlap by a pixel except the last, which ends on the bar edge
            let w = if i + 1 < BAR_SLICES { slice + 1.0 } else { slice };
            target.fill_rect(x, bar.y, w, bar.height, color_for(t, &self.table));
        }

        let ticks = self.config.tick_count;
        for i in 0..=ticks {
            let value = 100 * i / ticks;
            let x = bar.x + bar.width * i as f32 / ticks as f32;
            target.draw_text(
                &value.to_string(),
                ScreenPoint::new(x, bar.y + bar.height + 22.0),
                TICK_LABEL_SIZE,
                Color::WHITE,
                TextAnchor::Middle,
            );
        }

        2 + corners.len() + BAR_SLICES + ticks + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_capped() {
        let bar = BarLayout::new(Viewport::new(1200.0, 800.0), &LegendConfig::default());
        assert_eq!(bar.width, 500.0);
        assert_eq!(bar.x, 350.0);
        assert_eq!(bar.y, 720.0);
    }

    #[test]
    fn test_bar_width_narrow_viewport() {
        let bar = BarLayout::new(Viewport::new(400.0, 300.0), &LegendConfig::default());
        assert!((bar.width - 280.0).abs() < 1e-4);
        assert!((bar.x - 60.0).abs() < 1e-4);
    }
}
