//! tiny-skia backend for [`RenderTarget`].

use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::font;
use crate::gradient::Color;
use crate::png::encode_png;
use crate::projection::{ScreenPoint, Viewport};
use crate::target::{RenderTarget, TextAnchor};
use crate::{RenderError, RenderResult};

/// Draws primitives into an RGBA pixmap.
pub struct RasterTarget {
    pixmap: Pixmap,
}

impl RasterTarget {
    /// Transparent canvas of the given size.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidCanvas { width, height })?;
        Ok(Self { pixmap })
    }

    /// Canvas pre-filled with `background`.
    pub fn with_background(width: u32, height: u32, background: Color) -> RenderResult<Self> {
        let mut target = Self::new(width, height)?;
        target.pixmap.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            background.a,
        ));
        Ok(target)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width() as f32, self.height() as f32)
    }

    /// Straight-alpha color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Color::new(c.red(), c.green(), c.blue(), c.alpha())
        })
    }

    /// Straight-alpha RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixmap.pixels().len() * 4);
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        data
    }

    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        encode_png(&self.to_rgba(), self.width() as usize, self.height() as usize)
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

impl RenderTarget for RasterTarget {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        if let Some(rect) = Rect::from_xywh(x, y, width, height) {
            let mut paint = paint_for(color);
            // Axis-aligned cells tile cleanly without AA
            paint.anti_alias = false;
            self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, width: f32, color: Color) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);

        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        if let Some(path) = pb.finish() {
            self.pixmap
                .stroke_path(&path, &paint_for(color), &stroke, Transform::identity(), None);
        }
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(first.x, first.y);
        for point in rest {
            pb.line_to(point.x, point.y);
        }
        pb.close();

        if let Some(path) = pb.finish() {
            self.pixmap.fill_path(
                &path,
                &paint_for(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn draw_text(&mut self, text: &str, at: ScreenPoint, size: f32, color: Color, anchor: TextAnchor) {
        let paint = paint_for(color);
        for (x, y, w, h) in font::layout(text, at, size, anchor) {
            if let Some(rect) = Rect::from_xywh(x, y, w, h) {
                self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
    }
}
