//! Raster text layout using the `font8x8` glyph set.
//!
//! Glyphs are 8×8 bitmaps, one byte per row with bit 0 as the leftmost
//! pixel. Row 7 is descender space and sits below the baseline. Characters
//! outside the basic Latin set still advance the cursor.

use font8x8::{UnicodeFonts, BASIC_FONTS};

use crate::projection::ScreenPoint;
use crate::target::TextAnchor;

pub const GLYPH_SIZE: usize = 8;

/// Rows above the baseline.
const ASCENT_ROWS: usize = 7;

/// Font pixels per em; a size-20 label gets 2px font pixels.
const UNITS_PER_EM: f32 = 10.0;

/// Filled rectangle in screen pixels: `(x, y, width, height)`.
pub type GlyphRect = (f32, f32, f32, f32);

/// Rows of the glyph for `ch`, if the font has one.
pub fn glyph(ch: char) -> Option<[u8; GLYPH_SIZE]> {
    BASIC_FONTS.get(ch)
}

/// Size of one font pixel for a text size.
pub fn pixel_size(size: f32) -> f32 {
    size / UNITS_PER_EM
}

/// Advance width of `text` at `size`.
pub fn text_width(text: &str, size: f32) -> f32 {
    (text.chars().count() * GLYPH_SIZE) as f32 * pixel_size(size)
}

/// Rectangles covering `text` with its baseline at `at`.
///
/// Adjacent lit pixels in a glyph row are merged into one rectangle.
pub fn layout(text: &str, at: ScreenPoint, size: f32, anchor: TextAnchor) -> Vec<GlyphRect> {
    let px = pixel_size(size);
    let width = text_width(text, size);
    let left = match anchor {
        TextAnchor::Start => at.x,
        TextAnchor::Middle => at.x - width / 2.0,
        TextAnchor::End => at.x - width,
    };
    let top = at.y - ASCENT_ROWS as f32 * px;

    let mut rects = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else {
            continue;
        };
        let glyph_x = left + (i * GLYPH_SIZE) as f32 * px;

        for (row, bits) in rows.iter().enumerate() {
            let lit = |col: usize| bits & (1 << col) != 0;
            let y = top + row as f32 * px;
            let mut col = 0;
            while col < GLYPH_SIZE {
                if !lit(col) {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < GLYPH_SIZE && lit(col) {
                    col += 1;
                }
                rects.push((
                    glyph_x + start as f32 * px,
                    y,
                    (col - start) as f32 * px,
                    px,
                ));
            }
        }
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_latin_covered() {
        for ch in "MALAYSIA Flood Risk Score [0-100] 12 m/s".chars() {
            assert!(glyph(ch).is_some(), "missing glyph for {:?}", ch);
        }
        assert!(glyph('\u{4e2d}').is_none());
    }

    #[test]
    fn test_width() {
        assert_eq!(text_width("", 20.0), 0.0);
        assert_eq!(text_width("10", 20.0), 32.0);
    }

    #[test]
    fn test_layout_merges_runs() {
        // '-' is one row of six lit pixels
        let rects = layout("-", ScreenPoint::new(0.0, 14.0), 20.0, TextAnchor::Start);
        assert_eq!(rects, vec![(0.0, 6.0, 12.0, 2.0)]);
    }

    #[test]
    fn test_layout_anchor_end() {
        let rects = layout("-", ScreenPoint::new(100.0, 14.0), 20.0, TextAnchor::End);
        assert_eq!(rects[0].0, 84.0);
    }

    #[test]
    fn test_digits_sit_above_baseline() {
        let rects = layout("8", ScreenPoint::new(0.0, 50.0), 20.0, TextAnchor::Middle);
        assert!(!rects.is_empty());
        assert!(rects.iter().all(|r| r.1 >= 36.0 && r.1 + r.3 <= 50.0));
    }

    #[test]
    fn test_unknown_glyph_still_advances() {
        let rects = layout("\u{4e2d}-", ScreenPoint::new(0.0, 14.0), 20.0, TextAnchor::Start);
        assert_eq!(rects[0].0, 16.0);
    }
}
