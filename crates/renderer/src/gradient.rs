//! Piecewise-linear color gradients for the risk and wind fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Alpha of the risk heat cells; translucent so the base map shows through.
pub const RISK_ALPHA: u8 = 130;

/// Alpha of wind arrows.
pub const WIND_ALPHA: u8 = 220;

/// Speed (m/s) at which the wind gradient saturates.
pub const WIND_MAX_SPEED: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}

/// One color stop at a normalized position in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub threshold: f64,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(threshold: f64, color: Color) -> Self {
        Self { threshold, color }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradientError {
    #[error("Gradient needs at least 2 stops, got {0}")]
    TooFewStops(usize),

    #[error("Gradient must start at 0.0, starts at {0}")]
    BadStart(f64),

    #[error("Gradient must end at 1.0, ends at {0}")]
    BadEnd(f64),

    #[error("Gradient stop {index} at {threshold} does not increase")]
    NotIncreasing { index: usize, threshold: f64 },
}

/// Ordered color stops covering `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientTable {
    stops: Vec<GradientStop>,
}

impl GradientTable {
    /// Validate and build a table. Stops must start at 0, end at 1 and be
    /// strictly increasing.
    pub fn new(stops: Vec<GradientStop>) -> Result<Self, GradientError> {
        if stops.len() < 2 {
            return Err(GradientError::TooFewStops(stops.len()));
        }
        let first = stops[0].threshold;
        if first != 0.0 {
            return Err(GradientError::BadStart(first));
        }
        let last = stops[stops.len() - 1].threshold;
        if last != 1.0 {
            return Err(GradientError::BadEnd(last));
        }
        for (index, pair) in stops.windows(2).enumerate() {
            if !(pair[1].threshold > pair[0].threshold) {
                return Err(GradientError::NotIncreasing {
                    index: index + 1,
                    threshold: pair[1].threshold,
                });
            }
        }
        Ok(Self { stops })
    }

    /// Flood-risk ramp: blue, cyan-blue, green, yellow, orange, red.
    pub fn risk() -> Self {
        Self {
            stops: vec![
                GradientStop::new(0.0, Color::new(0, 0, 255, RISK_ALPHA)),
                GradientStop::new(0.2, Color::new(0, 100, 200, RISK_ALPHA)),
                GradientStop::new(0.4, Color::new(0, 255, 0, RISK_ALPHA)),
                GradientStop::new(0.6, Color::new(255, 255, 0, RISK_ALPHA)),
                GradientStop::new(0.8, Color::new(255, 125, 0, RISK_ALPHA)),
                GradientStop::new(1.0, Color::new(255, 0, 0, RISK_ALPHA)),
            ],
        }
    }

    /// Wind-speed ramp: green, yellow, orange, red, purple.
    pub fn wind() -> Self {
        Self {
            stops: vec![
                GradientStop::new(0.0, Color::new(0, 180, 50, WIND_ALPHA)),
                GradientStop::new(0.25, Color::new(100, 255, 0, WIND_ALPHA)),
                GradientStop::new(0.5, Color::new(255, 155, 0, WIND_ALPHA)),
                GradientStop::new(0.75, Color::new(255, 0, 0, WIND_ALPHA)),
                GradientStop::new(1.0, Color::new(200, 0, 180, WIND_ALPHA)),
            ],
        }
    }

    /// Copy of this table with every stop set to `alpha`.
    pub fn with_alpha(&self, alpha: u8) -> Self {
        Self {
            stops: self
                .stops
                .iter()
                .map(|s| GradientStop::new(s.threshold, s.color.with_alpha(alpha)))
                .collect(),
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }
}

/// Map `t` to a color by linear interpolation between the surrounding stops.
///
/// `t` is clamped to `[0, 1]` (NaN maps to 0). Channels are truncated toward
/// zero.
pub fn color_for(t: f64, table: &GradientTable) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let stops = &table.stops;

    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.threshold {
            let s = (t - lo.threshold) / (hi.threshold - lo.threshold);
            return interpolate_color(lo.color, hi.color, s);
        }
    }
    stops[stops.len() - 1].color
}

/// Color for a flood-risk score in `[0, 100]`.
pub fn risk_color(table: &GradientTable, risk: f64) -> Color {
    color_for(risk.clamp(0.0, 100.0) / 100.0, table)
}

/// Color for a wind speed, saturating at `max_speed`.
pub fn wind_color(table: &GradientTable, speed: f64, max_speed: f64) -> Color {
    color_for(speed.max(0.0).min(max_speed) / max_speed, table)
}

fn interpolate_color(color1: Color, color2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t) as u8;

    Color::new(
        lerp(color1.r, color2.r),
        lerp(color1.g, color2.g),
        lerp(color1.b, color2.b),
        lerp(color1.a, color2.a),
    )
}
