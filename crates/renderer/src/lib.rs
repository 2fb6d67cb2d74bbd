//! Rendering of interpolated risk and wind fields.
//!
//! Layers emit primitives through the [`target::RenderTarget`] trait so the
//! same frame can be recorded as a command list or rasterized:
//! - Flood-risk heat field (filled cells)
//! - Wind arrow field
//! - Station markers
//! - Title banner and gradient legend

pub mod arrows;
pub mod compositor;
pub mod font;
pub mod gradient;
pub mod heatmap;
pub mod legend;
pub mod markers;
pub mod png;
pub mod projection;
pub mod raster;
pub mod target;

pub use compositor::{FrameReport, LayerOutcome, OverlayCompositor, SkipReason};
pub use gradient::{color_for, Color, GradientError, GradientStop, GradientTable};
pub use projection::{EquirectangularView, Projection, ScreenPoint, Viewport};
pub use raster::RasterTarget;
pub use target::{CommandRecorder, DrawCommand, RenderTarget, TextAnchor};

use thiserror::Error;

/// Errors from the raster backend and image encoding.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    #[error("Command serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
