//! Subcommand implementations and the pieces they share.

pub mod render;
pub mod sample;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use field_common::{BoundingBox, EngineConfig, LayerKind};
use interpolation::ObservationSnapshot;
use renderer::target::replay;
use renderer::{
    Color, CommandRecorder, EquirectangularView, FrameReport, OverlayCompositor, RasterTarget,
    Viewport,
};
use tracing::{info, warn};

/// Backdrop for PNG frames, matching the legend panel tint.
const BACKGROUND: Color = Color::rgb(10, 25, 41);

/// Layer visibility overrides applied on top of the configured stack.
#[derive(Args, Debug, Clone, Default)]
pub struct LayerArgs {
    /// Draw only these layers (comma separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "hide")]
    pub only: Vec<LayerKind>,

    /// Hide these layers (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub hide: Vec<LayerKind>,
}

/// Size and extent of the rendered frame.
#[derive(Args, Debug, Clone)]
pub struct FrameArgs {
    /// Frame width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 400)]
    pub height: u32,

    /// Visible extent as "lon_min,lat_min,lon_max,lat_max"; defaults to the heat field extent
    #[arg(long)]
    pub bbox: Option<String>,
}

impl FrameArgs {
    pub fn view(&self, config: &EngineConfig) -> Result<EquirectangularView> {
        let bbox = match &self.bbox {
            Some(s) => BoundingBox::from_wms_string(s).with_context(|| format!("Invalid --bbox '{}'", s))?,
            None => config.heat.bbox,
        };
        Ok(EquirectangularView::new(
            bbox,
            Viewport::new(self.width as f32, self.height as f32),
        ))
    }
}

/// Compositor with the command-line layer overrides applied.
pub fn build_compositor(config: &EngineConfig, layers: &LayerArgs) -> Result<OverlayCompositor> {
    let mut compositor = OverlayCompositor::new(config).context("Invalid engine configuration")?;

    if !layers.only.is_empty() {
        for kind in LayerKind::ALL {
            compositor.set_enabled(kind, layers.only.contains(&kind));
        }
    }
    for kind in &layers.hide {
        compositor.set_enabled(*kind, false);
    }
    Ok(compositor)
}

/// Render one frame, writing the PNG and/or command list when paths are given.
pub fn render_frame(
    compositor: &OverlayCompositor,
    snapshot: &ObservationSnapshot,
    view: &EquirectangularView,
    png_path: Option<&Path>,
    commands_path: Option<&Path>,
) -> Result<FrameReport> {
    let mut recorder = CommandRecorder::new();
    let report = compositor.render(&mut recorder, view, view.viewport, snapshot);

    if let Some(path) = commands_path {
        let json = recorder.to_json().context("Failed to serialize draw commands")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), commands = recorder.len(), "Wrote draw commands");
    }

    if let Some(path) = png_path {
        let mut raster = RasterTarget::with_background(
            view.viewport.width as u32,
            view.viewport.height as u32,
            BACKGROUND,
        )?;
        replay(recorder.commands(), &mut raster);
        let png = raster.encode_png()?;
        std::fs::write(path, &png).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), bytes = png.len(), "Wrote PNG frame");
    }

    Ok(report)
}

/// Summarize a freshly built snapshot.
pub fn log_snapshot(snapshot: &ObservationSnapshot) {
    match snapshot.riskiest_station() {
        Some(station) => info!(
            stations = snapshot.stations.len(),
            refreshed_at = %snapshot.refreshed_at,
            riskiest = %station.name,
            risk_score = station.risk_score,
            "Observations ready"
        ),
        None => warn!(refreshed_at = %snapshot.refreshed_at, "No valid observations; fields render at zero"),
    }
}

/// `dir/frame-00042.png`
pub fn frame_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("frame-{:05}.png", index))
}
