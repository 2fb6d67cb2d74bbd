//! Layer stacking and per-frame rendering.
//!
//! The compositor owns one instance of every layer and an ordered stack of
//! `(kind, enabled)` entries. Disabling a layer removes it from the draw list
//! but keeps its configuration, so toggling it back on is free. Nothing is
//! cached between frames: every `render` call samples, interpolates and
//! emits from scratch against the snapshot it is given.

use std::time::Instant;

use field_common::{EngineConfig, FieldResult, LayerKind, LayerSetting};
use interpolation::ObservationSnapshot;
use serde::Serialize;
use tracing::debug;

use crate::arrows::WindLayer;
use crate::heatmap::{CellLayout, HeatLayer};
use crate::legend::LegendLayer;
use crate::markers::MarkerLayer;
use crate::projection::{Projection, Viewport};
use crate::target::RenderTarget;

/// Why a layer produced nothing this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The viewport or the projected layer extent has no area
    DegenerateViewport,
}

/// Result of rendering one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerOutcome {
    Drawn { primitives: usize },
    Skipped(SkipReason),
}

impl LayerOutcome {
    pub fn is_drawn(&self) -> bool {
        matches!(self, LayerOutcome::Drawn { .. })
    }
}

/// Summary of one rendered frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    /// Generation of the snapshot the frame was drawn from
    pub generation: u64,
    /// Active layers in draw order
    pub layers: Vec<(LayerKind, LayerOutcome)>,
    pub elapsed_ms: f64,
}

impl FrameReport {
    pub fn outcome(&self, kind: LayerKind) -> Option<LayerOutcome> {
        self.layers.iter().find(|(k, _)| *k == kind).map(|(_, o)| *o)
    }
}

/// Ordered, toggleable set of overlay layers.
#[derive(Debug, Clone)]
pub struct OverlayCompositor {
    stack: Vec<LayerSetting>,
    heat: HeatLayer,
    wind: WindLayer,
    markers: MarkerLayer,
    legend: LegendLayer,
}

impl OverlayCompositor {
    /// Build every layer from configuration.
    pub fn new(config: &EngineConfig) -> FieldResult<Self> {
        config.validate()?;
        let threshold = config.exact_match_threshold_deg;
        Ok(Self {
            stack: config.layer_stack(),
            heat: HeatLayer::new(&config.heat, threshold)?,
            wind: WindLayer::new(&config.wind, threshold)?,
            markers: MarkerLayer::new(&config.markers),
            legend: LegendLayer::new(&config.legend),
        })
    }

    /// Full stack, bottom to top, including disabled layers.
    pub fn stack(&self) -> &[LayerSetting] {
        &self.stack
    }

    pub fn is_enabled(&self, kind: LayerKind) -> bool {
        self.stack.iter().any(|s| s.kind == kind && s.enabled)
    }

    pub fn set_enabled(&mut self, kind: LayerKind, enabled: bool) {
        if let Some(setting) = self.stack.iter_mut().find(|s| s.kind == kind) {
            setting.enabled = enabled;
        }
    }

    /// Flip a layer's visibility and return the new state.
    pub fn toggle(&mut self, kind: LayerKind) -> bool {
        let enabled = !self.is_enabled(kind);
        self.set_enabled(kind, enabled);
        debug!(layer = %kind, enabled = enabled, "Toggled layer");
        enabled
    }

    /// Enabled layers in draw order.
    pub fn active_layers(&self) -> Vec<LayerKind> {
        self.stack.iter().filter(|s| s.enabled).map(|s| s.kind).collect()
    }

    /// True when the viewport has no area or either field grid projects to
    /// a box with no area. Such a frame draws nothing at all.
    pub fn is_degenerate(&self, projection: &dyn Projection, viewport: Viewport) -> bool {
        viewport.is_empty()
            || CellLayout::from_projection(self.heat.grid(), projection, 0.0).is_none()
            || CellLayout::from_projection(self.wind.grid(), projection, 0.0).is_none()
    }

    /// Draw every active layer, bottom to top. A degenerate frame emits
    /// nothing and reports every active layer as skipped.
    pub fn render(
        &self,
        target: &mut dyn RenderTarget,
        projection: &dyn Projection,
        viewport: Viewport,
        snapshot: &ObservationSnapshot,
    ) -> FrameReport {
        let start = Instant::now();
        let layers: Vec<_> = if self.is_degenerate(projection, viewport) {
            debug!(
                width = viewport.width,
                height = viewport.height,
                "Degenerate viewport or projection; skipping frame"
            );
            self.active_layers()
                .into_iter()
                .map(|kind| (kind, LayerOutcome::Skipped(SkipReason::DegenerateViewport)))
                .collect()
        } else {
            self.active_layers()
                .into_iter()
                .map(|kind| (kind, self.render_layer(kind, target, projection, viewport, snapshot)))
                .collect()
        };

        let report = FrameReport {
            generation: snapshot.generation,
            layers,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        debug!(
            generation = report.generation,
            layers = report.layers.len(),
            elapsed_ms = report.elapsed_ms,
            "Rendered frame"
        );
        report
    }

    /// Draw a single layer regardless of its enabled flag.
    pub fn render_layer(
        &self,
        kind: LayerKind,
        target: &mut dyn RenderTarget,
        projection: &dyn Projection,
        viewport: Viewport,
        snapshot: &ObservationSnapshot,
    ) -> LayerOutcome {
        let outcome = match kind {
            LayerKind::Heat => self.heat.render(target, projection, viewport, &snapshot.scalars),
            LayerKind::Wind => self.wind.render(target, projection, viewport, &snapshot.vectors),
            LayerKind::Markers => self.markers.render(target, projection, viewport, &snapshot.stations),
            LayerKind::Legend => self.legend.render(target, viewport),
        };
        if let LayerOutcome::Skipped(reason) = outcome {
            debug!(layer = %kind, reason = ?reason, "Layer skipped");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stack_order() {
        let compositor = OverlayCompositor::new(&EngineConfig::default()).unwrap();
        assert_eq!(
            compositor.active_layers(),
            vec![LayerKind::Heat, LayerKind::Wind, LayerKind::Markers, LayerKind::Legend]
        );
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut compositor = OverlayCompositor::new(&EngineConfig::default()).unwrap();
        assert!(!compositor.toggle(LayerKind::Wind));
        assert_eq!(
            compositor.active_layers(),
            vec![LayerKind::Heat, LayerKind::Markers, LayerKind::Legend]
        );
        assert!(compositor.toggle(LayerKind::Wind));
        assert_eq!(compositor.active_layers()[1], LayerKind::Wind);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.heat.rows = 0;
        assert!(OverlayCompositor::new(&config).is_err());
    }
}
