//! Tests for the heat, wind, marker and legend layers.

use field_common::{EngineConfig, GeoPoint, HeatConfig, LegendConfig, MarkerConfig, WindConfig};
use interpolation::ObservationSnapshot;
use renderer::arrows::WindLayer;
use renderer::heatmap::HeatLayer;
use renderer::legend::LegendLayer;
use renderer::markers::MarkerLayer;
use renderer::{
    Color, CommandRecorder, DrawCommand, EquirectangularView, LayerOutcome, ScreenPoint,
    SkipReason, Viewport,
};
use test_utils::{malaysia_demo_reports, malaysia_heat_bbox, unit_square_risks};

fn demo_view() -> EquirectangularView {
    EquirectangularView::new(malaysia_heat_bbox(), Viewport::new(1200.0, 400.0))
}

fn fill_rects(commands: &[DrawCommand]) -> Vec<(f32, f32, f32, f32, Color)> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => Some((*x, *y, *width, *height, *color)),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Heat layer
// ============================================================================

#[test]
fn test_heat_one_rect_per_cell() {
    let config = HeatConfig::default();
    let layer = HeatLayer::new(&config, 0.01).unwrap();
    let view = demo_view();
    let snapshot = ObservationSnapshot::from_reports(&malaysia_demo_reports());

    let mut rec = CommandRecorder::new();
    let outcome = layer.render(&mut rec, &view, view.viewport, &snapshot.scalars);

    assert_eq!(outcome, LayerOutcome::Drawn { primitives: 2400 });
    let rects = fill_rects(rec.commands());
    assert_eq!(rects.len(), 2400);

    // 1200px over 60 cols = 20px cells, plus 1px overlap
    assert!((rects[0].2 - 21.0).abs() < 1e-3);
    assert!((rects[0].3 - 11.0).abs() < 1e-3);
}

#[test]
fn test_heat_empty_observations_uniform() {
    let layer = HeatLayer::new(&HeatConfig::default(), 0.01).unwrap();
    let view = demo_view();
    let mut rec = CommandRecorder::new();
    layer.render(&mut rec, &view, view.viewport, &[]);

    let rects = fill_rects(rec.commands());
    assert_eq!(rects.len(), 2400);
    let first = rects[0].4;
    assert!(rects.iter().all(|r| r.4 == first));
    assert_eq!(first, Color::new(0, 0, 255, 130));
}

#[test]
fn test_heat_degenerate_projection_skipped() {
    let layer = HeatLayer::new(&HeatConfig::default(), 0.01).unwrap();
    let flat = |_: GeoPoint| ScreenPoint::new(5.0, 5.0);
    let mut rec = CommandRecorder::new();
    let outcome = layer.render(&mut rec, &flat, Viewport::new(100.0, 100.0), &unit_square_risks());

    assert_eq!(outcome, LayerOutcome::Skipped(SkipReason::DegenerateViewport));
    assert!(rec.is_empty());
}

#[test]
fn test_heat_zero_viewport_skipped() {
    let layer = HeatLayer::new(&HeatConfig::default(), 0.01).unwrap();
    let view = demo_view();
    let mut rec = CommandRecorder::new();
    let outcome = layer.render(&mut rec, &view, Viewport::new(0.0, 0.0), &[]);
    assert_eq!(outcome, LayerOutcome::Skipped(SkipReason::DegenerateViewport));
}

// ============================================================================
// Wind layer
// ============================================================================

#[test]
fn test_wind_arrow_per_cell() {
    let layer = WindLayer::new(&WindConfig::default(), 0.01).unwrap();
    let view = demo_view();
    let snapshot = ObservationSnapshot::from_reports(&malaysia_demo_reports());

    let mut rec = CommandRecorder::new();
    let outcome = layer.render(&mut rec, &view, view.viewport, &snapshot.vectors);

    assert_eq!(outcome, LayerOutcome::Drawn { primitives: 480 });
    let lines = rec
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { .. }))
        .count();
    let heads = rec
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillPolygon { points, .. } if points.len() == 3))
        .count();
    assert_eq!(lines, 240);
    assert_eq!(heads, 240);
}

#[test]
fn test_wind_culls_offscreen_anchors() {
    let layer = WindLayer::new(&WindConfig::default(), 0.01).unwrap();
    // Project everything far to the right of the viewport
    let offscreen = |p: GeoPoint| ScreenPoint::new(10_000.0 + p.lon as f32, -p.lat as f32);
    let mut rec = CommandRecorder::new();
    let outcome = layer.render(&mut rec, &offscreen, Viewport::new(800.0, 600.0), &[]);

    assert_eq!(outcome, LayerOutcome::Drawn { primitives: 0 });
    assert!(rec.is_empty());
}

#[test]
fn test_wind_degenerate_projection_skipped() {
    let layer = WindLayer::new(&WindConfig::default(), 0.01).unwrap();
    let snapshot = ObservationSnapshot::from_reports(&malaysia_demo_reports());
    let flat = |_: GeoPoint| ScreenPoint::new(400.0, 300.0);
    let mut rec = CommandRecorder::new();
    let outcome = layer.render(&mut rec, &flat, Viewport::new(800.0, 600.0), &snapshot.vectors);

    assert_eq!(outcome, LayerOutcome::Skipped(SkipReason::DegenerateViewport));
    assert!(rec.is_empty());
}

#[test]
fn test_wind_arrow_lengths_capped() {
    let layer = WindLayer::new(&WindConfig::default(), 0.01).unwrap();
    let view = demo_view();
    let snapshot = ObservationSnapshot::from_reports(&malaysia_demo_reports());
    let mut rec = CommandRecorder::new();
    layer.render(&mut rec, &view, view.viewport, &snapshot.vectors);

    for command in rec.commands() {
        if let DrawCommand::Line { from, to, .. } = command {
            let len = ((to.x - from.x).powi(2) + (to.y - from.y).powi(2)).sqrt();
            assert!(len >= 12.0 - 1e-3 && len <= 55.0 + 1e-3, "length {}", len);
        }
    }
}

// ============================================================================
// Markers and legend
// ============================================================================

#[test]
fn test_markers_per_station() {
    let layer = MarkerLayer::new(&MarkerConfig::default());
    let view = demo_view();
    let snapshot = ObservationSnapshot::from_reports(&malaysia_demo_reports());
    let mut rec = CommandRecorder::new();
    layer.render(&mut rec, &view, view.viewport, &snapshot.stations);

    let labels: Vec<_> = rec
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(labels.len(), 12);
    assert_eq!(labels[0], "5 m/s");
    assert!(labels.contains(&"22 m/s".to_string()));

    let circles = rec
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillPolygon { points, .. } if points.len() == 32))
        .count();
    assert_eq!(circles, 12);
}

#[test]
fn test_legend_independent_of_data() {
    let layer = LegendLayer::new(&LegendConfig::default());
    let mut a = CommandRecorder::new();
    let mut b = CommandRecorder::new();
    layer.render(&mut a, Viewport::new(1200.0, 800.0));
    layer.render(&mut b, Viewport::new(1200.0, 800.0));
    assert_eq!(a.commands(), b.commands());

    let texts: Vec<_> = a
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert!(texts.contains(&"MALAYSIA"));
    assert!(texts.contains(&"Flood Risk"));
    for label in ["0", "20", "40", "60", "80", "100"] {
        assert!(texts.contains(&label), "missing tick {}", label);
    }
}

#[test]
fn test_layers_from_engine_config() {
    let config = EngineConfig::default();
    assert!(HeatLayer::new(&config.heat, config.exact_match_threshold_deg).is_ok());
    assert!(WindLayer::new(&config.wind, config.exact_match_threshold_deg).is_ok());
}

#[test]
fn test_legend_title_panel_fits_text() {
    let first_rect_width = |config: &LegendConfig| {
        let mut rec = CommandRecorder::new();
        LegendLayer::new(config).render(&mut rec, Viewport::new(1200.0, 800.0));
        fill_rects(rec.commands())[0].2
    };

    let short = first_rect_width(&LegendConfig::default());
    let long = first_rect_width(&LegendConfig {
        region_name: "PENINSULAR MALAYSIA".to_string(),
        ..LegendConfig::default()
    });
    assert!(long > short);

    // "MALAYSIA" at size 42: 8 glyphs of 8 font pixels at 4.2px, plus padding
    assert!((short - (8.0 * 8.0 * 4.2 + 20.0)).abs() < 1e-3);
}
