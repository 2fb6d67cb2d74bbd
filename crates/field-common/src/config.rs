//! Engine configuration.
//!
//! Every constant the field engine uses can be overridden from a YAML file;
//! anything left out falls back to the defaults tuned for peninsular and
//! East Malaysia.
//!
//! ```yaml
//! exact_match_threshold_deg: 0.01
//! heat:
//!   rows: 40
//!   cols: 60
//!   power: 2.5
//! wind:
//!   power: 2.0
//!   max_speed: 30.0
//! layers:
//!   - kind: heat
//!   - kind: wind
//!     enabled: false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::bbox::BoundingBox;
use crate::error::{FieldError, FieldResult};
use crate::grid::SampleGrid;
use crate::layer::{default_stack, LayerKind, LayerSetting};

/// Default distance (degrees) under which a query snaps to an observation.
pub const DEFAULT_EXACT_MATCH_THRESHOLD_DEG: f64 = 0.01;

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Queries closer than this to an observation take its value verbatim
    pub exact_match_threshold_deg: f64,
    pub heat: HeatConfig,
    pub wind: WindConfig,
    pub markers: MarkerConfig,
    pub legend: LegendConfig,
    /// Bottom-to-top layer stack
    pub layers: Vec<LayerSetting>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exact_match_threshold_deg: DEFAULT_EXACT_MATCH_THRESHOLD_DEG,
            heat: HeatConfig::default(),
            wind: WindConfig::default(),
            markers: MarkerConfig::default(),
            legend: LegendConfig::default(),
            layers: default_stack(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> FieldResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FieldError::ConfigRead(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string and validate it.
    pub fn from_yaml(yaml: &str) -> FieldResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections.
    pub fn validate(&self) -> FieldResult<()> {
        if !(self.exact_match_threshold_deg.is_finite() && self.exact_match_threshold_deg > 0.0) {
            return Err(FieldError::invalid_config(
                "exact_match_threshold_deg",
                "must be a positive number of degrees",
            ));
        }
        self.heat.validate()?;
        self.wind.validate()?;
        self.markers.validate()?;
        self.legend.validate()?;

        for (i, setting) in self.layers.iter().enumerate() {
            if self.layers[..i].iter().any(|s| s.kind == setting.kind) {
                return Err(FieldError::invalid_config(
                    "layers",
                    format!("layer '{}' listed more than once", setting.kind),
                ));
            }
        }
        Ok(())
    }

    /// Stacking order with any layer missing from the config appended,
    /// disabled, on top.
    pub fn layer_stack(&self) -> Vec<LayerSetting> {
        let mut stack = self.layers.clone();
        for kind in LayerKind::ALL {
            if !stack.iter().any(|s| s.kind == kind) {
                stack.push(LayerSetting::new(kind, false));
            }
        }
        stack
    }
}

/// Flood-risk heat field settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatConfig {
    pub bbox: BoundingBox,
    pub rows: usize,
    pub cols: usize,
    /// IDW distance exponent; higher keeps risk more local to each city
    pub power: f64,
    /// Extra pixels added to each cell so neighbouring cells overlap
    pub seam_overlap_px: f32,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            bbox: BoundingBox {
                lat_min: 0.8,
                lat_max: 7.5,
                lon_min: 99.5,
                lon_max: 119.5,
            },
            rows: 40,
            cols: 60,
            power: 2.5,
            seam_overlap_px: 1.0,
        }
    }
}

impl HeatConfig {
    pub fn grid(&self) -> FieldResult<SampleGrid> {
        SampleGrid::new(self.rows, self.cols, self.bbox)
    }

    fn validate(&self) -> FieldResult<()> {
        self.grid()
            .map_err(|e| FieldError::invalid_config("heat", e.to_string()))?;
        check_positive("heat.power", self.power)?;
        if !(self.seam_overlap_px.is_finite() && self.seam_overlap_px >= 0.0) {
            return Err(FieldError::invalid_config(
                "heat.seam_overlap_px",
                "must be zero or positive",
            ));
        }
        Ok(())
    }
}

/// Wind arrow field settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    pub bbox: BoundingBox,
    pub rows: usize,
    pub cols: usize,
    pub power: f64,
    /// Speed (m/s) at which color and length scaling saturate
    pub max_speed: f64,
    pub base_arrow_len: f32,
    pub arrow_len_per_speed: f32,
    pub max_arrow_len: f32,
    pub base_head_size: f32,
    pub max_head_size: f32,
    pub base_stroke_width: f32,
    /// Arrows anchored further than this outside the viewport are dropped
    pub cull_margin_px: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            bbox: BoundingBox {
                lat_min: 1.0,
                lat_max: 7.2,
                lon_min: 99.5,
                lon_max: 119.0,
            },
            rows: 12,
            cols: 20,
            power: 2.0,
            max_speed: 30.0,
            base_arrow_len: 12.0,
            arrow_len_per_speed: 1.8,
            max_arrow_len: 55.0,
            base_head_size: 6.0,
            max_head_size: 14.0,
            base_stroke_width: 1.5,
            cull_margin_px: 50.0,
        }
    }
}

impl WindConfig {
    pub fn grid(&self) -> FieldResult<SampleGrid> {
        SampleGrid::new(self.rows, self.cols, self.bbox)
    }

    fn validate(&self) -> FieldResult<()> {
        self.grid()
            .map_err(|e| FieldError::invalid_config("wind", e.to_string()))?;
        check_positive("wind.power", self.power)?;
        check_positive("wind.max_speed", self.max_speed)?;
        check_positive("wind.max_arrow_len", self.max_arrow_len as f64)?;
        check_positive("wind.max_head_size", self.max_head_size as f64)?;
        check_positive("wind.base_stroke_width", self.base_stroke_width as f64)?;
        Ok(())
    }
}

/// Station marker settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Radius of the wind-level circle drawn around each station
    pub radius_km: f64,
    /// Vertex count of the circle polygon
    pub circle_segments: usize,
    pub base_arrow_len: f32,
    pub arrow_len_per_speed: f32,
    pub head_size: f32,
    pub stroke_width: f32,
    pub label_size: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            radius_km: 15.0,
            circle_segments: 32,
            base_arrow_len: 50.0,
            arrow_len_per_speed: 2.5,
            head_size: 18.0,
            stroke_width: 4.0,
            label_size: 28.0,
        }
    }
}

impl MarkerConfig {
    fn validate(&self) -> FieldResult<()> {
        check_positive("markers.radius_km", self.radius_km)?;
        if self.circle_segments < 3 {
            return Err(FieldError::invalid_config(
                "markers.circle_segments",
                "a circle needs at least 3 vertices",
            ));
        }
        Ok(())
    }
}

/// Legend and title banner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub region_name: String,
    pub title: String,
    pub scale_title: String,
    /// Number of equal divisions of the 0-100 scale; labels sit on each boundary
    pub tick_count: usize,
    pub max_bar_width: f32,
    pub bar_height: f32,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            region_name: "MALAYSIA".to_string(),
            title: "Flood Risk".to_string(),
            scale_title: "Flood Risk Score [0-100]".to_string(),
            tick_count: 5,
            max_bar_width: 500.0,
            bar_height: 20.0,
        }
    }
}

impl LegendConfig {
    fn validate(&self) -> FieldResult<()> {
        if self.tick_count == 0 {
            return Err(FieldError::invalid_config(
                "legend.tick_count",
                "must be at least 1",
            ));
        }
        check_positive("legend.max_bar_width", self.max_bar_width as f64)?;
        check_positive("legend.bar_height", self.bar_height as f64)?;
        Ok(())
    }
}

fn check_positive(field: &str, value: f64) -> FieldResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FieldError::invalid_config(
            field,
            format!("must be positive, got {}", value),
        ))
    }
}
