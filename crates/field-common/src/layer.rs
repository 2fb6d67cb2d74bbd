//! Overlay layer identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The visual layers the compositor can stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Interpolated flood-risk heat field
    Heat,
    /// Interpolated wind arrow field
    Wind,
    /// Per-station circles, arrows and speed labels
    Markers,
    /// Title banner and gradient legend
    Legend,
}

impl LayerKind {
    pub const ALL: [LayerKind; 4] = [
        LayerKind::Heat,
        LayerKind::Wind,
        LayerKind::Markers,
        LayerKind::Legend,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Heat => "heat",
            LayerKind::Wind => "wind",
            LayerKind::Markers => "markers",
            LayerKind::Legend => "legend",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for LayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heat" | "heatmap" => Ok(LayerKind::Heat),
            "wind" => Ok(LayerKind::Wind),
            "markers" => Ok(LayerKind::Markers),
            "legend" => Ok(LayerKind::Legend),
            other => Err(format!("unknown layer '{}'", other)),
        }
    }
}

/// Position and initial visibility of one layer in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSetting {
    pub kind: LayerKind,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl LayerSetting {
    pub fn new(kind: LayerKind, enabled: bool) -> Self {
        Self { kind, enabled }
    }
}

/// Bottom-to-top default stack: heat under wind, markers above the fields,
/// legend on top.
pub fn default_stack() -> Vec<LayerSetting> {
    vec![
        LayerSetting::new(LayerKind::Heat, true),
        LayerSetting::new(LayerKind::Wind, true),
        LayerSetting::new(LayerKind::Markers, true),
        LayerSetting::new(LayerKind::Legend, true),
    ]
}
