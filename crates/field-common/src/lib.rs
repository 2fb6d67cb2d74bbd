//! Common types and utilities shared across the flood-field crates.

pub mod bbox;
pub mod config;
pub mod error;
pub mod geo;
pub mod grid;
pub mod layer;
pub mod observation;
pub mod weather;

pub use bbox::BoundingBox;
pub use config::{EngineConfig, HeatConfig, LegendConfig, MarkerConfig, WindConfig};
pub use error::{FieldError, FieldResult};
pub use geo::GeoPoint;
pub use grid::{GridCell, SampleGrid};
pub use layer::{LayerKind, LayerSetting};
pub use observation::{ScalarObservation, VectorObservation};
pub use weather::{RiskLevel, WeatherReport, WindLevel};
