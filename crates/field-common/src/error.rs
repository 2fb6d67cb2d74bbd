//! Error types for the flood-field engine.

use thiserror::Error;

/// Result type alias using FieldError.
pub type FieldResult<T> = Result<T, FieldError>;

/// Primary error type for engine construction and data loading.
///
/// Interpolation and rendering never fail at runtime; these errors come from
/// validating configuration and inputs up front.
#[derive(Debug, Error)]
pub enum FieldError {
    // === Geometry Errors ===
    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),

    #[error("Invalid sample grid: {0}")]
    InvalidGrid(String),

    // === Data Errors ===
    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    #[error("Failed to parse observations: {0}")]
    ObservationParse(String),

    // === Configuration Errors ===
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Failed to read configuration: {0}")]
    ConfigRead(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),
}

impl FieldError {
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(err: serde_json::Error) -> Self {
        FieldError::ObservationParse(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for FieldError {
    fn from(err: serde_yaml::Error) -> Self {
        FieldError::ConfigParse(format!("YAML error: {}", err))
    }
}
