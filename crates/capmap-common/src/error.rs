//! Error types for facility-capmap crates.

use thiserror::Error;

/// Result type alias using CapError.
pub type CapResult<T> = Result<T, CapError>;

/// Primary error type for map data operations.
///
/// None of these are fatal to the map view: callers log the error and
/// continue with an empty or stale dataset.
#[derive(Debug, Error)]
pub enum CapError {
    // === Data acquisition ===
    #[error("Failed to fetch '{uri}': {message}")]
    Fetch { uri: String, message: String },

    #[error("Failed to decode text as {encoding}: {message}")]
    Decode { encoding: String, message: String },

    // === Data interpretation ===
    #[error("Failed to parse tabular data: {0}")]
    TabularParse(String),

    #[error("Failed to parse polygon collection: {0}")]
    GeoJsonParse(String),

    // === Map engine ===
    #[error("Map engine error: {0}")]
    Engine(String),

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    // === Configuration ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// Conversion from common error types
impl From<std::io::Error> for CapError {
    fn from(err: std::io::Error) -> Self {
        CapError::Fetch {
            uri: "<io>".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CapError {
    fn from(err: serde_json::Error) -> Self {
        CapError::GeoJsonParse(err.to_string())
    }
}
