//! Error types for layer records and OGC requests.

use thiserror::Error;

use crate::layer::{LayerId, MapId};

/// Result type alias using LayerError.
pub type LayerResult<T> = Result<T, LayerError>;

/// Primary error type for layer operations.
#[derive(Debug, Error)]
pub enum LayerError {
    // === Feature info errors ===
    #[error("Method not fully implemented: {0}")]
    NotImplemented(String),

    #[error("Request type unknown: {0}")]
    UnknownRequestType(String),

    #[error("Transport error: {0}")]
    Transport(String),

    // === Record errors ===
    #[error("Invalid value for field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Layer not found: {0}")]
    LayerNotFound(LayerId),

    #[error("Map not found: {0}")]
    MapNotFound(MapId),
}

impl LayerError {
    /// Shorthand for a casting or validation failure on a named column.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        LayerError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}
