//! # Error Types
//!
//! This module defines error types used throughout the labelzpl library.
//!
//! Compilation itself never fails; errors only come from the edges: loading
//! templates and row data, rendering images, and delivering documents.

use thiserror::Error;

/// Main error type for labelzpl operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// Template or row data violates the data model
    #[error("Invalid template: {0}")]
    Template(String),

    /// Image loading, decoding or rasterization error
    #[error("Image error: {0}")]
    Image(String),

    /// Delivery to a printer failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON parse error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
