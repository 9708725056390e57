//! Error types for the polyseg-eval library.

use thiserror::Error;

/// Result type for polyseg-eval operations.
pub type Result<T> = std::result::Result<T, SegEvalError>;

/// Error types that can occur while building inputs or evaluating datasets.
///
/// Shape preconditions on already-typed inputs (two masks of different sizes,
/// an impossible resample target) are not errors: they panic, and the
/// offending functions document it under `# Panics`.
#[derive(Error, Debug)]
pub enum SegEvalError {
    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Inputs whose dimensions do not line up.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// An input that must contain at least one element was empty.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Mask data that cannot form a single-channel region mask.
    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    /// Polygon with unusable vertices.
    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    /// Empty dataset provided.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// Invalid boundary tolerance.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
}
