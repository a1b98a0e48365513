//! Error types for deviz

use thiserror::Error;

/// Main error type for visualization pipeline operations
#[derive(Error, Debug)]
pub enum VizError {
    #[error("Cannot read input file '{path}': {source}")]
    MissingInputFile {
        path: String,
        source: std::io::Error,
    },

    #[error("Column '{column}' not found in '{path}' (check the schema flags)")]
    SchemaMismatch { column: String, path: String },

    #[error("Invalid table: {reason}")]
    InvalidTable { reason: String },

    #[error("Invalid gene set file: {reason}")]
    InvalidGeneSets { reason: String },

    #[error("Empty data: {reason}")]
    EmptyData { reason: String },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    #[error("Plot rendering failed: {reason}")]
    PlotError { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl VizError {
    /// Wrap a plotters drawing error, which is generic over the backend
    pub fn plot<E: std::fmt::Display>(err: E) -> Self {
        VizError::PlotError {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for deviz operations
pub type Result<T> = std::result::Result<T, VizError>;
