//! Error types for the DVS emulator

use thiserror::Error;

/// Core emulator errors
#[derive(Error, Debug)]
pub enum DvsError {
    // Geometry errors
    #[error("Resolution must be non-zero, got {width}x{height}")]
    EmptyResolution { width: usize, height: usize },

    #[error(
        "Frame dimension mismatch: expected {expected_width}x{expected_height}, got {width}x{height}"
    )]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    #[error("Buffer length mismatch: expected {expected}, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    // Configuration errors
    #[error("Base threshold must be finite and positive, got {0}")]
    InvalidThreshold(f32),

    #[error("Configuration error: {0}")]
    Config(String),

    // Execution errors
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    // Collaborator errors
    #[error("Frame source error: {0}")]
    Source(String),

    #[error("Frame sink error: {0}")]
    Sink(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for emulator operations
pub type DvsResult<T> = Result<T, DvsError>;
