//! Error types for phenoseg-color

use thiserror::Error;

/// Errors that can occur during coloring operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] phenoseg_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },
}

/// Result type for coloring operations
pub type ColorResult<T> = Result<T, ColorError>;
