//! Error types for phenoseg-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] phenoseg_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Inputs that must share a shape do not
    #[error("size mismatch: {expected:?} vs {actual:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;

/// Fail with [`RegionError::SizeMismatch`] unless both shapes agree.
pub(crate) fn check_size(expected: (u32, u32), actual: (u32, u32)) -> RegionResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(RegionError::SizeMismatch { expected, actual })
    }
}
