//! Error types for phenoseg-analysis

use thiserror::Error;

/// Errors that can occur during an analysis step
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Image and mask do not have the same width and height
    #[error("shape mismatch: image is {image:?}, mask is {mask:?}")]
    ShapeMismatch { image: (u32, u32), mask: (u32, u32) },

    /// Unsupported pixel depth for an input
    #[error("unsupported {input} depth: expected {expected}, got {actual}")]
    UnsupportedDepth {
        input: &'static str,
        expected: &'static str,
        actual: u32,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// More objects than the count field can hold
    #[error("object count overflow: {0} distinct labels")]
    CountOverflow(usize),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] phenoseg_core::Error),

    /// Region processing error
    #[error("region error: {0}")]
    Region(#[from] phenoseg_region::RegionError),

    /// Coloring error
    #[error("color error: {0}")]
    Color(#[from] phenoseg_color::ColorError),

    /// Failure writing an artifact
    #[error("io error: {0}")]
    Io(#[from] phenoseg_io::IoError),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
