//! phenoseg - Watershed segmentation of touching objects
//!
//! Splits leaves, cells and other touching or overlapping objects inside a
//! foreground mask into separately labeled regions and estimates how many
//! there are.
//!
//! # Overview
//!
//! - Raster images (`Pix`) and float fields (`FPix`)
//! - PNG and JPEG output
//! - Seeded palettes and label coloring
//! - Distance transform, peak seeds and watershed growth
//! - The analysis step tying them together
//!
//! # Example
//!
//! ```
//! use phenoseg::analysis::{DebugParams, WatershedOptions, watershed_segmentation};
//! use phenoseg::{Pix, PixelDepth};
//!
//! let image = Pix::new(64, 48, PixelDepth::Bit32).unwrap();
//! let mask = Pix::new(64, 48, PixelDepth::Bit1).unwrap();
//! let mut debug = DebugParams::new();
//! let result =
//!     watershed_segmentation(&image, &mask, &WatershedOptions::default(), None, &mut debug)
//!         .unwrap();
//! assert_eq!(result.object_count(), 0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use phenoseg_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use phenoseg_analysis as analysis;
pub use phenoseg_color as color;
pub use phenoseg_io as io;
pub use phenoseg_region as region;
