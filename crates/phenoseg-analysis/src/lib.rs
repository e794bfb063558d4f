//! phenoseg-analysis - Watershed analysis step
//!
//! Separates touching or overlapping objects (leaves, cells) inside a
//! foreground mask and reports an estimated object count, the way one
//! step of a phenotyping pipeline does:
//!
//! - **Segmentation** - distance transform, seed markers, seeded watershed
//! - **Visualization** - colored labels beside the source image, optionally
//!   written as `<name>_watershed.jpg`
//! - **Debug output** - intermediate images written or shown per
//!   [`DebugParams`]
//!
//! # Examples
//!
//! ```
//! use phenoseg_analysis::{DebugParams, WatershedOptions, watershed_segmentation};
//! use phenoseg_core::{Pix, PixelDepth};
//!
//! let image = Pix::new(40, 40, PixelDepth::Bit32).unwrap();
//! let mut mask = Pix::new(40, 40, PixelDepth::Bit1).unwrap().to_mut();
//! for y in 10..30 {
//!     for x in 10..30 {
//!         mask.set_pixel(x, y, 1).unwrap();
//!     }
//! }
//! let mask: Pix = mask.into();
//!
//! let mut debug = DebugParams::new();
//! let result =
//!     watershed_segmentation(&image, &mask, &WatershedOptions::default(), None, &mut debug)
//!         .unwrap();
//! assert_eq!(result.data(), ("WATERSHED_DATA", 1));
//! ```

pub mod debug;
pub mod error;
pub mod options;
pub mod result;
pub mod watershed;

pub use debug::{DebugMode, DebugParams, ImageViewer};
pub use error::{AnalysisError, AnalysisResult};
pub use options::{CountSource, WatershedOptions};
pub use result::{AnalysisImage, WatershedAnalysis};
pub use watershed::{output_path, watershed_segmentation};
