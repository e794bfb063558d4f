//! phenoseg-region - Distance fields, seeds and watershed
//!
//! This crate provides the region processing behind marker-controlled
//! watershed segmentation:
//!
//! - **Connected component analysis** - Labeling connected regions of a mask
//! - **Distance transform** - Exact Euclidean distance to the background
//! - **Local maxima** - Windowed peak detection and seed markers
//! - **Watershed segmentation** - Priority-flood growth from markers
//!
//! # Examples
//!
//! ```
//! use phenoseg_core::{Pix, PixelDepth};
//! use phenoseg_region::{PeakOptions, WatershedOptions, distance_transform, seed_markers, seeded_watershed};
//!
//! // A 24x24 square in the middle of a 40x40 mask
//! let mut mask = Pix::new(40, 40, PixelDepth::Bit1).unwrap().to_mut();
//! for y in 8..32 {
//!     for x in 8..32 {
//!         mask.set_pixel(x, y, 1).unwrap();
//!     }
//! }
//! let mask: Pix = mask.into();
//!
//! let dist = distance_transform(&mask).unwrap();
//! let markers = seed_markers(&dist, &mask, &PeakOptions::default()).unwrap();
//! let labels = seeded_watershed(&dist.negate(), &markers, &mask, &WatershedOptions::default()).unwrap();
//! assert_eq!(labels.get_pixel(8, 8), Some(1));
//! ```

pub mod conncomp;
pub mod distance;
pub mod error;
pub mod extrema;
pub mod watershed;

pub use conncomp::{ConnectivityType, label_areas, label_connected_components};
pub use distance::{UNBOUNDED_DISTANCE, distance_transform};
pub use error::{RegionError, RegionResult};
pub use extrema::{PeakOptions, find_local_maxima, seed_markers};
pub use watershed::{WatershedOptions, seeded_watershed};
