//! phenoseg-color - Palettes and label coloring
//!
//! - **Palettes** - `n` distinct, reproducibly shuffled colors
//! - **Label coloring** - render a label image with one color per label
//!
//! # Examples
//!
//! ```
//! use phenoseg_color::{DEFAULT_PALETTE_SEED, color_palette};
//!
//! let colors = color_palette(5, DEFAULT_PALETTE_SEED);
//! assert_eq!(colors.len(), 5);
//! ```

pub mod coloring;
pub mod error;
pub mod palette;

pub use coloring::{color_labels, distinct_labels};
pub use error::{ColorError, ColorResult};
pub use palette::{DEFAULT_PALETTE_SEED, color_palette, jet};
