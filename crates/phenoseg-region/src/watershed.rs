//! Marker-controlled watershed
//!
//! Regions grow outward from seed markers over an elevation field. Pixels
//! are flooded in order of increasing elevation; among equal elevations the
//! one queued first is flooded first. A pixel joins the region of the
//! neighbor that discovered it, so region boundaries settle where floods
//! from different markers meet.

use crate::conncomp::ConnectivityType;
use crate::error::{RegionError, RegionResult, check_size};
use phenoseg_core::{FPix, Pix, PixelDepth};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Options for watershed segmentation
#[derive(Debug, Clone, Default)]
pub struct WatershedOptions {
    /// Neighborhood used when growing regions
    pub connectivity: ConnectivityType,
}

impl WatershedOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set connectivity type
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }
}

/// Queue entry; `BinaryHeap` is a max-heap, so the ordering is reversed.
#[derive(Debug, Clone, Copy)]
struct FloodEntry {
    elevation: f32,
    age: u64,
    x: u32,
    y: u32,
}

impl PartialEq for FloodEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloodEntry {}

impl PartialOrd for FloodEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloodEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .elevation
            .total_cmp(&self.elevation)
            .then_with(|| other.age.cmp(&self.age))
    }
}

/// Grow labeled regions from `markers` over `elevation`, inside `mask`
///
/// # Arguments
///
/// * `elevation` - Field to flood; low values are flooded first
/// * `markers` - 32 bpp seed labels, 0 for unseeded pixels
/// * `mask` - 1 or 8 bpp; pixels outside it are never labeled
/// * `options` - Growth neighborhood
///
/// # Returns
///
/// A 32 bpp label image. Every value is 0 or one of the marker ids found
/// inside the mask. Mask components without a marker stay 0.
pub fn seeded_watershed(
    elevation: &FPix,
    markers: &Pix,
    mask: &Pix,
    options: &WatershedOptions,
) -> RegionResult<Pix> {
    if markers.depth() != PixelDepth::Bit32 {
        return Err(RegionError::UnsupportedDepth {
            expected: "32 bpp",
            actual: markers.depth().bits(),
        });
    }
    if !matches!(mask.depth(), PixelDepth::Bit1 | PixelDepth::Bit8) {
        return Err(RegionError::UnsupportedDepth {
            expected: "1 or 8 bpp",
            actual: mask.depth().bits(),
        });
    }
    check_size(elevation.dimensions(), markers.dimensions())?;
    check_size(elevation.dimensions(), mask.dimensions())?;

    let (width, height) = markers.dimensions();
    let mut labels = Pix::new(width, height, PixelDepth::Bit32)?.to_mut();
    labels.set_spp(1);

    let mut heap = BinaryHeap::new();
    let mut age = 0u64;
    for y in 0..height {
        for x in 0..width {
            let marker = markers.get_pixel_unchecked(x, y);
            if marker == 0 || mask.get_pixel_unchecked(x, y) == 0 {
                continue;
            }
            labels.set_pixel_unchecked(x, y, marker);
            heap.push(FloodEntry {
                elevation: elevation.get_pixel_unchecked(x, y),
                age,
                x,
                y,
            });
            age += 1;
        }
    }

    while let Some(entry) = heap.pop() {
        let label = labels.get_pixel_unchecked(entry.x, entry.y);
        for (nx, ny) in options
            .connectivity
            .neighbors(entry.x, entry.y, width, height)
        {
            if mask.get_pixel_unchecked(nx, ny) == 0 || labels.get_pixel_unchecked(nx, ny) != 0 {
                continue;
            }
            labels.set_pixel_unchecked(nx, ny, label);
            heap.push(FloodEntry {
                elevation: elevation.get_pixel_unchecked(nx, ny),
                age,
                x: nx,
                y: ny,
            });
            age += 1;
        }
    }

    Ok(labels.into())
}
