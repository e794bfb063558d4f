//! Local maxima of a distance field
//!
//! Peaks are found with a square maximum filter: a pixel is a peak when it
//! equals the largest value in the `(2r+1) x (2r+1)` window around it.
//! Window parts outside the image count as 0. Adjacent peak pixels (a
//! plateau) are merged into one seed marker.

use crate::conncomp::{ConnectivityType, label_connected_components};
use crate::error::{RegionError, RegionResult, check_size};
use phenoseg_core::{FPix, Pix, PixelDepth};
use std::collections::VecDeque;

/// Options for peak detection
#[derive(Debug, Clone)]
pub struct PeakOptions {
    /// Window radius; peaks closer than this are suppressed (must be >= 1)
    pub min_distance: u32,
    /// Drop peaks lying within `min_distance` pixels of the image edge
    pub exclude_border: bool,
}

impl Default for PeakOptions {
    fn default() -> Self {
        Self {
            min_distance: 10,
            exclude_border: true,
        }
    }
}

impl PeakOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum peak separation
    pub fn with_min_distance(mut self, distance: u32) -> Self {
        self.min_distance = distance;
        self
    }

    /// Set border exclusion
    pub fn with_exclude_border(mut self, exclude: bool) -> Self {
        self.exclude_border = exclude;
        self
    }
}

/// Find the local maxima of `field` inside `mask`
///
/// A pixel is reported when it equals the windowed maximum, lies inside the
/// mask and is strictly above the global minimum of the field. A constant
/// field therefore has no peaks.
///
/// # Arguments
///
/// * `field` - Scalar field, usually a distance transform
/// * `mask` - 1 or 8 bpp mask of the same size
/// * `options` - Window radius and border handling
///
/// # Returns
///
/// A 1 bpp image with peak pixels set.
pub fn find_local_maxima(field: &FPix, mask: &Pix, options: &PeakOptions) -> RegionResult<Pix> {
    if options.min_distance == 0 {
        return Err(RegionError::InvalidParameters(
            "min_distance must be at least 1".to_string(),
        ));
    }
    if !matches!(mask.depth(), PixelDepth::Bit1 | PixelDepth::Bit8) {
        return Err(RegionError::UnsupportedDepth {
            expected: "1 or 8 bpp",
            actual: mask.depth().bits(),
        });
    }
    check_size(field.dimensions(), mask.dimensions())?;

    let (width, height) = field.dimensions();
    let mut peaks = Pix::new(width, height, PixelDepth::Bit1)?.to_mut();
    let Some(floor) = field.min_value() else {
        return Ok(peaks.into());
    };

    let filtered = max_filter(field, options.min_distance as usize);
    let r = options.min_distance;
    for y in 0..height {
        for x in 0..width {
            if options.exclude_border
                && (x < r || y < r || x + r >= width || y + r >= height)
            {
                continue;
            }
            let v = field.get_pixel_unchecked(x, y);
            if v > floor
                && v == filtered[(y * width + x) as usize]
                && mask.get_pixel_unchecked(x, y) != 0
            {
                peaks.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(peaks.into())
}

/// Seed markers: local maxima grouped into 8-connected clusters
///
/// Each cluster gets its own id, assigned in raster order starting at 1;
/// every other pixel is 0. The result is a 32 bpp label image.
pub fn seed_markers(field: &FPix, mask: &Pix, options: &PeakOptions) -> RegionResult<Pix> {
    let peaks = find_local_maxima(field, mask, options)?;
    label_connected_components(&peaks, ConnectivityType::EightWay)
}

/// Separable square maximum filter with zero padding.
fn max_filter(field: &FPix, radius: usize) -> Vec<f32> {
    let (w, h) = (field.width() as usize, field.height() as usize);

    let mut rows = vec![0.0f32; w * h];
    for y in 0..h {
        sliding_max(
            field.row(y as u32),
            radius,
            &mut rows[y * w..(y + 1) * w],
        );
    }

    let mut out = vec![0.0f32; w * h];
    let mut column = vec![0.0f32; h];
    let mut column_max = vec![0.0f32; h];
    for x in 0..w {
        for y in 0..h {
            column[y] = rows[y * w + x];
        }
        sliding_max(&column, radius, &mut column_max);
        for y in 0..h {
            out[y * w + x] = column_max[y];
        }
    }
    out
}

/// 1-D running maximum over `[i - radius, i + radius]`.
///
/// Uses a monotonic deque of candidate indices; positions outside the
/// slice contribute 0.
fn sliding_max(src: &[f32], radius: usize, dst: &mut [f32]) {
    let n = src.len();
    let mut candidates: VecDeque<usize> = VecDeque::with_capacity(2 * radius + 1);
    let mut next = 0;

    for i in 0..n {
        let hi = (i + radius).min(n - 1);
        while next <= hi {
            while candidates.back().is_some_and(|&b| src[b] <= src[next]) {
                candidates.pop_back();
            }
            candidates.push_back(next);
            next += 1;
        }
        let lo = i.saturating_sub(radius);
        while candidates.front().is_some_and(|&f| f < lo) {
            candidates.pop_front();
        }

        let mut m = candidates.front().map_or(0.0, |&f| src[f]);
        if i < radius || i + radius >= n {
            m = m.max(0.0);
        }
        dst[i] = m;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_mask(w: u32, h: u32) -> Pix {
        let mut pm = Pix::new(w, h, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..h {
            for x in 0..w {
                pm.set_pixel_unchecked(x, y, 255);
            }
        }
        pm.into()
    }

    #[test]
    fn test_sliding_max() {
        let src = [1.0, 3.0, 2.0, 0.5, 4.0, 1.0];
        let mut dst = [0.0; 6];
        sliding_max(&src, 1, &mut dst);
        assert_eq!(dst, [3.0, 3.0, 3.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_sliding_max_pads_with_zero() {
        let src = [-1.0, -2.0, -3.0];
        let mut dst = [0.0; 3];
        sliding_max(&src, 1, &mut dst);
        assert_eq!(dst, [0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_single_peak() {
        let mut field = FPix::new(15, 15).unwrap();
        for y in 0..15u32 {
            for x in 0..15u32 {
                let d = (x as i32 - 7).abs().max((y as i32 - 7).abs());
                field.set_pixel(x, y, (8 - d) as f32).unwrap();
            }
        }
        let opts = PeakOptions::new().with_min_distance(3);
        let peaks = find_local_maxima(&field, &full_mask(15, 15), &opts).unwrap();
        assert_eq!(peaks.count_nonzero(), 1);
        assert_eq!(peaks.get_pixel(7, 7), Some(1));
    }

    #[test]
    fn test_exclude_border() {
        let mut field = FPix::new(12, 12).unwrap();
        field.set_pixel(1, 1, 5.0).unwrap();
        field.set_pixel(6, 6, 5.0).unwrap();
        let mask = full_mask(12, 12);

        let opts = PeakOptions::new().with_min_distance(2);
        let peaks = find_local_maxima(&field, &mask, &opts).unwrap();
        assert_eq!(peaks.count_nonzero(), 1);
        assert_eq!(peaks.get_pixel(6, 6), Some(1));

        let peaks =
            find_local_maxima(&field, &mask, &opts.with_exclude_border(false)).unwrap();
        assert_eq!(peaks.count_nonzero(), 2);
        assert_eq!(peaks.get_pixel(1, 1), Some(1));
    }

    #[test]
    fn test_peaks_outside_mask_are_dropped() {
        let mut field = FPix::new(10, 10).unwrap();
        field.set_pixel(5, 5, 3.0).unwrap();
        let mask = Pix::new(10, 10, PixelDepth::Bit1).unwrap();
        let opts = PeakOptions::new().with_min_distance(1);
        let peaks = find_local_maxima(&field, &mask, &opts).unwrap();
        assert!(peaks.is_zero());
    }

    #[test]
    fn test_constant_field_has_no_peaks() {
        let field = FPix::new_with_value(8, 8, 2.0).unwrap();
        let opts = PeakOptions::new().with_min_distance(1).with_exclude_border(false);
        let peaks = find_local_maxima(&field, &full_mask(8, 8), &opts).unwrap();
        assert!(peaks.is_zero());
    }

    #[test]
    fn test_plateau_is_one_marker() {
        let mut field = FPix::new(20, 20).unwrap();
        for (x, y) in [(9, 9), (10, 9), (9, 10), (10, 10), (15, 4)] {
            field.set_pixel(x, y, 4.0).unwrap();
        }
        let opts = PeakOptions::new().with_min_distance(2);
        let markers = seed_markers(&field, &full_mask(20, 20), &opts).unwrap();
        assert_eq!(markers.depth(), PixelDepth::Bit32);
        // (15, 4) comes first in raster order
        assert_eq!(markers.get_pixel(15, 4), Some(1));
        assert_eq!(markers.get_pixel(9, 9), Some(2));
        assert_eq!(markers.get_pixel(10, 10), Some(2));
        assert_eq!(markers.count_nonzero(), 5);
    }

    #[test]
    fn test_invalid_parameters() {
        let field = FPix::new(4, 4).unwrap();
        let mask = full_mask(4, 4);
        let zero = PeakOptions::new().with_min_distance(0);
        assert!(matches!(
            find_local_maxima(&field, &mask, &zero),
            Err(RegionError::InvalidParameters(_))
        ));
        let small = full_mask(3, 4);
        assert!(matches!(
            find_local_maxima(&field, &small, &PeakOptions::new()),
            Err(RegionError::SizeMismatch { .. })
        ));
    }
}
