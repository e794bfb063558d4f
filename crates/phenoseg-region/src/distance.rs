//! Euclidean distance transform
//!
//! Exact distance from every foreground pixel to the nearest background
//! pixel, computed with the separable lower-envelope-of-parabolas method
//! (Felzenszwalb & Huttenlocher): one 1-D squared transform down each
//! column, then one along each row.
//!
//! Pixels beyond the image border are not background. A mask without any
//! background pixel has no distance to measure; its field is a constant
//! stand-in for infinity, which has no local maxima.

use crate::error::{RegionError, RegionResult};
use phenoseg_core::{FPix, Pix, PixelDepth};

/// Stand-in for an infinite squared distance
const FAR: f64 = 1e20;

/// Distance reported everywhere when the mask has no background
pub const UNBOUNDED_DISTANCE: f32 = 1e10;

/// Compute the Euclidean distance transform of a mask
///
/// # Arguments
///
/// * `mask` - 1 or 8 bpp mask; nonzero pixels are foreground
///
/// # Returns
///
/// An `FPix` holding, for each foreground pixel, the distance between its
/// center and the center of the nearest background pixel; background
/// pixels hold 0. A mask that is foreground everywhere yields the constant
/// [`UNBOUNDED_DISTANCE`].
pub fn distance_transform(mask: &Pix) -> RegionResult<FPix> {
    if !matches!(mask.depth(), PixelDepth::Bit1 | PixelDepth::Bit8) {
        return Err(RegionError::UnsupportedDepth {
            expected: "1 or 8 bpp",
            actual: mask.depth().bits(),
        });
    }

    let has_background = (0..mask.height())
        .any(|y| (0..mask.width()).any(|x| mask.get_pixel_unchecked(x, y) == 0));
    if !has_background {
        return Ok(FPix::new_with_value(
            mask.width(),
            mask.height(),
            UNBOUNDED_DISTANCE,
        )?);
    }

    let (w, h) = (mask.width() as usize, mask.height() as usize);
    let mut grid = vec![0.0f64; w * h];
    for y in 0..h {
        for x in 0..w {
            if mask.get_pixel_unchecked(x as u32, y as u32) != 0 {
                grid[y * w + x] = FAR;
            }
        }
    }

    squared_edt_2d(&mut grid, w, h);

    let data = grid.iter().map(|&d| d.sqrt() as f32).collect();
    Ok(FPix::from_data(mask.width(), mask.height(), data)?)
}

/// In-place squared distance transform of a row-major grid.
///
/// Entries are 0 at sources and [`FAR`] elsewhere on input.
fn squared_edt_2d(grid: &mut [f64], width: usize, height: usize) {
    let n = width.max(height);
    let mut f = vec![0.0f64; n];
    let mut d = vec![0.0f64; n];
    let mut v = vec![0usize; n];
    let mut z = vec![0.0f64; n + 1];

    for x in 0..width {
        for y in 0..height {
            f[y] = grid[y * width + x];
        }
        edt_1d(&f[..height], &mut d[..height], &mut v, &mut z);
        for y in 0..height {
            grid[y * width + x] = d[y];
        }
    }

    for y in 0..height {
        let row = &mut grid[y * width..(y + 1) * width];
        f[..width].copy_from_slice(row);
        edt_1d(&f[..width], &mut d[..width], &mut v, &mut z);
        row.copy_from_slice(&d[..width]);
    }
}

/// Abscissa where the parabolas rooted at `q` and `p` intersect.
#[inline]
fn parabola_intersection(f: &[f64], q: usize, p: usize) -> f64 {
    let (qf, pf) = (q as f64, p as f64);
    ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * qf - 2.0 * pf)
}

/// 1-D squared distance transform of the sampled function `f`.
fn edt_1d(f: &[f64], d: &mut [f64], v: &mut [usize], z: &mut [f64]) {
    let n = f.len();
    if n == 0 {
        return;
    }
    let mut k = 0usize;
    v[0] = 0;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;

    for q in 1..n {
        let mut s = parabola_intersection(f, q, v[k]);
        // z[0] is -inf, so this stops at k == 0
        while s <= z[k] {
            k -= 1;
            s = parabola_intersection(f, q, v[k]);
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, out) in d.iter_mut().enumerate() {
        let qf = q as f64;
        while z[k + 1] < qf {
            k += 1;
        }
        let p = v[k] as f64;
        *out = (qf - p) * (qf - p) + f[v[k]];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_mask(w: u32, h: u32, x0: u32, y0: u32, side: u32) -> Pix {
        let mut pm = Pix::new(w, h, PixelDepth::Bit1).unwrap().to_mut();
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                pm.set_pixel(x, y, 1).unwrap();
            }
        }
        pm.into()
    }

    /// Brute-force reference
    fn naive(mask: &Pix, x: u32, y: u32) -> f32 {
        let mut best = f32::INFINITY;
        for by in 0..mask.height() {
            for bx in 0..mask.width() {
                if mask.get_pixel(bx, by) == Some(0) {
                    let dx = bx as f32 - x as f32;
                    let dy = by as f32 - y as f32;
                    best = best.min((dx * dx + dy * dy).sqrt());
                }
            }
        }
        best
    }

    #[test]
    fn test_square_center_distance() {
        let mask = square_mask(30, 30, 5, 5, 20);
        let field = distance_transform(&mask).unwrap();
        // 20x20 square: the 2x2 center block is 10 from the nearest edge
        assert_eq!(field.get_pixel(14, 14).unwrap(), 10.0);
        assert_eq!(field.get_pixel(15, 15).unwrap(), 10.0);
        assert_eq!(field.get_pixel(5, 5).unwrap(), 1.0);
        assert_eq!(field.get_pixel(0, 0).unwrap(), 0.0);
        assert_eq!(field.max_value(), Some(10.0));
    }

    #[test]
    fn test_matches_brute_force() {
        let mut pm = Pix::new(17, 13, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..13u32 {
            for x in 0..17u32 {
                let inside = (x as i32 - 8).pow(2) + (y as i32 - 6).pow(2) <= 30
                    || (x > 10 && y < 4);
                if inside {
                    pm.set_pixel(x, y, 255).unwrap();
                }
            }
        }
        let mask: Pix = pm.into();
        let field = distance_transform(&mask).unwrap();
        for y in 0..13 {
            for x in 0..17 {
                let got = field.get_pixel(x, y).unwrap();
                let want = if mask.get_pixel(x, y) == Some(0) {
                    0.0
                } else {
                    naive(&mask, x, y)
                };
                assert!((got - want).abs() < 1e-4, "({x},{y}): {got} vs {want}");
            }
        }
    }

    #[test]
    fn test_empty_mask_is_all_zero() {
        let mask = Pix::new(9, 9, PixelDepth::Bit1).unwrap();
        let field = distance_transform(&mask).unwrap();
        assert!(field.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_full_mask_is_unbounded() {
        let mask = square_mask(5, 3, 0, 0, 3);
        let mask = {
            let mut pm = mask.to_mut();
            for y in 0..3 {
                for x in 3..5 {
                    pm.set_pixel(x, y, 1).unwrap();
                }
            }
            Pix::from(pm)
        };
        assert_eq!(mask.count_nonzero(), 15);
        let field = distance_transform(&mask).unwrap();
        assert!(field.data().iter().all(|&v| v == UNBOUNDED_DISTANCE));
        assert_eq!(field.min_value(), field.max_value());
    }

    #[test]
    fn test_rejects_rgb() {
        let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        assert!(distance_transform(&pix).is_err());
    }
}
