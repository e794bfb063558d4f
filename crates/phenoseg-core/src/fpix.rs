//! FPix - Floating-point image
//!
//! `FPix` is a 2D array of `f32` values. Distance fields live here before
//! they are inspected for maxima or flooded.
//!
//! # Examples
//!
//! ```
//! use phenoseg_core::FPix;
//!
//! let mut fpix = FPix::new(100, 100).unwrap();
//! fpix.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(fpix.get_pixel(10, 20).unwrap(), 0.5);
//! ```

use crate::error::{Error, Result};
use crate::pix::{Pix, PixelDepth};

/// How to handle negative values when converting FPix to Pix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NegativeHandling {
    /// Clip negative values to zero
    #[default]
    ClipToZero,
    /// Take the absolute value
    TakeAbsValue,
}

/// Floating-point image
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FPix {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl FPix {
    /// Create a new FPix with all pixels set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new FPix with all pixels set to `value`
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(FPix {
            width,
            height,
            data: vec![value; (width as usize) * (height as usize)],
        })
    }

    /// Create a FPix from row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(FPix {
            width,
            height,
            data,
        })
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinates are outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(self.get_pixel_unchecked(x, y))
    }

    /// Set the value at (x, y)
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        self.set_pixel_unchecked(x, y, value);
        Ok(())
    }

    /// Get the value at (x, y) without bounds checking
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set the value at (x, y) without bounds checking
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = value;
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> Error {
        Error::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Get the raw data
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get the raw data mutably
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get row `y`
    pub fn row(&self, y: u32) -> &[f32] {
        let w = self.width as usize;
        let start = (y as usize) * w;
        &self.data[start..start + w]
    }

    /// Minimum value and its location (first in raster order)
    pub fn min(&self) -> Option<(f32, u32, u32)> {
        self.extreme(|a, b| a < b)
    }

    /// Maximum value and its location (first in raster order)
    pub fn max(&self) -> Option<(f32, u32, u32)> {
        self.extreme(|a, b| a > b)
    }

    /// Minimum value
    pub fn min_value(&self) -> Option<f32> {
        self.min().map(|(v, _, _)| v)
    }

    /// Maximum value
    pub fn max_value(&self) -> Option<f32> {
        self.max().map(|(v, _, _)| v)
    }

    fn extreme(&self, better: impl Fn(f32, f32) -> bool) -> Option<(f32, u32, u32)> {
        let mut best: Option<(f32, usize)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            match best {
                Some((bv, _)) if !better(v, bv) => {}
                _ => best = Some((v, i)),
            }
        }
        best.map(|(v, i)| {
            let w = self.width as usize;
            (v, (i % w) as u32, (i / w) as u32)
        })
    }

    /// Return a copy with every value negated
    pub fn negate(&self) -> FPix {
        FPix {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|v| -v).collect(),
        }
    }

    /// Convert to an integer Pix by rounding and saturating
    ///
    /// # Arguments
    ///
    /// * `out_depth` - Output depth (8, 16, or 32)
    /// * `neg_handling` - How to handle negative values
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if out_depth is not 8, 16, or 32.
    pub fn to_pix(&self, out_depth: u32, neg_handling: NegativeHandling) -> Result<Pix> {
        let depth = match out_depth {
            8 | 16 | 32 => PixelDepth::from_bits(out_depth)?,
            _ => {
                return Err(Error::InvalidParameter(format!(
                    "out_depth must be 8, 16, or 32, got {out_depth}"
                )));
            }
        };
        let max_val = depth.max_value();
        let mut pix = Pix::new(self.width, self.height, depth)?.to_mut();
        pix.set_spp(1);

        for y in 0..self.height {
            for (x, &fval) in self.row(y).iter().enumerate() {
                let fval = if fval < 0.0 {
                    match neg_handling {
                        NegativeHandling::ClipToZero => 0.0,
                        NegativeHandling::TakeAbsValue => fval.abs(),
                    }
                } else {
                    fval
                };
                // `as` saturates for f32 -> u32, and NaN maps to 0
                let ival = ((fval + 0.5) as u32).min(max_val);
                pix.set_pixel_unchecked(x as u32, y, ival);
            }
        }

        Ok(pix.into())
    }
}
