//! Pixel access functions
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. In a 1-bit image,
//! pixel 0 occupies bit 31 of the first word; in an 8-bit image it occupies
//! bits 24..32.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Read the pixel at column `x` from a packed row.
#[inline]
pub fn get_data(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    let d = depth.bits();
    if d == 32 {
        return line[x as usize];
    }
    let bit = x * d;
    let word = line[(bit / 32) as usize];
    let shift = 32 - d - (bit % 32);
    (word >> shift) & depth.max_value()
}

/// Write the pixel at column `x` in a packed row.
///
/// `val` is masked to the depth.
#[inline]
pub fn set_data(line: &mut [u32], x: u32, depth: PixelDepth, val: u32) {
    let d = depth.bits();
    if d == 32 {
        line[x as usize] = val;
        return;
    }
    let bit = x * d;
    let idx = (bit / 32) as usize;
    let shift = 32 - d - (bit % 32);
    let mask = depth.max_value() << shift;
    line[idx] = (line[idx] & !mask) | ((val << shift) & mask);
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_data(self.row_data(y), x, self.depth())
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Count pixels with a nonzero value.
    pub fn count_nonzero(&self) -> u64 {
        let mut count = 0u64;
        for y in 0..self.height() {
            let line = self.row_data(y);
            for x in 0..self.width() {
                if get_data(line, x, self.depth()) != 0 {
                    count += 1;
                }
            }
        }
        count
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        let wpl = self.wpl() as usize;
        let start = (y as usize) * wpl;
        get_data(&self.data()[start..start + wpl], x, self.depth())
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinates are outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        set_data(self.row_data_mut(y), x, depth, val);
    }

    /// Set RGB values at (x, y) with alpha 255.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not 32 bpp or (x, y) is out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }
}
