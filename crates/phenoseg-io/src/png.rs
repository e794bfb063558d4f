//! PNG image format support
//!
//! Reads 1/8-bit grayscale and 8-bit RGB(A) PNGs; writes 1, 8 and 32 bpp
//! images. 32 bpp label images are not meaningful as PNG and are written
//! as RGB, so callers convert them first.

use crate::{IoError, IoResult};
use phenoseg_core::{ImageFormat, Pix, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let (pix_depth, spp) = match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => (PixelDepth::Bit1, 1),
        (ColorType::Grayscale, BitDepth::Eight) => (PixelDepth::Bit8, 1),
        (ColorType::Rgb, BitDepth::Eight) => (PixelDepth::Bit32, 3),
        (ColorType::Rgba, BitDepth::Eight) => (PixelDepth::Bit32, 4),
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = Pix::new(width, height, pix_depth)?.to_mut();
    pix_mut.set_spp(spp);
    pix_mut.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..];
        for x in 0..width {
            let xi = x as usize;
            let val = match (pix_depth, spp) {
                (PixelDepth::Bit1, _) => ((row[xi / 8] >> (7 - (xi % 8))) & 1) as u32,
                (PixelDepth::Bit8, _) => row[xi] as u32,
                (_, 3) => color::compose_rgb(row[xi * 3], row[xi * 3 + 1], row[xi * 3 + 2]),
                _ => color::compose_rgba(
                    row[xi * 4],
                    row[xi * 4 + 1],
                    row[xi * 4 + 2],
                    row[xi * 4 + 3],
                ),
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for depths other than 1, 8 and 32.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth, bytes_per_row) = match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One, width.div_ceil(8)),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight, width),
        PixelDepth::Bit32 if pix.spp() == 4 => (ColorType::Rgba, BitDepth::Eight, width * 4),
        PixelDepth::Bit32 => (ColorType::Rgb, BitDepth::Eight, width * 3),
        d => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNG output for {} bpp",
                d.bits()
            )));
        }
    };
    let bytes_per_row = bytes_per_row as usize;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let xi = x as usize;
            let pixel = pix.get_pixel_unchecked(x, y);
            match color_type {
                ColorType::Grayscale if bit_depth == BitDepth::One => {
                    if pixel != 0 {
                        row[xi / 8] |= 1 << (7 - (xi % 8));
                    }
                }
                ColorType::Grayscale => row[xi] = pixel as u8,
                ColorType::Rgb => {
                    let (r, g, b) = color::extract_rgb(pixel);
                    row[xi * 3..xi * 3 + 3].copy_from_slice(&[r, g, b]);
                }
                _ => {
                    let (r, g, b, a) = color::extract_rgba(pixel);
                    row[xi * 4..xi * 4 + 4].copy_from_slice(&[r, g, b, a]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
