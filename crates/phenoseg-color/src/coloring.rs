//! Pseudo-coloring of label images

use crate::error::{ColorError, ColorResult};
use crate::palette::color_palette;
use phenoseg_core::{Pix, PixelDepth, color};
use std::collections::BTreeSet;

/// Collect the distinct values of a 32 bpp label image, ascending.
pub fn distinct_labels(labels: &Pix) -> ColorResult<Vec<u32>> {
    check_label_depth(labels)?;
    let mut values = BTreeSet::new();
    for y in 0..labels.height() {
        values.extend(labels.row_data(y).iter().copied());
    }
    Ok(values.into_iter().collect())
}

/// Render a label image as 32 bpp RGB.
///
/// The palette is built once, sized to the number of distinct labels
/// (0 included). A label takes the palette entry at its rank among the
/// distinct values, so sparse label ids never index past the palette.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedDepth`] unless `labels` is 32 bpp.
pub fn color_labels(labels: &Pix, seed: u64) -> ColorResult<Pix> {
    let values = distinct_labels(labels)?;
    let palette: Vec<u32> = color_palette(values.len(), seed)
        .into_iter()
        .map(|(r, g, b)| color::compose_rgb(r, g, b))
        .collect();

    let mut out = Pix::new(labels.width(), labels.height(), PixelDepth::Bit32)?.to_mut();
    for y in 0..labels.height() {
        for (x, label) in labels.row_data(y).iter().enumerate() {
            // every label is present in `values` by construction
            let rank = values.binary_search(label).unwrap_or(0);
            out.set_pixel_unchecked(x as u32, y, palette[rank]);
        }
    }
    Ok(out.into())
}

fn check_label_depth(labels: &Pix) -> ColorResult<()> {
    if labels.depth() != PixelDepth::Bit32 {
        return Err(ColorError::UnsupportedDepth {
            expected: "32 bpp",
            actual: labels.depth().bits(),
        });
    }
    Ok(())
}
