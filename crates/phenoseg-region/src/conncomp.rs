//! Connected component analysis
//!
//! Labels connected foreground regions of a mask. Labels are assigned in
//! raster-scan order of each component's first pixel, starting at 1.

use crate::error::{RegionError, RegionResult};
use phenoseg_core::{Pix, PixelDepth};
use std::collections::{BTreeMap, VecDeque};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

const FOUR_WAY: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
const EIGHT_WAY: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl ConnectivityType {
    /// Neighbor offsets `(dx, dy)` in raster order.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &FOUR_WAY,
            ConnectivityType::EightWay => &EIGHT_WAY,
        }
    }

    /// In-bounds neighbors of (x, y) in a `width` x `height` grid.
    pub fn neighbors(
        self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> impl Iterator<Item = (u32, u32)> {
        self.offsets().iter().filter_map(move |&(dx, dy)| {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            (nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64)
                .then_some((nx as u32, ny as u32))
        })
    }
}

/// Label all connected components in a mask
///
/// # Arguments
///
/// * `pix` - 1 or 8 bpp mask; nonzero pixels are foreground
/// * `connectivity` - Connectivity type
///
/// # Returns
///
/// A 32-bit image where each foreground pixel holds the label of its
/// component and background pixels hold 0.
pub fn label_connected_components(pix: &Pix, connectivity: ConnectivityType) -> RegionResult<Pix> {
    if !matches!(pix.depth(), PixelDepth::Bit1 | PixelDepth::Bit8) {
        return Err(RegionError::UnsupportedDepth {
            expected: "1 or 8 bpp",
            actual: pix.depth().bits(),
        });
    }

    let (width, height) = pix.dimensions();
    let mut labeled = Pix::new(width, height, PixelDepth::Bit32)?.to_mut();
    labeled.set_spp(1);

    let mut next_label = 0u32;
    let mut queue = VecDeque::new();

    for y in 0..height {
        for x in 0..width {
            if pix.get_pixel_unchecked(x, y) == 0 || labeled.get_pixel_unchecked(x, y) != 0 {
                continue;
            }
            next_label += 1;
            labeled.set_pixel_unchecked(x, y, next_label);
            queue.push_back((x, y));

            while let Some((cx, cy)) = queue.pop_front() {
                for (nx, ny) in connectivity.neighbors(cx, cy, width, height) {
                    if pix.get_pixel_unchecked(nx, ny) != 0
                        && labeled.get_pixel_unchecked(nx, ny) == 0
                    {
                        labeled.set_pixel_unchecked(nx, ny, next_label);
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
    }

    Ok(labeled.into())
}

/// Pixel count of every nonzero label in a 32 bpp label image
pub fn label_areas(labeled: &Pix) -> RegionResult<BTreeMap<u32, u64>> {
    if labeled.depth() != PixelDepth::Bit32 {
        return Err(RegionError::UnsupportedDepth {
            expected: "32 bpp",
            actual: labeled.depth().bits(),
        });
    }
    let mut areas = BTreeMap::new();
    for y in 0..labeled.height() {
        for &label in labeled.row_data(y) {
            if label != 0 {
                *areas.entry(label).or_insert(0u64) += 1;
            }
        }
    }
    Ok(areas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal_pair() -> Pix {
        let mut pm = Pix::new(4, 4, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_pixel(0, 0, 1).unwrap();
        pm.set_pixel(1, 1, 1).unwrap();
        pm.set_pixel(3, 0, 1).unwrap();
        pm.into()
    }

    #[test]
    fn test_four_way_splits_diagonals() {
        let labeled = label_connected_components(&diagonal_pair(), ConnectivityType::FourWay)
            .unwrap();
        assert_eq!(labeled.get_pixel(0, 0), Some(1));
        assert_eq!(labeled.get_pixel(3, 0), Some(2));
        assert_eq!(labeled.get_pixel(1, 1), Some(3));
    }

    #[test]
    fn test_eight_way_joins_diagonals() {
        let labeled = label_connected_components(&diagonal_pair(), ConnectivityType::EightWay)
            .unwrap();
        assert_eq!(labeled.get_pixel(0, 0), Some(1));
        assert_eq!(labeled.get_pixel(1, 1), Some(1));
        assert_eq!(labeled.get_pixel(3, 0), Some(2));
        let areas = label_areas(&labeled).unwrap();
        assert_eq!(areas.get(&1), Some(&2));
        assert_eq!(areas.get(&2), Some(&1));
        assert_eq!(areas.len(), 2);
    }

    #[test]
    fn test_neighbors_clip_at_edges() {
        let corner: Vec<_> = ConnectivityType::EightWay.neighbors(0, 0, 3, 3).collect();
        assert_eq!(corner, vec![(1, 0), (0, 1), (1, 1)]);
        let middle = ConnectivityType::FourWay.neighbors(1, 1, 3, 3).count();
        assert_eq!(middle, 4);
    }

    #[test]
    fn test_rejects_label_depth() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(label_connected_components(&pix, ConnectivityType::FourWay).is_err());
    }
}
