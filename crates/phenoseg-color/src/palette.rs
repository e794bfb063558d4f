//! Color palettes
//!
//! A palette of `n` colors samples the jet colormap at `n` evenly spaced
//! points and shuffles them, so neighboring label ids rarely get similar
//! hues. The shuffle is driven by a seeded generator and is reproducible.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Seed used when the caller does not pick one
pub const DEFAULT_PALETTE_SEED: u64 = 0x5eed_1eaf;

/// Sample the jet colormap at `t` in `[0, 1]` (clamped).
pub fn jet(t: f32) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let channel = |center: f32| {
        let v = (1.5 - (4.0 * t - center).abs()).clamp(0.0, 1.0);
        (v * 255.0 + 0.5) as u8
    };
    (channel(3.0), channel(2.0), channel(1.0))
}

/// Generate `num` colors: jet samples, shuffled with `seed`.
///
/// Returns an empty palette for `num == 0`.
pub fn color_palette(num: usize, seed: u64) -> Vec<(u8, u8, u8)> {
    let mut colors: Vec<(u8, u8, u8)> = match num {
        0 => Vec::new(),
        1 => vec![jet(0.0)],
        _ => (0..num)
            .map(|i| jet(i as f32 / (num - 1) as f32))
            .collect(),
    };
    let mut rng = StdRng::seed_from_u64(seed);
    colors.shuffle(&mut rng);
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jet_endpoints() {
        assert_eq!(jet(0.0), (0, 0, 128));
        assert_eq!(jet(0.5), (128, 255, 128));
        assert_eq!(jet(1.0), (128, 0, 0));
        assert_eq!(jet(-1.0), jet(0.0));
    }

    #[test]
    fn test_palette_size_and_content() {
        let p = color_palette(7, DEFAULT_PALETTE_SEED);
        assert_eq!(p.len(), 7);
        let mut sorted = p.clone();
        sorted.sort();
        let mut expected: Vec<_> = (0..7).map(|i| jet(i as f32 / 6.0)).collect();
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_palette_reproducible() {
        assert_eq!(color_palette(20, 42), color_palette(20, 42));
        assert!(color_palette(0, 42).is_empty());
        assert_eq!(color_palette(1, 42), vec![jet(0.0)]);
    }
}
