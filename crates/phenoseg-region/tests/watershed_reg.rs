//! Watershed segmentation regression test
//!
//! Builds synthetic masks, then runs the distance transform, seed
//! extraction and seeded watershed in sequence and checks the regions
//! that come out:
//! 1. Two disjoint squares give two markers and two full-square labels
//! 2. Two overlapping circles joined by a neck are split in two
//! 3. A single square gives one label
//! 4. An all-background mask gives no markers and no labels
//! 5. A small blob against the border is only seeded without border
//!    exclusion
//! 6. A small blob next to a larger one is suppressed by its peak and
//!    left unlabeled
//! 7. A mask with no background has a flat field and no markers
//!
//! Run with:
//! ```
//! cargo test -p phenoseg-region --test watershed_reg
//! ```

use phenoseg_core::{NegativeHandling, Pix, PixelDepth};
use phenoseg_region::{
    ConnectivityType, PeakOptions, WatershedOptions, distance_transform, label_areas,
    seed_markers, seeded_watershed,
};
use phenoseg_test::RegParams;
use std::collections::BTreeSet;

fn mask_with(w: u32, h: u32, inside: impl Fn(u32, u32) -> bool) -> Pix {
    let mut pm = Pix::new(w, h, PixelDepth::Bit1).unwrap().to_mut();
    for y in 0..h {
        for x in 0..w {
            if inside(x, y) {
                pm.set_pixel(x, y, 1).unwrap();
            }
        }
    }
    pm.into()
}

fn in_rect(x: u32, y: u32, x0: u32, y0: u32, side: u32) -> bool {
    x >= x0 && x < x0 + side && y >= y0 && y < y0 + side
}

fn in_circle(x: u32, y: u32, cx: i64, cy: i64, r: i64) -> bool {
    let (dx, dy) = (x as i64 - cx, y as i64 - cy);
    dx * dx + dy * dy <= r * r
}

/// Distance field, markers and labels for `mask`
fn segment(mask: &Pix, peaks: &PeakOptions) -> (Pix, Pix, u32) {
    let dist = distance_transform(mask).expect("distance_transform failed");
    let markers = seed_markers(&dist, mask, peaks).expect("seed_markers failed");
    let labels = seeded_watershed(&dist.negate(), &markers, mask, &WatershedOptions::default())
        .expect("seeded_watershed failed");
    let num_markers = label_areas(&markers).unwrap().len() as u32;
    (markers, labels, num_markers)
}

fn nonzero_values(pix: &Pix) -> BTreeSet<u32> {
    pix.data().iter().copied().filter(|&v| v != 0).collect()
}

#[test]
fn watershed_two_squares() {
    let mut rp = RegParams::new("watershed_squares");

    let mask = mask_with(100, 60, |x, y| in_rect(x, y, 10, 20, 20) || in_rect(x, y, 60, 20, 20));
    let (markers, labels, num_markers) = segment(&mask, &PeakOptions::default());

    rp.compare_values(2.0, num_markers as f64, 0.0);
    let areas = label_areas(&labels).unwrap();
    rp.compare_values(2.0, areas.len() as f64, 0.0);
    for area in areas.values() {
        rp.compare_values(400.0, *area as f64, 0.0);
    }

    // each square is one region, distinct from the other
    let left = labels.get_pixel(10, 20).unwrap();
    let right = labels.get_pixel(79, 39).unwrap();
    rp.compare_values(1.0, if left != 0 && right != 0 && left != right { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(left as f64, labels.get_pixel(29, 39).unwrap() as f64, 0.0);

    // labels only take marker values
    let subset = nonzero_values(&labels).is_subset(&nonzero_values(&markers));
    rp.compare_values(1.0, if subset { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "watershed_squares regression test failed");
}

#[test]
fn watershed_touching_circles() {
    let mut rp = RegParams::new("watershed_circles");

    let mask = mask_with(90, 60, |x, y| {
        in_circle(x, y, 30, 30, 15) || in_circle(x, y, 56, 30, 15)
    });
    let dist = distance_transform(&mask).unwrap();
    let gray = dist.to_pix(8, NegativeHandling::ClipToZero).unwrap();
    rp.compare_values(15.0, gray.get_pixel(30, 30).unwrap() as f64, 0.0);
    rp.write_pix_and_check(&gray).unwrap();

    let (_, labels, num_markers) = segment(&mask, &PeakOptions::default());
    rp.compare_values(2.0, num_markers as f64, 0.0);
    rp.compare_values(2.0, nonzero_values(&labels).len() as f64, 0.0);

    // centers land in different regions, every foreground pixel is claimed
    let a = labels.get_pixel(30, 30).unwrap();
    let b = labels.get_pixel(56, 30).unwrap();
    rp.compare_values(1.0, if a != b { 1.0 } else { 0.0 }, 0.0);
    let total: u64 = label_areas(&labels).unwrap().values().sum();
    rp.compare_values(mask.count_nonzero() as f64, total as f64, 0.0);

    // 8-way growth claims the same pixels
    let markers = seed_markers(&dist, &mask, &PeakOptions::default()).unwrap();
    let eight = seeded_watershed(
        &dist.negate(),
        &markers,
        &mask,
        &WatershedOptions::new().with_connectivity(ConnectivityType::EightWay),
    )
    .unwrap();
    rp.compare_values(mask.count_nonzero() as f64, eight.count_nonzero() as f64, 0.0);

    assert!(rp.cleanup(), "watershed_circles regression test failed");
}

#[test]
fn watershed_single_square() {
    let mut rp = RegParams::new("watershed_single");

    let mask = mask_with(60, 60, |x, y| in_rect(x, y, 15, 15, 30));
    let (_, labels, num_markers) = segment(&mask, &PeakOptions::default());
    rp.compare_values(1.0, num_markers as f64, 0.0);
    let areas = label_areas(&labels).unwrap();
    rp.compare_values(1.0, areas.len() as f64, 0.0);
    rp.compare_values(900.0, areas.get(&1).copied().unwrap_or(0) as f64, 0.0);

    assert!(rp.cleanup(), "watershed_single regression test failed");
}

#[test]
fn watershed_empty_mask() {
    let mut rp = RegParams::new("watershed_empty");

    let mask = Pix::new(40, 30, PixelDepth::Bit8).unwrap();
    let dist = distance_transform(&mask).unwrap();
    rp.compare_values(0.0, dist.max_value().unwrap_or(-1.0) as f64, 0.0);

    let (markers, labels, num_markers) = segment(&mask, &PeakOptions::default());
    rp.compare_values(0.0, num_markers as f64, 0.0);
    rp.compare_values(1.0, if markers.is_zero() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if labels.is_zero() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "watershed_empty regression test failed");
}

#[test]
fn watershed_border_blob() {
    let mut rp = RegParams::new("watershed_border");

    let mask = mask_with(80, 60, |x, y| in_rect(x, y, 30, 20, 20) || in_rect(x, y, 1, 1, 4));

    // the corner blob peaks within the exclusion band and stays unlabeled
    let (_, labels, num_markers) = segment(&mask, &PeakOptions::default());
    rp.compare_values(1.0, num_markers as f64, 0.0);
    rp.compare_values(0.0, labels.get_pixel(2, 2).unwrap() as f64, 0.0);
    rp.compare_values(400.0, labels.count_nonzero() as f64, 0.0);

    let keep_border = PeakOptions::new().with_exclude_border(false);
    let (_, labels, num_markers) = segment(&mask, &keep_border);
    rp.compare_values(2.0, num_markers as f64, 0.0);
    rp.compare_values(416.0, labels.count_nonzero() as f64, 0.0);

    assert!(rp.cleanup(), "watershed_border regression test failed");
}

#[test]
fn watershed_suppressed_small_blob() {
    let mut rp = RegParams::new("watershed_suppressed");

    // 3x3 blob three pixels right of a 30x30 square
    let square = |x, y| in_rect(x, y, 20, 20, 30);
    let mask = mask_with(100, 70, |x, y| square(x, y) || in_rect(x, y, 52, 33, 3));
    let alone = mask_with(100, 70, square);

    let (markers, labels, num_markers) = segment(&mask, &PeakOptions::default());
    let (_, _, alone_markers) = segment(&alone, &PeakOptions::default());
    rp.compare_values(alone_markers as f64, num_markers as f64, 0.0);
    rp.compare_values(1.0, num_markers as f64, 0.0);

    let blob_markers = (33..36)
        .flat_map(|y| (52..55).map(move |x| (x, y)))
        .filter(|&(x, y)| markers.get_pixel(x, y) != Some(0))
        .count();
    rp.compare_values(0.0, blob_markers as f64, 0.0);
    let blob_labels = (33..36)
        .flat_map(|y| (52..55).map(move |x| (x, y)))
        .filter(|&(x, y)| labels.get_pixel(x, y) != Some(0))
        .count();
    rp.compare_values(0.0, blob_labels as f64, 0.0);
    rp.compare_values(900.0, labels.count_nonzero() as f64, 0.0);

    // a window narrower than the gap seeds the blob too
    let narrow = PeakOptions::new().with_min_distance(2);
    let (_, labels, num_markers) = segment(&mask, &narrow);
    rp.compare_values(2.0, num_markers as f64, 0.0);
    rp.compare_values(909.0, labels.count_nonzero() as f64, 0.0);

    assert!(rp.cleanup(), "watershed_suppressed regression test failed");
}

#[test]
fn watershed_full_mask() {
    let mut rp = RegParams::new("watershed_full");

    let mask = mask_with(60, 60, |_, _| true);
    let dist = distance_transform(&mask).unwrap();
    rp.compare_values(1.0, if dist.min_value() == dist.max_value() { 1.0 } else { 0.0 }, 0.0);

    let keep_border = PeakOptions::new().with_exclude_border(false);
    let (markers, labels, num_markers) = segment(&mask, &keep_border);
    rp.compare_values(0.0, num_markers as f64, 0.0);
    rp.compare_values(1.0, if markers.is_zero() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if labels.is_zero() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "watershed_full regression test failed");
}
