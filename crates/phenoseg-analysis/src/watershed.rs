//! Watershed analysis step
//!
//! Splits touching objects inside a foreground mask:
//!
//! 1. Euclidean distance transform of the mask
//! 2. Seed markers at the local maxima of the distance
//! 3. Regions flooded from the markers over the negated distance
//! 4. Colored labels, blacked out off the mask, placed next to the source
//!
//! The object count is derived from the markers unless the options ask
//! for the final labels.

use crate::debug::{DebugMode, DebugParams};
use crate::error::{AnalysisError, AnalysisResult};
use crate::options::{CountSource, WatershedOptions};
use crate::result::{AnalysisImage, WatershedAnalysis};
use log::{Level, debug, info, log_enabled, warn};
use phenoseg_color::{color_labels, distinct_labels};
use phenoseg_core::{FPix, NegativeHandling, Pix, PixelDepth, color};
use phenoseg_io::write_image_auto;
use phenoseg_region::{distance_transform, label_areas, seed_markers, seeded_watershed};
use std::path::{Path, PathBuf};

/// Suffix appended to the output path hint
const OUTPUT_SUFFIX: &str = "_watershed.jpg";
const DEBUG_DIST_NAME: &str = "watershed_dist_img.png";
const DEBUG_IMG_NAME: &str = "watershed_img.png";

/// Run marker-controlled watershed segmentation on `image` under `mask`
///
/// # Arguments
///
/// * `image` - 32 bpp RGB source image
/// * `mask` - 1 or 8 bpp foreground mask of the same size
/// * `options` - Seed, growth, palette and count settings
/// * `output_path_hint` - When set, the composite is written as JPEG to
///   the hint with its extension replaced by `_watershed.jpg`
/// * `debug` - Debug output settings; the device counter is advanced when
///   debug output is produced
///
/// # Errors
///
/// Fails on mismatched shapes, unsupported depths, a zero seed distance,
/// and on any failure writing an artifact. An empty mask is not an error:
/// it yields a count of 0.
pub fn watershed_segmentation(
    image: &Pix,
    mask: &Pix,
    options: &WatershedOptions,
    output_path_hint: Option<&Path>,
    debug: &mut DebugParams,
) -> AnalysisResult<WatershedAnalysis> {
    check_inputs(image, mask, options)?;
    if mask.is_zero() {
        warn!("watershed: mask has no foreground");
    }

    let distance = distance_transform(mask)?;
    let markers = seed_markers(&distance, mask, &options.peak_options())?;
    let labels = seeded_watershed(&distance.negate(), &markers, mask, &options.growth_options())?;

    if log_enabled!(Level::Debug) {
        let areas = label_areas(&labels)?;
        debug!(
            "watershed: {} seed markers, {} regions, {} of {} mask pixels labeled",
            label_areas(&markers)?.len(),
            areas.len(),
            areas.values().sum::<u64>(),
            mask.count_nonzero()
        );
    }

    let composite = compose(image, mask, &labels, options.palette_seed)?;

    let counted = match options.count_source {
        CountSource::Markers => &markers,
        CountSource::Labels => &labels,
    };
    let object_count = count_objects(distinct_labels(counted)?.len())?;

    let mut analysis_images = Vec::new();
    if let Some(hint) = output_path_hint {
        let path = output_path(hint);
        write_image_auto(&composite, &path)?;
        info!("watershed: wrote {}", path.display());
        analysis_images.push(AnalysisImage::new("IMAGE", "watershed", path));
    }

    emit_debug(debug, &distance, &composite)?;

    Ok(WatershedAnalysis {
        object_count,
        analysis_images,
        distance,
        markers,
        labels,
        composite,
    })
}

/// Path of the composite written for `hint`: extension replaced by
/// `_watershed.jpg`.
pub fn output_path(hint: &Path) -> PathBuf {
    let mut name = hint.with_extension("").into_os_string();
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

fn check_inputs(image: &Pix, mask: &Pix, options: &WatershedOptions) -> AnalysisResult<()> {
    if image.depth() != PixelDepth::Bit32 {
        return Err(AnalysisError::UnsupportedDepth {
            input: "image",
            expected: "32 bpp",
            actual: image.depth().bits(),
        });
    }
    if !matches!(mask.depth(), PixelDepth::Bit1 | PixelDepth::Bit8) {
        return Err(AnalysisError::UnsupportedDepth {
            input: "mask",
            expected: "1 or 8 bpp",
            actual: mask.depth().bits(),
        });
    }
    if !image.sizes_equal(mask) {
        return Err(AnalysisError::ShapeMismatch {
            image: image.dimensions(),
            mask: mask.dimensions(),
        });
    }
    if options.min_seed_distance == 0 {
        return Err(AnalysisError::InvalidParameters(
            "min_seed_distance must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Objects among `distinct` label values, the background value 0 excluded.
fn count_objects(distinct: usize) -> AnalysisResult<u32> {
    u32::try_from(distinct.saturating_sub(1)).map_err(|_| AnalysisError::CountOverflow(distinct))
}

/// Colored labels with the background blacked out, then the source image
/// to the right.
fn compose(image: &Pix, mask: &Pix, labels: &Pix, seed: u64) -> AnalysisResult<Pix> {
    let mut colored = color_labels(labels, seed)?.into_mut();
    colored.set_unmasked(mask, color::compose_rgb(0, 0, 0))?;
    let colored: Pix = colored.into();
    Ok(colored.concat_horizontal(image)?)
}

fn emit_debug(debug: &mut DebugParams, distance: &FPix, composite: &Pix) -> AnalysisResult<()> {
    if debug.mode == DebugMode::None {
        return Ok(());
    }
    debug.device += 1;
    let dist_img = distance.to_pix(8, NegativeHandling::ClipToZero)?;

    match debug.mode {
        DebugMode::Print => {
            for (pix, name) in [(&dist_img, DEBUG_DIST_NAME), (composite, DEBUG_IMG_NAME)] {
                let path = debug.output_path(name);
                write_image_auto(pix, &path)?;
                info!("watershed: wrote debug image {}", path.display());
            }
        }
        DebugMode::Plot => match debug.viewer_mut() {
            Some(viewer) => {
                viewer.show("watershed distance", &dist_img);
                viewer.show("watershed", composite);
            }
            None => warn!("watershed: plot mode without a viewer"),
        },
        DebugMode::None => {}
    }
    Ok(())
}
