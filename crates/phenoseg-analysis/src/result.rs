//! Result record of the watershed analysis step

use phenoseg_core::{FPix, Pix};
use std::path::{Path, PathBuf};

/// Tag of the header row
pub const HEADER_TAG: &str = "HEADER_WATERSHED";
/// Tag of the data row
pub const DATA_TAG: &str = "WATERSHED_DATA";
/// Name of the single measured trait
pub const OBJECT_COUNT_FIELD: &str = "estimated_object_count";

/// An artifact written by an analysis step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisImage {
    /// Artifact kind, e.g. `"IMAGE"`
    pub kind: String,
    /// Short name of the artifact
    pub label: String,
    /// Where it was written
    pub path: PathBuf,
}

impl AnalysisImage {
    pub fn new(kind: &str, label: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            kind: kind.to_string(),
            label: label.to_string(),
            path: path.into(),
        }
    }

    /// `(kind, label, path)`
    pub fn as_tuple(&self) -> (&str, &str, &Path) {
        (&self.kind, &self.label, &self.path)
    }
}

/// Everything one watershed analysis produces
///
/// The header, data and artifact list are the values a phenotyping
/// pipeline records; the images are kept for callers that continue
/// processing.
#[derive(Debug, Clone)]
pub struct WatershedAnalysis {
    pub(crate) object_count: u32,
    pub(crate) analysis_images: Vec<AnalysisImage>,
    pub(crate) distance: FPix,
    pub(crate) markers: Pix,
    pub(crate) labels: Pix,
    pub(crate) composite: Pix,
}

impl WatershedAnalysis {
    /// `("HEADER_WATERSHED", "estimated_object_count")`
    pub fn header(&self) -> (&'static str, &'static str) {
        (HEADER_TAG, OBJECT_COUNT_FIELD)
    }

    /// `("WATERSHED_DATA", count)`
    pub fn data(&self) -> (&'static str, u32) {
        (DATA_TAG, self.object_count)
    }

    /// Artifacts written during the call, in write order
    pub fn analysis_images(&self) -> &[AnalysisImage] {
        &self.analysis_images
    }

    pub fn object_count(&self) -> u32 {
        self.object_count
    }

    /// Euclidean distance field of the mask
    pub fn distance(&self) -> &FPix {
        &self.distance
    }

    /// 32 bpp seed markers
    pub fn markers(&self) -> &Pix {
        &self.markers
    }

    /// 32 bpp region labels
    pub fn labels(&self) -> &Pix {
        &self.labels
    }

    /// Colored labels next to the source image
    pub fn composite(&self) -> &Pix {
        &self.composite
    }
}
