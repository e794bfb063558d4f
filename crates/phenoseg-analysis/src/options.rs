//! Options for the watershed analysis step

use phenoseg_color::DEFAULT_PALETTE_SEED;
use phenoseg_region::{ConnectivityType, PeakOptions};

/// What the estimated object count is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountSource {
    /// Distinct seed marker values, minus one for the background
    #[default]
    Markers,
    /// Distinct final label values, minus one for the background
    Labels,
}

/// Options for [`watershed_segmentation`](crate::watershed_segmentation)
#[derive(Debug, Clone)]
pub struct WatershedOptions {
    /// Minimum separation of seed peaks, in pixels (must be >= 1)
    pub min_seed_distance: u32,
    /// Ignore peaks within `min_seed_distance` of the image edge
    pub exclude_border: bool,
    /// Neighborhood used when growing regions
    pub connectivity: ConnectivityType,
    /// Seed for the label palette shuffle
    pub palette_seed: u64,
    /// Source of the estimated object count
    pub count_source: CountSource,
}

impl Default for WatershedOptions {
    fn default() -> Self {
        Self {
            min_seed_distance: 10,
            exclude_border: true,
            connectivity: ConnectivityType::FourWay,
            palette_seed: DEFAULT_PALETTE_SEED,
            count_source: CountSource::Markers,
        }
    }
}

impl WatershedOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum seed separation
    pub fn with_min_seed_distance(mut self, distance: u32) -> Self {
        self.min_seed_distance = distance;
        self
    }

    /// Set border exclusion for seeds
    pub fn with_exclude_border(mut self, exclude: bool) -> Self {
        self.exclude_border = exclude;
        self
    }

    /// Set growth connectivity
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set palette seed
    pub fn with_palette_seed(mut self, seed: u64) -> Self {
        self.palette_seed = seed;
        self
    }

    /// Set count source
    pub fn with_count_source(mut self, source: CountSource) -> Self {
        self.count_source = source;
        self
    }

    pub(crate) fn peak_options(&self) -> PeakOptions {
        PeakOptions::new()
            .with_min_distance(self.min_seed_distance)
            .with_exclude_border(self.exclude_border)
    }

    pub(crate) fn growth_options(&self) -> phenoseg_region::WatershedOptions {
        phenoseg_region::WatershedOptions::new().with_connectivity(self.connectivity)
    }
}
