//! Debug output parameters
//!
//! A pipeline threads one [`DebugParams`] through its analysis steps. In
//! `Print` mode a step writes its intermediate images to the output
//! directory, prefixed with the device counter; in `Plot` mode it hands
//! them to an [`ImageViewer`].

use crate::error::AnalysisError;
use phenoseg_core::Pix;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Debug output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugMode {
    /// No debug output
    #[default]
    None,
    /// Write intermediate images to the output directory
    Print,
    /// Show intermediate images in the configured viewer
    Plot,
}

impl FromStr for DebugMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "print" => Ok(Self::Print),
            "plot" => Ok(Self::Plot),
            other => Err(AnalysisError::InvalidParameters(format!(
                "unknown debug mode '{other}'"
            ))),
        }
    }
}

impl fmt::Display for DebugMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Print => "print",
            Self::Plot => "plot",
        };
        f.write_str(name)
    }
}

/// Receiver for images shown in `Plot` mode
pub trait ImageViewer {
    /// Display one image under a title
    fn show(&mut self, title: &str, pix: &Pix);
}

/// Debug state shared by the analysis steps of one pipeline run
pub struct DebugParams {
    /// Output mode
    pub mode: DebugMode,
    /// Directory for `Print` output; must exist
    pub outdir: PathBuf,
    /// Step counter used as file name prefix
    pub device: u32,
    viewer: Option<Box<dyn ImageViewer>>,
}

impl fmt::Debug for DebugParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugParams")
            .field("mode", &self.mode)
            .field("outdir", &self.outdir)
            .field("device", &self.device)
            .field("viewer", &self.viewer.is_some())
            .finish()
    }
}

impl Default for DebugParams {
    fn default() -> Self {
        Self {
            mode: DebugMode::None,
            outdir: PathBuf::from("."),
            device: 0,
            viewer: None,
        }
    }
}

impl DebugParams {
    /// Create new parameters with debug output off
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output mode
    pub fn with_mode(mut self, mode: DebugMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set output directory
    pub fn with_outdir<P: AsRef<Path>>(mut self, outdir: P) -> Self {
        self.outdir = outdir.as_ref().to_path_buf();
        self
    }

    /// Set device counter
    pub fn with_device(mut self, device: u32) -> Self {
        self.device = device;
        self
    }

    /// Set viewer for `Plot` mode
    pub fn with_viewer<V: ImageViewer + 'static>(mut self, viewer: V) -> Self {
        self.viewer = Some(Box::new(viewer));
        self
    }

    /// Viewer for `Plot` mode, if one is configured
    pub fn viewer_mut(&mut self) -> Option<&mut (dyn ImageViewer + 'static)> {
        self.viewer.as_deref_mut()
    }

    /// `<outdir>/<device>_<name>`
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.outdir.join(format!("{}_{}", self.device, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("print".parse::<DebugMode>().unwrap(), DebugMode::Print);
        assert_eq!("PLOT".parse::<DebugMode>().unwrap(), DebugMode::Plot);
        assert_eq!("none".parse::<DebugMode>().unwrap(), DebugMode::None);
        assert!("verbose".parse::<DebugMode>().is_err());
        assert_eq!(DebugMode::Print.to_string(), "print");
    }

    #[test]
    fn test_output_path() {
        let params = DebugParams::new().with_outdir("/tmp/dbg").with_device(7);
        assert_eq!(
            params.output_path("watershed_img.png"),
            PathBuf::from("/tmp/dbg/7_watershed_img.png")
        );
    }

    #[test]
    fn test_viewer() {
        struct Nothing;
        impl ImageViewer for Nothing {
            fn show(&mut self, _title: &str, _pix: &Pix) {}
        }
        let mut params = DebugParams::new();
        assert!(params.viewer_mut().is_none());
        let mut params = DebugParams::new().with_viewer(Nothing);
        assert!(params.viewer_mut().is_some());
        assert!(format!("{params:?}").contains("viewer: true"));
    }
}
