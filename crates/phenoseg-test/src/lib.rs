//! phenoseg-test - Regression test harness
//!
//! Tracks numbered checks inside one regression test and reports every
//! failure at the end instead of stopping at the first one.
//!
//! - **Compare** (default): run the checks only
//! - **Display**: also keep written outputs under `tests/regout` for
//!   visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use phenoseg_test::RegParams;
//!
//! let mut rp = RegParams::new("watershed");
//! rp.compare_values(2.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // phenoseg-test is at crates/phenoseg-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
