//! Configuration options for contour extraction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options controlling how an engine samples and extracts contours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourOptions {
    /// Whether to split sampling and extraction across rayon worker threads.
    pub parallel: bool,

    /// Minimum number of cell rows handled by one worker band.
    pub min_rows_per_band: usize,

    /// How the two saddle cases are connected.
    pub saddle_rule: SaddleRule,
}

impl Default for ContourOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            min_rows_per_band: 64,
            saddle_rule: SaddleRule::Diagonal,
        }
    }
}

impl ContourOptions {
    /// Parses options from a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Returns a copy with parallel extraction switched on or off.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns a copy using the given saddle rule.
    #[must_use]
    pub fn with_saddle_rule(mut self, rule: SaddleRule) -> Self {
        self.saddle_rule = rule;
        self
    }

    /// Returns a copy with a different minimum band height (clamped to at least 1).
    #[must_use]
    pub fn with_min_rows_per_band(mut self, rows: usize) -> Self {
        self.min_rows_per_band = rows.max(1);
        self
    }
}

/// Disambiguation rule for saddle cells (codes `0101` and `1010`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SaddleRule {
    /// Each segment cuts off one above-level corner; the two above-level corners
    /// are never joined through the cell.
    #[default]
    Diagonal,
    /// Compare the mean of the four corners with the level. When the centre is
    /// above, the above-level corners are joined and the below-level corners are
    /// cut off instead.
    CenterSample,
}
