pub mod plateau;
pub mod slope;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ReplifeatError;

pub use plateau::{find_peaks, find_plateau_peaks};
pub use slope::find_rightward_slopes;

/// Inclusive `[start, end]` index pair into a dominant-fraction signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize,
}

impl IndexRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeatureKind {
    #[serde(rename = "IZ")]
    Iz,
    #[serde(rename = "rightwardTTR")]
    RightwardTtr,
}

impl FeatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Iz => "IZ",
            FeatureKind::RightwardTtr => "rightwardTTR",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureKind {
    type Err = ReplifeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IZ" => Ok(FeatureKind::Iz),
            "rightwardTTR" => Ok(FeatureKind::RightwardTtr),
            other => Err(ReplifeatError::Configuration(format!(
                "Invalid feature_type '{}'. Options are 'IZ' or 'rightwardTTR'.",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub kind: FeatureKind,
    pub range: IndexRange,
}

/// Runs the detector for `kind` over `signal`, tagging every range.
pub fn detect<T: PartialOrd>(kind: FeatureKind, signal: &[T]) -> Vec<Feature> {
    let ranges = match kind {
        FeatureKind::Iz => find_peaks(signal),
        FeatureKind::RightwardTtr => find_rightward_slopes(signal),
    };
    ranges
        .into_iter()
        .map(|range| Feature { kind, range })
        .collect()
}

/// Renders ranges as `[[s, e], ...]`.
pub fn format_ranges(ranges: &[IndexRange]) -> String {
    let parts: Vec<String> = ranges
        .iter()
        .map(|r| format!("[{}, {}]", r.start, r.end))
        .collect();
    format!("[{}]", parts.join(", "))
}
