//! Genomic coordinates and qualitative timing for called features.

use std::fmt;

use ndarray::Array2;
use serde::Serialize;

use crate::features::Feature;

pub const DEFAULT_LABEL_THRESHOLD: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingLabel {
    Early,
    EarlyMid,
    LateMid,
    Late,
}

impl TimingLabel {
    /// Buckets a 0-based S-phase fraction index.
    pub fn from_fraction(fraction: usize) -> Self {
        match fraction {
            0..=2 => TimingLabel::Early,
            3..=5 => TimingLabel::EarlyMid,
            6..=8 => TimingLabel::LateMid,
            _ => TimingLabel::Late,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimingLabel::Early => "early",
            TimingLabel::EarlyMid => "earlymid",
            TimingLabel::LateMid => "latemid",
            TimingLabel::Late => "late",
        }
    }
}

impl fmt::Display for TimingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Genomic interval of one bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinCoord {
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureCall {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub timing: TimingLabel,
}

/// First fraction whose signal in `bin` exceeds `threshold`.
pub fn emerging_fraction(m: &Array2<f64>, bin: usize, threshold: f64) -> Option<usize> {
    if bin >= m.ncols() {
        return None;
    }
    m.column(bin).iter().position(|&v| v > threshold)
}

/// Onset fraction for a feature: its first bin, then the bin after its end,
/// then the last fraction.
pub fn onset_fraction(m: &Array2<f64>, feature: &Feature, threshold: f64) -> usize {
    emerging_fraction(m, feature.range.start, threshold)
        .or_else(|| emerging_fraction(m, feature.range.end + 1, threshold))
        .unwrap_or_else(|| m.nrows().saturating_sub(1))
}

pub fn label_feature(
    chrom: &str,
    bins: &[BinCoord],
    prepared: &Array2<f64>,
    feature: &Feature,
    threshold: f64,
) -> Option<FeatureCall> {
    let first = bins.get(feature.range.start)?;
    let last = bins.get(feature.range.end)?;
    let onset = onset_fraction(prepared, feature, threshold);
    Some(FeatureCall {
        chrom: chrom.to_string(),
        start: first.start,
        end: last.end,
        timing: TimingLabel::from_fraction(onset),
    })
}
