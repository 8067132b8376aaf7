//! Grouping of genomic bins by temporal profile.
//!
//! The detectors only need one scalar per bin. `BinLabeler` is the seam:
//! any clustering routine that is deterministic and keeps column order can
//! stand in for the BIRCH-style default.

pub mod birch;

use anyhow::Result;
use ndarray::{Array2, ArrayView1};

pub use birch::BirchLabeler;

pub trait BinLabeler {
    fn name(&self) -> &'static str;

    /// One dominant-fraction value per column of `prepared` (fractions x bins).
    fn label_bins(&self, prepared: &Array2<f64>) -> Result<Vec<i64>>;
}

/// Negated index of the largest entry; the first index wins ties.
///
/// Larger results mean earlier fractions, so early-firing bins form peaks.
pub fn dominant_fraction(center: ArrayView1<'_, f64>) -> i64 {
    let mut best = 0usize;
    for (k, v) in center.iter().enumerate() {
        if *v > center[best] {
            best = k;
        }
    }
    -(best as i64)
}
