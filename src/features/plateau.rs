//! Plateau and peak detection for initiation zone calling.
//!
//! A plateau is a maximal run of equal consecutive values. It is reported
//! when it is a strict local maximum: both existing neighbours are lower.
//! The sequence ends count as lower neighbours.

use super::IndexRange;

/// Plateau peaks only; isolated single-index maxima are not reported.
pub fn find_plateau_peaks<T: PartialOrd>(signal: &[T]) -> Vec<IndexRange> {
    scan(signal, false)
}

/// Plateau peaks plus isolated single-index maxima, in closing order.
///
/// A singleton and a plateau closing at the same step are both kept.
pub fn find_peaks<T: PartialOrd>(signal: &[T]) -> Vec<IndexRange> {
    scan(signal, true)
}

fn scan<T: PartialOrd>(a: &[T], singletons: bool) -> Vec<IndexRange> {
    let n = a.len();
    let mut peaks = Vec::new();
    let mut start: Option<usize> = None;

    for i in 1..n {
        if a[i] == a[i - 1] {
            if start.is_none() {
                start = Some(i - 1);
            }
        } else if let Some(s) = start.take() {
            // a[i] differs from the run, so the right side only needs a[i] < a[s].
            if left_lower(a, s) && a[i] < a[s] {
                peaks.push(IndexRange::new(s, i - 1));
            }
        }

        // Index 0 is never examined here; the scan starts at 1.
        if singletons && a[i - 1] < a[i] && (i == n - 1 || a[i + 1] < a[i]) {
            peaks.push(IndexRange::new(i, i));
        }
    }

    // A run reaching the last index has the sequence end as its right side.
    if let Some(s) = start {
        if left_lower(a, s) {
            peaks.push(IndexRange::new(s, n - 1));
        }
    }

    peaks
}

fn left_lower<T: PartialOrd>(a: &[T], start: usize) -> bool {
    start == 0 || a[start - 1] < a[start]
}
