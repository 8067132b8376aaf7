//! Rightward timing transition region detection.
//!
//! A rightward slope is a non-increasing stretch of the dominant-fraction
//! signal. Internal plateaus are folded into the slope when the signal keeps
//! dropping after them; a plateau followed by a rise ends the slope at the
//! first plateau index.

use super::IndexRange;

pub fn find_rightward_slopes<T: PartialOrd>(a: &[T]) -> Vec<IndexRange> {
    let n = a.len();
    let mut slopes = Vec::new();
    let mut i = 0usize;

    while i + 1 < n {
        while i + 1 < n && a[i] == a[i + 1] {
            i += 1;
        }
        let left = i;

        // `next` is the first index not yet part of the slope.
        let mut next = i + 1;
        while next < n {
            if a[next] < a[next - 1] {
                next += 1;
            } else if a[next] == a[next - 1] {
                let plateau_end = run_end(a, next);
                if plateau_end + 1 < n && a[plateau_end + 1] < a[plateau_end] {
                    next = plateau_end + 1;
                } else {
                    break;
                }
            } else {
                break;
            }
        }

        let end = next - 1;
        if end > left {
            slopes.push(IndexRange::new(left, end));
        }
        i = end + 1;
    }

    slopes
}

/// Last index of the equal-value run containing `from`.
fn run_end<T: PartialOrd>(a: &[T], from: usize) -> usize {
    let mut k = from;
    while k + 1 < a.len() && a[k] == a[k + 1] {
        k += 1;
    }
    k
}
