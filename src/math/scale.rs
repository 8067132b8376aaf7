//! Column-wise percentage scaling.

use ndarray::Array2;

/// Converts every genomic bin (column) into a percentage distribution over
/// the S-phase fractions. Non-finite cells count as zero; a column that sums
/// to zero stays all zero.
pub fn scale(m: &Array2<f64>) -> Array2<f64> {
    let mut out = nan_to_num(m);
    for mut col in out.columns_mut() {
        let total: f64 = col.sum();
        if total == 0.0 || !total.is_finite() {
            col.fill(0.0);
            continue;
        }
        col.mapv_inplace(|v| v / total * 100.0);
    }
    out
}

/// Copies `m`, replacing NaN and infinities with zero.
pub fn nan_to_num(m: &Array2<f64>) -> Array2<f64> {
    m.mapv(|v| if v.is_finite() { v } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn nan_counts_as_zero() {
        let m = array![[f64::NAN, 1.0], [2.0, f64::INFINITY], [2.0, 3.0]];
        let s = scale(&m);
        assert_eq!(s[[0, 0]], 0.0);
        assert!((s[[1, 0]] - 50.0).abs() < 1e-12);
        assert_eq!(s[[1, 1]], 0.0);
        assert!((s[[2, 1]] - 75.0).abs() < 1e-12);
    }
}
