//! Gaussian smoothing for (fractions x bins) Repli-seq matrices.
//!
//! Rows are padded by replicating the first and last fraction. Columns are
//! padded with absent cells, carried in a validity mask, so bins at the
//! chromosome ends are averaged only over the neighbours that exist.
//! Non-finite input cells are treated as absent as well.

use ndarray::Array2;

use crate::error::ReplifeatError;

#[derive(Debug, Clone)]
pub struct GaussianKernel {
    weights: Array2<f64>,
    half_rows: usize,
    half_cols: usize,
}

impl GaussianKernel {
    /// Builds an isotropic kernel of `shape` (rows, cols); both edges must be odd.
    pub fn new(shape: (usize, usize), sigma: f64) -> Result<Self, ReplifeatError> {
        let (kh, kw) = shape;
        if kh == 0 || kw == 0 || kh % 2 == 0 || kw % 2 == 0 {
            return Err(ReplifeatError::Configuration(format!(
                "kernel shape must be odd in both dimensions, got ({}, {})",
                kh, kw
            )));
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ReplifeatError::Configuration(format!(
                "sigma must be a positive finite number, got {}",
                sigma
            )));
        }
        Ok(Self::build(kh, kw, sigma))
    }

    fn build(kh: usize, kw: usize, sigma: f64) -> Self {
        let half_rows = (kh - 1) / 2;
        let half_cols = (kw - 1) / 2;
        let mut weights = Array2::<f64>::zeros((kh, kw));
        for ((r, c), w) in weights.indexed_iter_mut() {
            let y = r as f64 - half_rows as f64;
            let x = c as f64 - half_cols as f64;
            *w = (-(x * x + y * y) / (2.0 * sigma * sigma)).exp();
        }

        let max = weights.iter().cloned().fold(0.0f64, f64::max);
        let cutoff = f64::EPSILON * max;
        weights.mapv_inplace(|w| if w < cutoff { 0.0 } else { w });
        let total = weights.sum();
        weights.mapv_inplace(|w| w / total);

        Self {
            weights,
            half_rows,
            half_cols,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.weights.dim()
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }
}

impl Default for GaussianKernel {
    fn default() -> Self {
        Self::build(3, 3, 1.0)
    }
}

/// Smooths `m` with `kernel`. The output has the shape of `m`.
pub fn gaussian_smoothing(m: &Array2<f64>, kernel: &GaussianKernel) -> Array2<f64> {
    let (n_rows, n_cols) = m.dim();
    let mut out = Array2::<f64>::zeros((n_rows, n_cols));
    if n_rows == 0 || n_cols == 0 {
        return out;
    }

    let (values, valid) = pad(m, kernel.half_rows, kernel.half_cols);
    let (kh, kw) = kernel.shape();

    for i in 0..n_rows {
        for j in 0..n_cols {
            let mut acc = 0.0;
            let mut norm = 0.0;
            for a in 0..kh {
                for b in 0..kw {
                    if !valid[[i + a, j + b]] {
                        continue;
                    }
                    let w = kernel.weights[[a, b]];
                    acc += w * values[[i + a, j + b]];
                    norm += w;
                }
            }
            out[[i, j]] = if norm > 0.0 { acc / norm } else { 0.0 };
        }
    }

    out
}

/// Smooths with the default (3, 3) kernel and sigma 1.
pub fn gaussian_smoothing_default(m: &Array2<f64>) -> Array2<f64> {
    gaussian_smoothing(m, &GaussianKernel::default())
}

fn pad(m: &Array2<f64>, half_rows: usize, half_cols: usize) -> (Array2<f64>, Array2<bool>) {
    let (n_rows, n_cols) = m.dim();
    let padded = (n_rows + 2 * half_rows, n_cols + 2 * half_cols);
    let mut values = Array2::<f64>::zeros(padded);
    let mut valid = Array2::<bool>::from_elem(padded, false);

    for pi in 0..padded.0 {
        // Edge fractions are replicated.
        let src_row = pi.saturating_sub(half_rows).min(n_rows - 1);
        for j in 0..n_cols {
            let v = m[[src_row, j]];
            if v.is_finite() {
                values[[pi, j + half_cols]] = v;
                valid[[pi, j + half_cols]] = true;
            }
        }
    }

    (values, valid)
}
