use ndarray::Array2;
use tracing::debug;

use crate::math::scale::scale;
use crate::math::smooth::{GaussianKernel, gaussian_smoothing};

/// Raw fraction signal to the clustering input: scale, smooth, scale again.
pub fn prepare_matrix(raw: &Array2<f64>, kernel: &GaussianKernel) -> Array2<f64> {
    let (fractions, bins) = raw.dim();
    debug!(fractions, bins, "preparing matrix");
    let scaled = scale(raw);
    let smoothed = gaussian_smoothing(&scaled, kernel);
    scale(&smoothed)
}
