use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ndarray::{Array2, ArrayD, Ix2};
use ndarray_npy::{read_npy, write_npy};

use crate::error::ReplifeatError;
use crate::features::{FeatureKind, IndexRange};

/// Loads a 2-D float array (fractions x bins) stored as f64 or f32.
pub fn read_matrix(path: &Path) -> Result<Array2<f64>> {
    let array: ArrayD<f64> = match read_npy::<_, ArrayD<f64>>(path) {
        Ok(a) => a,
        Err(f64_err) => match read_npy::<_, ArrayD<f32>>(path) {
            Ok(a) => a.mapv(f64::from),
            Err(_) => {
                return Err(f64_err)
                    .with_context(|| format!("failed to read array from {}", path.display()));
            }
        },
    };

    let ndim = array.ndim();
    let matrix = array.into_dimensionality::<Ix2>().map_err(|_| {
        ReplifeatError::InvalidInput(format!(
            "expected a 2-D array in {}, found {} dimension(s)",
            path.display(),
            ndim
        ))
    })?;
    Ok(matrix)
}

/// Writes ranges as an (n, 2) i64 array; no features gives shape (0, 2).
pub fn write_indices(path: &Path, ranges: &[IndexRange]) -> Result<()> {
    let flat: Vec<i64> = ranges
        .iter()
        .flat_map(|r| [r.start as i64, r.end as i64])
        .collect();
    let array = Array2::from_shape_vec((ranges.len(), 2), flat)?;
    write_npy(path, &array).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

pub fn read_indices(path: &Path) -> Result<Vec<IndexRange>> {
    let array: Array2<i64> =
        read_npy(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut ranges = Vec::with_capacity(array.nrows());
    for row in array.rows() {
        if row.len() != 2 || row[0] < 0 || row[1] < row[0] {
            return Err(ReplifeatError::InvalidInput(format!(
                "malformed index row {:?} in {}",
                row.to_vec(),
                path.display()
            ))
            .into());
        }
        ranges.push(IndexRange::new(row[0] as usize, row[1] as usize));
    }
    Ok(ranges)
}

/// `<input without extension>_<kind>Indices.npy`
pub fn default_output_path(input: &Path, kind: FeatureKind) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("input");
    input.with_file_name(format!("{}_{}Indices.npy", stem, kind.as_str()))
}
