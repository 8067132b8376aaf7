//! Threshold clustering of bins in the manner of BIRCH leaf subclusters.
//!
//! Each bin profile (one column of the prepared matrix) joins the nearest
//! subcluster when the merged radius stays within `threshold`, otherwise it
//! opens a new one. With `n_clusters` set, the subcluster centroids are
//! grouped further with k-means.

use anyhow::Result;
use linfa::DatasetBase;
use linfa::traits::{Fit, Predict};
use linfa_clustering::KMeans;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use tracing::{info, warn};

use super::{BinLabeler, dominant_fraction};
use crate::error::ReplifeatError;

pub const DEFAULT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct BirchLabeler {
    pub threshold: f64,
    pub n_clusters: Option<usize>,
}

/// Fitted clustering: one center per cluster and one label per bin.
#[derive(Debug, Clone)]
pub struct BirchModel {
    /// (clusters x fractions)
    pub centers: Array2<f64>,
    pub labels: Vec<usize>,
    pub n_subclusters: usize,
}

impl BirchModel {
    pub fn dominant_fractions(&self) -> Vec<i64> {
        self.labels
            .iter()
            .map(|&label| dominant_fraction(self.centers.row(label)))
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Subcluster {
    n: usize,
    linear_sum: Array1<f64>,
    squared_sum: f64,
    centroid: Array1<f64>,
}

impl Subcluster {
    fn new(x: ArrayView1<'_, f64>) -> Self {
        Self {
            n: 1,
            linear_sum: x.to_owned(),
            squared_sum: x.dot(&x),
            centroid: x.to_owned(),
        }
    }

    /// Squared radius after absorbing `x`, without mutating.
    fn merged_sq_radius(&self, x: ArrayView1<'_, f64>) -> f64 {
        let n = (self.n + 1) as f64;
        let ls = &self.linear_sum + &x;
        let ss = self.squared_sum + x.dot(&x);
        let centroid = ls / n;
        (ss / n - centroid.dot(&centroid)).max(0.0)
    }

    fn absorb(&mut self, x: ArrayView1<'_, f64>) {
        self.n += 1;
        self.linear_sum += &x;
        self.squared_sum += x.dot(&x);
        self.centroid = &self.linear_sum / self.n as f64;
    }
}

impl Default for BirchLabeler {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            n_clusters: None,
        }
    }
}

impl BirchLabeler {
    pub fn new(threshold: f64, n_clusters: Option<usize>) -> Result<Self, ReplifeatError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ReplifeatError::Configuration(format!(
                "threshold must be a positive finite number, got {}",
                threshold
            )));
        }
        if n_clusters == Some(0) {
            return Err(ReplifeatError::Configuration(
                "n_clusters must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            threshold,
            n_clusters,
        })
    }

    pub fn fit(&self, prepared: &Array2<f64>) -> Result<BirchModel, ReplifeatError> {
        validate(prepared)?;

        // Rows become bins, columns fractions.
        let profiles = prepared.t();
        let limit = self.threshold * self.threshold;

        let mut subclusters: Vec<Subcluster> = Vec::new();
        for x in profiles.axis_iter(Axis(0)) {
            let candidate = nearest(subclusters.iter().map(|s| s.centroid.view()), x);
            match candidate {
                Some(k) if subclusters[k].merged_sq_radius(x) <= limit => subclusters[k].absorb(x),
                _ => subclusters.push(Subcluster::new(x)),
            }
        }

        let n_fractions = prepared.nrows();
        let mut sub_centers = Array2::<f64>::zeros((subclusters.len(), n_fractions));
        for (k, sub) in subclusters.iter().enumerate() {
            sub_centers.row_mut(k).assign(&sub.centroid);
        }

        // Final assignment against the settled centroids.
        let sub_labels: Vec<usize> = profiles
            .axis_iter(Axis(0))
            .map(|x| nearest(sub_centers.axis_iter(Axis(0)), x).unwrap_or(0))
            .collect();

        let n_subclusters = subclusters.len();
        info!(
            bins = sub_labels.len(),
            subclusters = n_subclusters,
            threshold = self.threshold,
            "birch subclusters built"
        );

        match self.n_clusters {
            Some(k) if k < n_subclusters => {
                let (centers, groups) = group_subclusters(&sub_centers, k)?;
                let labels = sub_labels.iter().map(|&s| groups[s]).collect();
                Ok(BirchModel {
                    centers,
                    labels,
                    n_subclusters,
                })
            }
            Some(k) => {
                warn!(
                    requested = k,
                    subclusters = n_subclusters,
                    "fewer subclusters than requested clusters; using subclusters"
                );
                Ok(BirchModel {
                    centers: sub_centers,
                    labels: sub_labels,
                    n_subclusters,
                })
            }
            None => Ok(BirchModel {
                centers: sub_centers,
                labels: sub_labels,
                n_subclusters,
            }),
        }
    }
}

impl BinLabeler for BirchLabeler {
    fn name(&self) -> &'static str {
        "birch"
    }

    fn label_bins(&self, prepared: &Array2<f64>) -> Result<Vec<i64>> {
        let model = self.fit(prepared)?;
        Ok(model.dominant_fractions())
    }
}

fn validate(prepared: &Array2<f64>) -> Result<(), ReplifeatError> {
    let (fractions, bins) = prepared.dim();
    if fractions == 0 || bins == 0 {
        return Err(ReplifeatError::InvalidInput(format!(
            "cannot cluster an empty array of shape ({}, {})",
            fractions, bins
        )));
    }
    if !prepared.iter().all(|v| v.is_finite()) {
        return Err(ReplifeatError::InvalidInput(
            "input array contains NaN or infinite values".to_string(),
        ));
    }
    Ok(())
}

fn nearest<'a, I>(centroids: I, x: ArrayView1<'_, f64>) -> Option<usize>
where
    I: IntoIterator<Item = ArrayView1<'a, f64>>,
{
    let mut best: Option<(usize, f64)> = None;
    for (k, c) in centroids.into_iter().enumerate() {
        let d = sq_distance(c, x);
        match best {
            Some((_, bd)) if bd <= d => {}
            _ => best = Some((k, d)),
        }
    }
    best.map(|(k, _)| k)
}

fn sq_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(p, q)| (p - q) * (p - q)).sum()
}

fn group_subclusters(
    sub_centers: &Array2<f64>,
    n_clusters: usize,
) -> Result<(Array2<f64>, Vec<usize>), ReplifeatError> {
    let dataset = DatasetBase::from(sub_centers.clone());
    let model = KMeans::params(n_clusters)
        .max_n_iterations(200)
        .tolerance(1e-4)
        .fit(&dataset)
        .map_err(|e| ReplifeatError::ClusteringFailure(e.to_string()))?;
    let groups = model.predict(sub_centers).to_vec();
    Ok((model.centroids().to_owned(), groups))
}
