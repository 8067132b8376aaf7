use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringParams {
    pub threshold: f64,
    pub n_clusters: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChromSummary {
    pub chrom: String,
    pub bins: usize,
    pub signal_levels: usize,
    pub features: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeRunV1 {
    pub tool: String,
    pub version: String,
    pub feature_type: String,
    pub fractions: usize,
    pub bin_size: u64,
    pub label_threshold: f64,
    pub clustering: ClusteringParams,
    pub chromosomes: Vec<ChromSummary>,
    pub total_features: usize,
}
