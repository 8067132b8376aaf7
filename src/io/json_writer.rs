use anyhow::{Context, Result};

use crate::genome::{ChromResult, GenomeParams};
use crate::schema::v1::{ClusteringParams, GenomeRunV1};

pub fn build_report(params: &GenomeParams, fractions: usize, results: &[ChromResult]) -> GenomeRunV1 {
    let chromosomes: Vec<_> = results.iter().map(|r| r.summary.clone()).collect();
    let total_features = chromosomes.iter().map(|c| c.features).sum();
    GenomeRunV1 {
        tool: "replifeat-genome".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        feature_type: params.call.feature_kind.to_string(),
        fractions,
        bin_size: params.bin_size,
        label_threshold: params.label_threshold,
        clustering: ClusteringParams {
            threshold: params.call.threshold,
            n_clusters: params.call.n_clusters,
        },
        chromosomes,
        total_features,
    }
}

pub fn render_json(report: &GenomeRunV1) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(report).context("failed to serialize run summary")?;
    bytes.push(b'\n');
    Ok(bytes)
}
