//! Whole-genome calling from one bedgraph track per S-phase fraction.

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{Context, Result};
use ndarray::Array2;
use tracing::{info, warn};

#[cfg(feature = "mt")]
use rayon::prelude::*;

use crate::cluster::BirchLabeler;
use crate::ctx::{CallParams, Ctx};
use crate::error::ReplifeatError;
use crate::io::bedgraph::BedgraphRecord;
use crate::labels::{BinCoord, FeatureCall, label_feature};
use crate::pipeline::Pipeline;
use crate::pipeline::stage2_prepare::Stage2Prepare;
use crate::pipeline::stage3_cluster::Stage3Cluster;
use crate::pipeline::stage4_features::Stage4Features;
use crate::schema::v1::ChromSummary;

pub const DEFAULT_BIN_SIZE: u64 = 50_000;

#[derive(Debug, Clone)]
pub struct GenomeParams {
    pub call: CallParams,
    pub bin_size: u64,
    pub label_threshold: f64,
    pub chroms: Option<Vec<String>>,
    pub threads: usize,
}

/// Raw (fractions x bins) matrix for one chromosome, bins sorted by end.
#[derive(Debug, Clone)]
pub struct ChromMatrix {
    pub chrom: String,
    pub bins: Vec<BinCoord>,
    pub matrix: Array2<f64>,
}

#[derive(Debug, Clone)]
pub struct ChromResult {
    pub calls: Vec<FeatureCall>,
    pub summary: ChromSummary,
}

/// Groups fraction tracks by chromosome. Intervals whose width differs from
/// `bin_size` are dropped; bins absent from a track read as zero.
pub fn assemble_chromosomes(
    tracks: &[Vec<BedgraphRecord>],
    bin_size: u64,
    chroms: Option<&[String]>,
) -> Result<Vec<ChromMatrix>> {
    let n_fractions = tracks.len();
    let mut order: Vec<String> = Vec::new();
    let mut per_chrom: HashMap<String, BTreeMap<(u64, u64), Vec<f64>>> = HashMap::new();

    for (fraction, track) in tracks.iter().enumerate() {
        for rec in track {
            if rec.end.checked_sub(rec.start) != Some(bin_size) {
                continue;
            }
            let bins = per_chrom.entry(rec.chrom.clone()).or_insert_with(|| {
                order.push(rec.chrom.clone());
                BTreeMap::new()
            });
            let column = bins
                .entry((rec.end, rec.start))
                .or_insert_with(|| vec![0.0; n_fractions]);
            column[fraction] = if rec.value.is_finite() { rec.value } else { 0.0 };
        }
    }

    let selected: Vec<String> = match chroms {
        Some(list) => {
            let mut seen = HashSet::new();
            list.iter().filter(|c| seen.insert(c.as_str())).cloned().collect()
        }
        None => order,
    };

    let mut out = Vec::with_capacity(selected.len());
    for chrom in selected {
        let bins = per_chrom.remove(&chrom).ok_or_else(|| {
            ReplifeatError::InvalidInput(format!(
                "chromosome {} has no bins of size {}",
                chrom, bin_size
            ))
        })?;
        let mut coords = Vec::with_capacity(bins.len());
        let mut matrix = Array2::<f64>::zeros((n_fractions, bins.len()));
        for (j, ((end, start), column)) in bins.into_iter().enumerate() {
            coords.push(BinCoord { start, end });
            for (f, v) in column.into_iter().enumerate() {
                matrix[[f, j]] = v;
            }
        }
        info!(chrom = %chrom, bins = coords.len(), "chromosome_assembled");
        out.push(ChromMatrix {
            chrom,
            bins: coords,
            matrix,
        });
    }

    Ok(out)
}

/// Prepares, clusters, detects and labels one chromosome.
pub fn call_chromosome(cm: ChromMatrix, params: &GenomeParams) -> Result<ChromResult> {
    let labeler = BirchLabeler::new(params.call.threshold, params.call.n_clusters)?;
    let mut call = params.call.clone();
    call.prepare = true;

    let ChromMatrix {
        chrom,
        bins,
        matrix,
    } = cm;
    let mut ctx = Ctx::with_matrix(chrom.clone(), matrix, call);
    let pipeline = Pipeline::new(vec![
        Box::new(Stage2Prepare::new()),
        Box::new(Stage3Cluster::new(Box::new(labeler))),
        Box::new(Stage4Features::new()),
    ]);
    pipeline
        .run(&mut ctx)
        .with_context(|| format!("calling features on {}", chrom))?;

    let prepared = ctx.prepared.as_ref().context("prepared matrix missing")?;
    let mut calls = Vec::with_capacity(ctx.features.len());
    for feature in &ctx.features {
        match label_feature(&chrom, &bins, prepared, feature, params.label_threshold) {
            Some(c) => calls.push(c),
            None => warn!(
                chrom = %chrom,
                start = feature.range.start,
                end = feature.range.end,
                "feature outside bin table; skipped"
            ),
        }
    }

    let mut levels = ctx.signal.clone();
    levels.sort_unstable();
    levels.dedup();

    Ok(ChromResult {
        summary: ChromSummary {
            chrom,
            bins: bins.len(),
            signal_levels: levels.len(),
            features: calls.len(),
        },
        calls,
    })
}

/// Calls every chromosome in parallel. Results keep the input chromosome order.
#[cfg(feature = "mt")]
pub fn call_genome(chroms: Vec<ChromMatrix>, params: &GenomeParams) -> Result<Vec<ChromResult>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.threads)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build thread pool: {}", e))?;
    let results: Vec<Result<ChromResult>> = pool.install(|| {
        chroms
            .into_par_iter()
            .map(|cm| call_chromosome(cm, params))
            .collect()
    });
    results.into_iter().collect()
}

#[cfg(not(feature = "mt"))]
pub fn call_genome(chroms: Vec<ChromMatrix>, params: &GenomeParams) -> Result<Vec<ChromResult>> {
    chroms
        .into_iter()
        .map(|cm| call_chromosome(cm, params))
        .collect()
}
