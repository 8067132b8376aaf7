use std::path::Path;
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use replifeat::cli::GenomeCli;
use replifeat::cluster::BirchLabeler;
use replifeat::ctx::CallParams;
use replifeat::features::FeatureKind;
use replifeat::genome::{self, GenomeParams};
use replifeat::io::{self, bedgraph, json_writer, tsv_writer};
use replifeat::math::smooth::GaussianKernel;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = GenomeCli::parse();
    let kind: FeatureKind = match cli.feature_type.parse() {
        Ok(kind) => kind,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(1);
        }
    };

    match run(cli, kind) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: GenomeCli, kind: FeatureKind) -> Result<()> {
    if cli.bin_size == 0 {
        bail!("--bin-size must be positive");
    }
    // Fail on bad clustering options before reading any track.
    BirchLabeler::new(cli.threshold, cli.n_clusters)?;

    let params = GenomeParams {
        call: CallParams {
            feature_kind: kind,
            threshold: cli.threshold,
            n_clusters: cli.n_clusters,
            prepare: true,
            kernel: GaussianKernel::default(),
        },
        bin_size: cli.bin_size,
        label_threshold: cli.label_threshold,
        chroms: cli.chroms.clone(),
        threads: cli.threads,
    };

    let mut tracks = Vec::with_capacity(cli.bedgraph.len());
    for path in &cli.bedgraph {
        let records = bedgraph::read_bedgraph(path)?;
        info!(track = %path.display(), records = records.len(), "track_loaded");
        tracks.push(records);
    }
    let fractions = tracks.len();

    let chroms = genome::assemble_chromosomes(&tracks, params.bin_size, params.chroms.as_deref())?;
    drop(tracks);
    let results = genome::call_genome(chroms, &params)?;

    let calls: Vec<_> = results.iter().flat_map(|r| r.calls.iter().cloned()).collect();
    let tsv = tsv_writer::render_calls(&calls)?;
    let json = match &cli.json {
        Some(path) => {
            let report = json_writer::build_report(&params, fractions, &results);
            Some((path.as_path(), json_writer::render_json(&report)?))
        }
        None => None,
    };
    let mut outputs: Vec<(&Path, &[u8])> = vec![(cli.out.as_path(), tsv.as_slice())];
    if let Some((path, bytes)) = &json {
        outputs.push((*path, bytes.as_slice()));
    }
    io::write_all_or_none(&outputs)?;

    println!(
        "{} {} calls across {} chromosome(s) written to {}",
        calls.len(),
        kind,
        results.len(),
        cli.out.display()
    );
    Ok(())
}
