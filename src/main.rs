use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use replifeat::cli::Cli;
use replifeat::cluster::BirchLabeler;
use replifeat::ctx::{CallParams, Ctx};
use replifeat::features::{FeatureKind, format_ranges};
use replifeat::io::npy;
use replifeat::pipeline::Pipeline;
use replifeat::pipeline::stage1_input::Stage1Input;
use replifeat::pipeline::stage2_prepare::Stage2Prepare;
use replifeat::pipeline::stage3_cluster::Stage3Cluster;
use replifeat::pipeline::stage4_features::Stage4Features;
use replifeat::pipeline::stage5_output::Stage5Output;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
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

fn run(cli: Cli, kind: FeatureKind) -> Result<()> {
    let labeler = BirchLabeler::new(cli.threshold, cli.n_clusters)?;
    let params = CallParams {
        feature_kind: kind,
        threshold: cli.threshold,
        n_clusters: cli.n_clusters,
        prepare: cli.prepare,
        ..CallParams::default()
    };
    let out = cli
        .out
        .clone()
        .unwrap_or_else(|| npy::default_output_path(&cli.filename, kind));
    let mut ctx = Ctx::for_file(cli.filename, out.clone(), params);

    let pipeline = Pipeline::new(vec![
        Box::new(Stage1Input::new()),
        Box::new(Stage2Prepare::new()),
        Box::new(Stage3Cluster::new(Box::new(labeler))),
        Box::new(Stage4Features::new()),
        Box::new(Stage5Output::new()),
    ]);
    pipeline.run(&mut ctx)?;

    println!("{} indices: {}", kind, format_ranges(&ctx.ranges()));
    println!("{} indices written to {}", kind, out.display());
    for warning in &ctx.warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(())
}
