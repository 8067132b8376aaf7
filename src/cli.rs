use clap::Parser;
use std::path::PathBuf;

use crate::cluster::birch::DEFAULT_THRESHOLD;
use crate::genome::DEFAULT_BIN_SIZE;
use crate::labels::DEFAULT_LABEL_THRESHOLD;

#[derive(Debug, Parser)]
#[command(
    name = "replifeat",
    version,
    about = "Cluster a scaled Repli-seq array and call replication features"
)]
pub struct Cli {
    #[arg(help = "Path to the .npy file containing the input array (fractions x bins)")]
    pub filename: PathBuf,

    #[arg(long = "n_clusters", help = "Number of clusters (default: threshold decides)")]
    pub n_clusters: Option<usize>,

    #[arg(long, default_value_t = DEFAULT_THRESHOLD, help = "Subcluster radius threshold")]
    pub threshold: f64,

    #[arg(
        long = "feature_type",
        default_value = "IZ",
        help = "Feature type to call: IZ or rightwardTTR"
    )]
    pub feature_type: String,

    #[arg(
        long,
        default_value_t = false,
        help = "Scale, smooth and rescale the array before clustering"
    )]
    pub prepare: bool,

    #[arg(long, help = "Output .npy path (default: <input>_<feature_type>Indices.npy)")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[command(
    name = "replifeat-genome",
    version,
    about = "Call replication features genome-wide from per-fraction bedgraph tracks"
)]
pub struct GenomeCli {
    #[arg(
        long,
        num_args = 1..,
        required = true,
        help = "Bedgraph track per S-phase fraction, in fraction order (plain or .gz)"
    )]
    pub bedgraph: Vec<PathBuf>,

    #[arg(long, help = "Output TSV path")]
    pub out: PathBuf,

    #[arg(long = "feature_type", default_value = "IZ")]
    pub feature_type: String,

    #[arg(long = "n_clusters")]
    pub n_clusters: Option<usize>,

    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    #[arg(long, default_value_t = DEFAULT_BIN_SIZE, help = "Keep only intervals of this width")]
    pub bin_size: u64,

    #[arg(
        long,
        default_value_t = DEFAULT_LABEL_THRESHOLD,
        help = "Signal percentage marking the onset fraction for timing labels"
    )]
    pub label_threshold: f64,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Comma-separated chromosomes (default: all, in input order)"
    )]
    pub chroms: Option<Vec<String>>,

    #[arg(long, default_value_t = 0, help = "Number of threads (0 = auto)")]
    pub threads: usize,

    #[arg(long, help = "Optional JSON run summary path")]
    pub json: Option<PathBuf>,
}
