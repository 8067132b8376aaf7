use std::path::PathBuf;

use ndarray::Array2;

use crate::cluster::birch::DEFAULT_THRESHOLD;
use crate::features::{Feature, FeatureKind, IndexRange};
use crate::math::smooth::GaussianKernel;

/// Options shared by every invocation, whether one array or one chromosome.
#[derive(Debug, Clone)]
pub struct CallParams {
    pub feature_kind: FeatureKind,
    pub threshold: f64,
    pub n_clusters: Option<usize>,
    pub prepare: bool,
    pub kernel: GaussianKernel,
}

impl Default for CallParams {
    fn default() -> Self {
        Self {
            feature_kind: FeatureKind::Iz,
            threshold: DEFAULT_THRESHOLD,
            n_clusters: None,
            prepare: false,
            kernel: GaussianKernel::default(),
        }
    }
}

#[derive(Debug)]
pub struct Ctx {
    pub label: String,
    pub input: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub params: CallParams,
    pub matrix: Option<Array2<f64>>,
    pub prepared: Option<Array2<f64>>,
    pub signal: Vec<i64>,
    pub features: Vec<Feature>,
    pub warnings: Vec<String>,
}

impl Ctx {
    pub fn new(label: impl Into<String>, params: CallParams) -> Self {
        Self {
            label: label.into(),
            input: None,
            output_path: None,
            params,
            matrix: None,
            prepared: None,
            signal: Vec::new(),
            features: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Context for a single array file written next to its input.
    pub fn for_file(input: PathBuf, output_path: PathBuf, params: CallParams) -> Self {
        let label = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("input")
            .to_string();
        let mut ctx = Self::new(label, params);
        ctx.input = Some(input);
        ctx.output_path = Some(output_path);
        ctx
    }

    /// Context for an already assembled matrix.
    pub fn with_matrix(label: impl Into<String>, matrix: Array2<f64>, params: CallParams) -> Self {
        let mut ctx = Self::new(label, params);
        ctx.matrix = Some(matrix);
        ctx
    }

    pub fn ranges(&self) -> Vec<IndexRange> {
        self.features.iter().map(|f| f.range).collect()
    }
}
