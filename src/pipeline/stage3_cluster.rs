use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cluster::BinLabeler;
use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage3Cluster {
    labeler: Box<dyn BinLabeler + Send + Sync>,
}

impl Stage3Cluster {
    pub fn new(labeler: Box<dyn BinLabeler + Send + Sync>) -> Self {
        Self { labeler }
    }
}

impl Stage for Stage3Cluster {
    fn name(&self) -> &'static str {
        "stage3_cluster"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let prepared = ctx
            .prepared
            .as_ref()
            .context("prepared matrix missing before Stage 3")?;
        let signal = self.labeler.label_bins(prepared)?;
        if signal.len() != prepared.ncols() {
            bail!(
                "{} labeler returned {} values for {} bins",
                self.labeler.name(),
                signal.len(),
                prepared.ncols()
            );
        }
        info!(
            labeler = self.labeler.name(),
            bins = signal.len(),
            "dominant_fraction_signal_ready"
        );
        ctx.signal = signal;
        Ok(())
    }
}
