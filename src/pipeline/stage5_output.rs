use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::npy;
use crate::pipeline::Stage;

pub struct Stage5Output;

impl Stage5Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Output {
    fn name(&self) -> &'static str {
        "stage5_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let path = ctx.output_path.as_ref().context("output path missing")?;
        npy::write_indices(path, &ctx.ranges())?;
        info!(output = %path.display(), "indices_written");
        Ok(())
    }
}
