use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::math::prepare::prepare_matrix;
use crate::pipeline::Stage;

pub struct Stage2Prepare;

impl Stage2Prepare {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Prepare {
    fn name(&self) -> &'static str {
        "stage2_prepare"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let matrix = ctx.matrix.take().context("matrix not loaded before Stage 2")?;
        let prepared = if ctx.params.prepare {
            let (kh, kw) = ctx.params.kernel.shape();
            info!(kernel_rows = kh, kernel_cols = kw, "scale_smooth_scale");
            prepare_matrix(&matrix, &ctx.params.kernel)
        } else {
            matrix
        };
        ctx.prepared = Some(prepared);
        Ok(())
    }
}
