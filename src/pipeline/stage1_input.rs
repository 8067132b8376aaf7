use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::io::npy;
use crate::math::scale::nan_to_num;
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let input = ctx.input.as_ref().context("input path missing")?;
        let raw = npy::read_matrix(input)?;
        let (fractions, bins) = raw.dim();
        let missing = raw.iter().filter(|v| !v.is_finite()).count();
        if missing > 0 {
            ctx.warnings
                .push(format!("{} non-finite cells replaced with 0", missing));
        }
        info!(
            input = %input.display(),
            fractions,
            bins,
            missing,
            "array_loaded"
        );
        ctx.matrix = Some(nan_to_num(&raw));
        Ok(())
    }
}
