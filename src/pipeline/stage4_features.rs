use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::features::detect;
use crate::pipeline::Stage;

pub struct Stage4Features;

impl Stage4Features {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Features {
    fn name(&self) -> &'static str {
        "stage4_features"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let kind = ctx.params.feature_kind;
        ctx.features = detect(kind, &ctx.signal);
        info!(
            feature_type = %kind,
            features = ctx.features.len(),
            "features_called"
        );
        Ok(())
    }
}
