use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::labels::FeatureCall;

pub const HEADER: &str = "chrom\tstart\tend\ttiming";

pub fn write_calls(path: &Path, calls: &[FeatureCall]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    write_calls_to(&mut w, calls)?;
    w.flush()?;
    Ok(())
}

pub fn render_calls(calls: &[FeatureCall]) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_calls_to(&mut bytes, calls)?;
    Ok(bytes)
}

pub fn write_calls_to<W: Write>(w: &mut W, calls: &[FeatureCall]) -> Result<()> {
    writeln!(w, "{}", HEADER)?;
    for call in calls {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            call.chrom, call.start, call.end, call.timing
        )?;
    }
    Ok(())
}
