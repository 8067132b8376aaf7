use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

pub mod bedgraph;
pub mod json_writer;
pub mod npy;
pub mod tsv_writer;

pub(crate) fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        let decoder = GzDecoder::new(file);
        Ok(Box::new(decoder))
    } else {
        Ok(Box::new(file))
    }
}

/// Writes every `(path, bytes)` pair or none of them. Each payload is first
/// written next to its target with a `.partial` suffix and renamed into place
/// only once all of them are on disk.
pub fn write_all_or_none(outputs: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(outputs.len());
    for (target, bytes) in outputs {
        let partial = partial_path(target);
        if let Err(err) = fs::write(&partial, bytes) {
            discard(&staged);
            let _ = fs::remove_file(&partial);
            return Err(err).with_context(|| format!("failed to create {}", target.display()));
        }
        staged.push((partial, target));
    }
    for (i, (partial, target)) in staged.iter().enumerate() {
        if let Err(err) = fs::rename(partial, target) {
            discard(&staged[i..]);
            return Err(err).with_context(|| format!("failed to write {}", target.display()));
        }
    }
    Ok(())
}

fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().map(OsString::from).unwrap_or_default();
    name.push(".partial");
    target.with_file_name(name)
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (partial, _) in staged {
        let _ = fs::remove_file(partial);
    }
}
