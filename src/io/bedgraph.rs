use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::io::open_maybe_gz;

#[derive(Debug, Clone, PartialEq)]
pub struct BedgraphRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub value: f64,
}

/// Reads a bedgraph track (plain or gzip). `NA` and `nan` values become NaN.
pub fn read_bedgraph(path: &Path) -> Result<Vec<BedgraphRecord>> {
    let reader = open_maybe_gz(path)?;
    let mut reader = BufReader::new(reader);

    let mut records = Vec::new();
    let mut line = String::new();
    let mut line_no = 0usize;
    while reader
        .read_line(&mut line)
        .with_context(|| format!("{}:{}: read failed", path.display(), line_no + 1))?
        > 0
    {
        line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with("track")
            || trimmed.starts_with("browser")
        {
            line.clear();
            continue;
        }
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() < 4 {
            bail!(
                "{}:{}: bedgraph line must have 4 fields: chrom start end value",
                path.display(),
                line_no
            );
        }
        let start: u64 = parts[1]
            .parse()
            .with_context(|| format!("{}:{}: invalid start", path.display(), line_no))?;
        let end: u64 = parts[2]
            .parse()
            .with_context(|| format!("{}:{}: invalid end", path.display(), line_no))?;
        if end < start {
            bail!("{}:{}: end before start", path.display(), line_no);
        }
        let value = parse_value(parts[3])
            .with_context(|| format!("{}:{}: invalid value", path.display(), line_no))?;
        records.push(BedgraphRecord {
            chrom: parts[0].to_string(),
            start,
            end,
            value,
        });
        line.clear();
    }

    Ok(records)
}

fn parse_value(raw: &str) -> Result<f64> {
    match raw {
        "NA" | "na" | "NaN" | "nan" | "." => Ok(f64::NAN),
        other => Ok(other.parse::<f64>()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_parse_as_nan() {
        assert!(parse_value("NA").unwrap().is_nan());
        assert_eq!(parse_value("1.5").unwrap(), 1.5);
        assert!(parse_value("abc").is_err());
    }
}
