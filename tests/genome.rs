use std::fs;
use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

use replifeat::ctx::CallParams;
use replifeat::features::FeatureKind;
use replifeat::genome::{GenomeParams, assemble_chromosomes, call_genome};
use replifeat::io::bedgraph::{BedgraphRecord, read_bedgraph};
use replifeat::labels::TimingLabel;

const BIN: u64 = 50_000;

/// 16 fraction tracks; `bump` bins of each chromosome fire early.
fn tracks(chroms: &[(&str, usize, std::ops::Range<usize>)]) -> Vec<Vec<BedgraphRecord>> {
    (0..16)
        .map(|f| {
            let mut track = Vec::new();
            for (chrom, n_bins, bump) in chroms {
                for b in 0..*n_bins {
                    let center = if bump.contains(&b) { 2.0 } else { 12.0 };
                    let d = f as f64 - center;
                    track.push(BedgraphRecord {
                        chrom: chrom.to_string(),
                        start: b as u64 * BIN,
                        end: (b as u64 + 1) * BIN,
                        value: 500.0 * (-d * d / 2.0).exp(),
                    });
                }
            }
            track
        })
        .collect()
}

fn params(kind: FeatureKind) -> GenomeParams {
    GenomeParams {
        call: CallParams {
            feature_kind: kind,
            ..CallParams::default()
        },
        bin_size: BIN,
        label_threshold: 6.0,
        chroms: None,
        threads: 2,
    }
}

#[test]
fn assembly_keeps_order_and_bin_width() {
    let mut t = tracks(&[("chr2", 5, 0..0), ("chr1", 4, 0..0)]);
    t[0].push(BedgraphRecord {
        chrom: "chr1".into(),
        start: 0,
        end: 10,
        value: 1.0,
    });
    let chroms = assemble_chromosomes(&t, BIN, None).unwrap();
    assert_eq!(chroms.len(), 2);
    assert_eq!(chroms[0].chrom, "chr2");
    assert_eq!(chroms[0].matrix.dim(), (16, 5));
    assert_eq!(chroms[1].matrix.dim(), (16, 4));
    assert_eq!(chroms[1].bins[3].start, 3 * BIN);
}

#[test]
fn missing_cells_read_as_zero_and_bins_sort_by_end() {
    let rec = |start: u64, end: u64, value: f64| BedgraphRecord {
        chrom: "chrX".into(),
        start,
        end,
        value,
    };
    let t = vec![
        vec![rec(100, 200, 2.0), rec(0, 100, f64::NAN)],
        vec![rec(100, 200, 3.0)],
    ];
    let chroms = assemble_chromosomes(&t, 100, None).unwrap();
    let m = &chroms[0].matrix;
    assert_eq!(chroms[0].bins[0].start, 0);
    assert_eq!(m[[0, 0]], 0.0);
    assert_eq!(m[[1, 0]], 0.0);
    assert_eq!(m[[0, 1]], 2.0);
    assert_eq!(m[[1, 1]], 3.0);
}

#[test]
fn unknown_chromosome_is_an_error() {
    let t = tracks(&[("chr1", 4, 0..0)]);
    let only = vec!["chr9".to_string()];
    assert!(assemble_chromosomes(&t, BIN, Some(only.as_slice())).is_err());
}

#[test]
fn genome_calls_iz_with_coordinates_and_timing() {
    let t = tracks(&[("chr1", 40, 10..15), ("chr2", 30, 20..24)]);
    let p = params(FeatureKind::Iz);
    let chroms = assemble_chromosomes(&t, p.bin_size, None).unwrap();
    let results = call_genome(chroms, &p).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].summary.chrom, "chr1");
    assert_eq!(results[0].summary.bins, 40);

    let chr1 = &results[0].calls;
    assert_eq!(chr1.len(), 1);
    assert_eq!(chr1[0].start, 10 * BIN);
    assert_eq!(chr1[0].end, 15 * BIN);
    assert_eq!(chr1[0].timing, TimingLabel::Early);

    let chr2 = &results[1].calls;
    assert_eq!(chr2.len(), 1);
    assert_eq!(chr2[0].chrom, "chr2");
    assert_eq!(chr2[0].start, 20 * BIN);
    assert_eq!(chr2[0].end, 24 * BIN);
}

#[test]
fn bedgraph_reader_handles_gzip_and_comments() {
    let tmp = TempDir::new().unwrap();
    let plain = tmp.path().join("S1.bedgraph");
    fs::write(
        &plain,
        "track type=bedGraph\n# comment\nchr1\t0\t50000\t1.5\nchr1\t50000\t100000\tNA\n",
    )
    .unwrap();
    let records = read_bedgraph(&plain).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].value, 1.5);
    assert!(records[1].value.is_nan());

    let gz = tmp.path().join("S2.bedgraph.gz");
    let mut enc = GzEncoder::new(fs::File::create(&gz).unwrap(), Compression::default());
    enc.write_all(b"chr2\t0\t50000\t4\n").unwrap();
    enc.finish().unwrap();
    let records = read_bedgraph(&gz).unwrap();
    assert_eq!(records[0].chrom, "chr2");
    assert_eq!(records[0].value, 4.0);
}

#[test]
fn malformed_bedgraph_line_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.bedgraph");
    fs::write(&path, "chr1\t0\t50000\n").unwrap();
    assert!(read_bedgraph(&path).is_err());
}

#[test]
fn unreadable_bedgraph_line_names_file_and_line() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("latin1.bedgraph");
    fs::write(&path, b"chr1\t0\t50000\t1\nchr\xe9\t50000\t100000\t2\n").unwrap();
    let err = read_bedgraph(&path).unwrap_err();
    assert_eq!(err.to_string(), format!("{}:2: read failed", path.display()));
}

#[test]
fn repeated_chromosome_selection_is_assembled_once() {
    let t = tracks(&[("chr1", 4, 0..0), ("chr2", 3, 0..0)]);
    let only = vec!["chr2".to_string(), "chr1".to_string(), "chr2".to_string()];
    let chroms = assemble_chromosomes(&t, BIN, Some(only.as_slice())).unwrap();
    let names: Vec<&str> = chroms.iter().map(|c| c.chrom.as_str()).collect();
    assert_eq!(names, ["chr2", "chr1"]);
}
