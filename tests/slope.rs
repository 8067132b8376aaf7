use replifeat::features::{IndexRange, find_rightward_slopes};

fn ranges(pairs: &[(usize, usize)]) -> Vec<IndexRange> {
    pairs.iter().map(|&(s, e)| IndexRange::new(s, e)).collect()
}

#[test]
fn simple_descent() {
    assert_eq!(find_rightward_slopes(&[5, 4, 3, 2, 1]), ranges(&[(0, 4)]));
}

#[test]
fn plateau_then_rise_stops_at_plateau_start() {
    assert_eq!(find_rightward_slopes(&[5, 3, 3, 4]), ranges(&[(0, 1)]));
    assert_eq!(find_rightward_slopes(&[4, 2, 2]), ranges(&[(0, 1)]));
}

#[test]
fn plateau_then_drop_is_folded_in() {
    assert_eq!(find_rightward_slopes(&[5, 4, 4, 3]), ranges(&[(0, 3)]));
    assert_eq!(
        find_rightward_slopes(&[9, 7, 7, 7, 5, 5, 2, 8]),
        ranges(&[(0, 6)])
    );
}

#[test]
fn leading_run_is_skipped() {
    assert_eq!(find_rightward_slopes(&[3, 3, 2, 1]), ranges(&[(1, 3)]));
}

#[test]
fn flat_and_increasing_have_no_slopes() {
    assert!(find_rightward_slopes(&[2, 2, 2, 2]).is_empty());
    assert!(find_rightward_slopes(&[1, 2, 3, 4]).is_empty());
    assert!(find_rightward_slopes::<i64>(&[]).is_empty());
    assert!(find_rightward_slopes(&[7]).is_empty());
}

#[test]
fn consecutive_slopes() {
    assert_eq!(
        find_rightward_slopes(&[5, 4, 6, 5, 4]),
        ranges(&[(0, 1), (2, 4)])
    );
}

#[test]
fn every_slope_spans_at_least_two_bins() {
    let a = [0, -1, 0, 0, -3, -3, -1, -2, -2, 4, 1, 1, 1, 0, 2];
    let slopes = find_rightward_slopes(&a);
    assert!(!slopes.is_empty());
    for s in &slopes {
        assert!(s.end > s.start, "{:?}", s);
    }
    assert_eq!(slopes, find_rightward_slopes(&a));
}
