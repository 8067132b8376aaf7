use ndarray::Array2;
use replifeat::cluster::{BinLabeler, BirchLabeler};
use replifeat::error::ReplifeatError;

/// Four fractions; bins 0..3 fire in fraction 0, bins 3..6 in fraction 2.
fn two_profiles() -> Array2<f64> {
    Array2::from_shape_fn((4, 6), |(f, b)| {
        let peak = if b < 3 { 0 } else { 2 };
        if f == peak { 100.0 } else { 0.0 }
    })
}

#[test]
fn identical_profiles_share_a_subcluster() {
    let labeler = BirchLabeler::default();
    let model = labeler.fit(&two_profiles()).unwrap();
    assert_eq!(model.n_subclusters, 2);
    assert_eq!(model.labels, vec![0, 0, 0, 1, 1, 1]);
    assert_eq!(model.dominant_fractions(), vec![0, 0, 0, -2, -2, -2]);
}

#[test]
fn label_bins_returns_one_value_per_column() {
    let labeler = BirchLabeler::default();
    let signal = labeler.label_bins(&two_profiles()).unwrap();
    assert_eq!(signal.len(), 6);
    assert_eq!(signal, labeler.label_bins(&two_profiles()).unwrap());
}

#[test]
fn n_clusters_groups_subclusters() {
    let labeler = BirchLabeler::new(0.5, Some(1)).unwrap();
    let model = labeler.fit(&two_profiles()).unwrap();
    assert_eq!(model.centers.nrows(), 1);
    assert!(model.labels.iter().all(|&l| l == 0));
}

#[test]
fn n_clusters_above_subclusters_keeps_subclusters() {
    let labeler = BirchLabeler::new(0.5, Some(5)).unwrap();
    let model = labeler.fit(&two_profiles()).unwrap();
    assert_eq!(model.centers.nrows(), 2);
}

#[test]
fn large_threshold_merges_everything() {
    let labeler = BirchLabeler::new(1000.0, None).unwrap();
    let model = labeler.fit(&two_profiles()).unwrap();
    assert_eq!(model.n_subclusters, 1);
}

#[test]
fn non_finite_input_is_rejected() {
    let mut m = two_profiles();
    m[[1, 1]] = f64::NAN;
    let err = BirchLabeler::default().fit(&m).unwrap_err();
    assert!(matches!(err, ReplifeatError::InvalidInput(_)));
}

#[test]
fn empty_input_is_rejected() {
    let m = Array2::<f64>::zeros((16, 0));
    assert!(BirchLabeler::default().fit(&m).is_err());
}

#[test]
fn invalid_options_are_configuration_errors() {
    assert!(matches!(
        BirchLabeler::new(0.0, None),
        Err(ReplifeatError::Configuration(_))
    ));
    assert!(matches!(
        BirchLabeler::new(0.5, Some(0)),
        Err(ReplifeatError::Configuration(_))
    ));
}
