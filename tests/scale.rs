use ndarray::{Array2, array};
use replifeat::math::scale::scale;

#[test]
fn columns_become_percentages() {
    let m = array![[1.0, 0.0, 2.0], [3.0, 0.0, 2.0]];
    let s = scale(&m);
    assert!((s[[0, 0]] - 25.0).abs() < 1e-12);
    assert!((s[[1, 0]] - 75.0).abs() < 1e-12);
    assert!((s[[0, 2]] - 50.0).abs() < 1e-12);
    for col in s.columns() {
        let total: f64 = col.sum();
        assert!(total == 0.0 || (total - 100.0).abs() < 1e-9);
    }
}

#[test]
fn zero_column_maps_to_zeros() {
    let m = array![[0.0, 1.0], [0.0, 1.0]];
    let s = scale(&m);
    assert_eq!(s[[0, 0]], 0.0);
    assert_eq!(s[[1, 0]], 0.0);
}

#[test]
fn output_is_bounded_and_finite() {
    let m = Array2::from_shape_fn((16, 50), |(i, j)| {
        if (i + j) % 13 == 0 {
            f64::NAN
        } else {
            ((i * 31 + j * 17) % 23) as f64
        }
    });
    let s = scale(&m);
    assert_eq!(s.dim(), m.dim());
    for v in s.iter() {
        assert!(v.is_finite());
        assert!((0.0..=100.0).contains(v));
    }
}
