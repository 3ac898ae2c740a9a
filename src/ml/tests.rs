use super::*;
use crate::array::{Array, ShapeError};
use crate::linalg::LinalgError;

fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!(
        (a - b).abs() < tol,
        "expected {} ≈ {} (diff = {}, tol = {})",
        a,
        b,
        (a - b).abs(),
        tol
    );
}

#[test]
fn linear_regression_recovers_plane() {
    // y = 1.5·x0 - 2·x1 + 0.5
    let x = Array::from_rows(
        5,
        2,
        &[0.0_f64, 0.0, 1.0, 0.0, 0.0, 1.0, 2.0, 1.0, 1.0, 3.0],
    );
    let y = Array::from_slice(&[0.5, 2.0, -1.5, 1.5, -4.0]);
    let w = linear_regression(&x, &y).unwrap();
    assert_eq!(w.shape(), &[3]);
    approx_eq(w[0], 1.5, 1e-5);
    approx_eq(w[1], -2.0, 1e-5);
    approx_eq(w[2], 0.5, 1e-5);
}

#[test]
fn linear_regression_noisy_fit_is_stationary() {
    let mut rng = fastrand::Rng::with_seed(31);
    let n = 20;
    let xs: alloc::vec::Vec<f64> = (0..n).map(|_| rng.f64() * 4.0 - 2.0).collect();
    let ys: alloc::vec::Vec<f64> = xs
        .iter()
        .map(|&v| 3.0 * v - 1.0 + (rng.f64() - 0.5) * 0.1)
        .collect();
    let x = Array::from_vec(&[n, 1], xs.clone());
    let w = linear_regression(&x, &Array::from_slice(&ys)).unwrap();

    // residuals are orthogonal to the design columns
    let (mut g0, mut g1) = (0.0, 0.0);
    for (xi, yi) in xs.iter().zip(ys.iter()) {
        let r = yi - (w[0] * xi + w[1]);
        g0 += r * xi;
        g1 += r;
    }
    approx_eq(g0, 0.0, 1e-3);
    approx_eq(g1, 0.0, 1e-3);
    approx_eq(w[0], 3.0, 0.05);
}

#[test]
fn ridge_zero_alpha_matches_least_squares() {
    let x = Array::from_rows(4, 1, &[0.0_f64, 1.0, 2.0, 3.0]);
    let y = Array::from_slice(&[1.0, 3.0, 5.0, 7.0]);
    let w = ridge(&x, &y, 0.0).unwrap();
    approx_eq(w[0], 2.0, 1e-6);
    approx_eq(w[1], 1.0, 1e-6);
}

#[test]
fn ridge_shrinks_slope_not_intercept() {
    // centered x, so the intercept is the mean of y for every alpha
    let x = Array::from_rows(4, 1, &[-1.5_f64, -0.5, 0.5, 1.5]);
    let y = Array::from_slice(&[-2.0, 0.0, 2.0, 4.0]);
    let w = ridge(&x, &y, 5.0).unwrap();
    // Σx² = 5, Σxy = 10 → slope = 10 / (5 + 5)
    approx_eq(w[0], 1.0, 1e-6);
    approx_eq(w[1], 1.0, 1e-6);
}

#[test]
fn regression_shape_errors() {
    let y = Array::from_slice(&[1.0_f64, 2.0]);
    assert_eq!(
        linear_regression(&Array::from_slice(&[1.0, 2.0]), &y).unwrap_err(),
        LinalgError::Shape(ShapeError::WrongDims { expected: 2, got: 1 })
    );
    let x = Array::<f64>::zeros(&[3, 2]);
    assert!(matches!(
        ridge(&x, &y, 1.0),
        Err(LinalgError::Shape(ShapeError::Mismatch { .. }))
    ));
}
