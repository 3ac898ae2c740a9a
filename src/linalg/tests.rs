use alloc::vec::Vec;

use super::*;

const TOL: f64 = 1e-4;

fn assert_close(a: &Array<f64>, b: &Array<f64>, tol: f64, msg: &str) {
    assert_eq!(a.shape(), b.shape(), "{}: shape", msg);
    let diff = a.max_abs_diff(b);
    assert!(diff <= tol, "{}: max |diff| = {} > {}", msg, diff, tol);
}

/// Entries uniform in [-1, 1) plus `boost` on the diagonal.
fn random_matrix(rng: &mut fastrand::Rng, rows: usize, cols: usize, boost: f64) -> Array<f64> {
    let data: Vec<f64> = (0..rows * cols)
        .map(|k| {
            let x = rng.f64() * 2.0 - 1.0;
            if k / cols == k % cols {
                x + boost
            } else {
                x
            }
        })
        .collect();
    Array::from_vec(&[rows, cols], data)
}

/// Exact inverse by Gauss–Jordan elimination with partial pivoting.
fn gauss_jordan(a: &Array<f64>) -> Array<f64> {
    let n = a.shape()[0];
    let w = 2 * n;
    let mut aug = alloc::vec![0.0; n * w];
    for i in 0..n {
        for j in 0..n {
            aug[i * w + j] = a[(i, j)];
        }
        aug[i * w + n + i] = 1.0;
    }
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&r, &s| aug[r * w + col].abs().total_cmp(&aug[s * w + col].abs()))
            .unwrap();
        for j in 0..w {
            aug.swap(col * w + j, pivot * w + j);
        }
        let p = aug[col * w + col];
        for j in 0..w {
            aug[col * w + j] /= p;
        }
        for r in 0..n {
            if r != col {
                let f = aug[r * w + col];
                for j in 0..w {
                    aug[r * w + j] -= f * aug[col * w + j];
                }
            }
        }
    }
    Array::from_fn(n, n, |i, j| aug[i * w + n + j])
}

// ═══════════════════════════════════════════════════════════════════
// inv
// ═══════════════════════════════════════════════════════════════════

#[test]
fn inv_random_well_conditioned() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_1234);
    for n in 1..=8 {
        let a = random_matrix(&mut rng, n, n, 5.0);
        let x = inv(&a).unwrap();
        let id = Array::eye(n);
        assert_close(&matmul(&x, &a).unwrap(), &id, TOL, "inv(A)·A");
        assert_close(&matmul(&a, &x).unwrap(), &id, TOL, "A·inv(A)");
    }
}

#[test]
fn inv_matches_gauss_jordan() {
    let mut rng = fastrand::Rng::with_seed(42);
    for n in [2, 3, 5, 7] {
        let a = random_matrix(&mut rng, n, n, 5.0);
        assert_close(&inv(&a).unwrap(), &gauss_jordan(&a), TOL, "gauss-jordan");
    }
}

#[test]
fn inv_spd_scenario() {
    let a = Array::from_rows(
        3,
        3,
        &[4.0, 12.0, -16.0, 12.0, 37.0, -43.0, -16.0, -43.0, 98.0],
    );
    let x = inv(&a).unwrap();
    assert_close(&matmul(&x, &a).unwrap(), &Array::eye(3), TOL, "spd");
    // exact inverse is known in closed form
    let expected = Array::from_rows(
        3,
        3,
        &[
            49.361_111_111, -13.555_555_556, 2.111_111_111,
            -13.555_555_556, 3.777_777_778, -0.555_555_556,
            2.111_111_111, -0.555_555_556, 0.111_111_111,
        ],
    );
    assert_close(&x, &expected, 1e-6, "spd entries");
}

#[test]
fn spd_scenario_needs_more_than_twenty_steps() {
    let a = Array::from_rows(
        3,
        3,
        &[4.0, 12.0, -16.0, 12.0, 37.0, -43.0, -16.0, -43.0, 98.0],
    );
    let x = NewtonSchulz::fixed(20).inv(&a).unwrap();
    let r = matmul(&x, &a).unwrap().max_abs_diff(&Array::eye(3));
    assert!(r > 1e-2, "residual after 20 steps: {}", r);
}

#[test]
fn inv_one_by_one() {
    for v in [4.0f64, -0.5, 1e3, 3.0] {
        let x = inv(&Array::from_rows(1, 1, &[v])).unwrap();
        assert!((x[(0, 0)] - 1.0 / v).abs() <= TOL * (1.0 / v).abs().max(1.0), "1/{}", v);
    }
}

#[test]
fn inv_batch_matches_individual() {
    let mut rng = fastrand::Rng::with_seed(7);
    let mats: Vec<Array<f64>> = (0..6).map(|_| random_matrix(&mut rng, 3, 3, 4.0)).collect();
    let stacked: Vec<f64> = mats.iter().flat_map(|m| m.as_slice().iter().copied()).collect();
    let batch = Array::from_vec(&[2, 3, 3, 3], stacked);

    let x = inv(&batch).unwrap();
    assert_eq!(x.shape(), &[2, 3, 3, 3]);
    for (chunk, m) in x.as_slice().chunks_exact(9).zip(mats.iter()) {
        assert_eq!(chunk, inv(m).unwrap().as_slice());
    }
}

#[test]
fn inv_is_deterministic() {
    let mut rng = fastrand::Rng::with_seed(99);
    let a = random_matrix(&mut rng, 5, 5, 3.0);
    let x1 = inv(&a).unwrap();
    let x2 = inv(&a).unwrap();
    assert_eq!(x1.as_slice(), x2.as_slice());
}

#[test]
fn inv_f32() {
    let mut rng = fastrand::Rng::with_seed(3);
    let a64 = random_matrix(&mut rng, 4, 4, 5.0);
    let a = a64.map(|x| x as f32);
    let x = inv(&a).unwrap();
    let id = matmul(&a, &x).unwrap();
    assert!(id.all_close(&Array::eye(4), 1e-4, 0.0));
}

#[test]
fn inv_shape_errors() {
    assert_eq!(
        inv(&Array::scalar(2.0_f64)).unwrap_err(),
        LinalgError::Shape(ShapeError::TooFewDims { required: 2, got: 0 })
    );
    assert_eq!(
        inv(&Array::from_slice(&[1.0_f64, 2.0])).unwrap_err(),
        LinalgError::Shape(ShapeError::TooFewDims { required: 2, got: 1 })
    );
    assert_eq!(
        inv(&Array::<f64>::zeros(&[2, 3])).unwrap_err(),
        LinalgError::Shape(ShapeError::NotSquare { rows: 2, cols: 3 })
    );
}

#[test]
fn inv_singular_stays_finite() {
    let a = Array::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
    let x = inv(&a).unwrap();
    assert!(x.as_slice().iter().all(|v| v.is_finite()));
}

#[test]
fn custom_tolerance_stops_early() {
    let a = Array::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 3.0]);
    let loose = NewtonSchulz::default().with_tolerance(1e-2).inv(&a).unwrap();
    let tight = inv(&a).unwrap();
    let r_loose = matmul(&a, &loose).unwrap().max_abs_diff(&Array::eye(2));
    let r_tight = matmul(&a, &tight).unwrap().max_abs_diff(&Array::eye(2));
    assert!(r_loose <= 1e-2);
    assert!(r_tight < r_loose);
}

// ═══════════════════════════════════════════════════════════════════
// pinv
// ═══════════════════════════════════════════════════════════════════

#[test]
fn pinv_tall_left_inverse() {
    let mut rng = fastrand::Rng::with_seed(11);
    let a = random_matrix(&mut rng, 6, 3, 0.0);
    let x = pinv(&a).unwrap();
    assert_eq!(x.shape(), &[3, 6]);
    assert_close(&matmul(&x, &a).unwrap(), &Array::eye(3), TOL, "pinv(A)·A");
}

#[test]
fn pinv_wide_right_inverse() {
    let mut rng = fastrand::Rng::with_seed(12);
    let a = random_matrix(&mut rng, 3, 6, 0.0);
    let x = pinv(&a).unwrap();
    assert_eq!(x.shape(), &[6, 3]);
    assert_close(&matmul(&a, &x).unwrap(), &Array::eye(3), TOL, "A·pinv(A)");
}

#[test]
fn pinv_square_matches_inv() {
    let mut rng = fastrand::Rng::with_seed(13);
    let a = random_matrix(&mut rng, 4, 4, 5.0);
    assert_close(&pinv(&a).unwrap(), &inv(&a).unwrap(), 1e-8, "pinv vs inv");
}

#[test]
fn pinv_batched_shape() {
    let mut rng = fastrand::Rng::with_seed(14);
    let data: Vec<f64> = (0..2 * 5 * 2).map(|_| rng.f64() * 2.0 - 1.0).collect();
    let a = Array::from_vec(&[2, 5, 2], data);
    let x = pinv(&a).unwrap();
    assert_eq!(x.shape(), &[2, 2, 5]);
    let id = matmul(&x, &a).unwrap();
    assert_eq!(id.shape(), &[2, 2, 2]);
    let eyes = Array::from_vec(&[2, 2, 2], alloc::vec![1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0]);
    assert_close(&id, &eyes, TOL, "batched pinv");
}

#[test]
fn pinv_rejects_vectors() {
    assert!(matches!(
        pinv(&Array::from_slice(&[1.0_f64, 2.0, 3.0])),
        Err(LinalgError::Shape(ShapeError::TooFewDims { .. }))
    ));
}

#[test]
fn pinv_rank_one_projects() {
    // Moore–Penrose: A·A⁺·A = A even without full rank
    let a = Array::from_rows(3, 2, &[1.0_f64, 2.0, 2.0, 4.0, 3.0, 6.0]);
    let x = pinv(&a).unwrap();
    let back = matmul(&matmul(&a, &x).unwrap(), &a).unwrap();
    assert_close(&back, &a, TOL, "A·A⁺·A");
}

// ═══════════════════════════════════════════════════════════════════
// Solvers built on the inverses
// ═══════════════════════════════════════════════════════════════════

#[test]
fn solve_random_system() {
    let mut rng = fastrand::Rng::with_seed(21);
    let a = random_matrix(&mut rng, 5, 5, 5.0);
    let x_true = Array::from_slice(&[1.0, -2.0, 0.5, 3.0, 0.0]);
    let b = matmul(&a, &x_true).unwrap();
    assert_close(&solve(&a, &b).unwrap(), &x_true, TOL, "solve");
}

#[test]
fn lstsq_overdetermined_matches_normal_equations() {
    let mut rng = fastrand::Rng::with_seed(22);
    let a = random_matrix(&mut rng, 8, 3, 0.0);
    let b = Array::from_vec(&[8, 1], (0..8).map(|_| rng.f64()).collect());
    let x = lstsq(&a, &b).unwrap();
    // normal equations: AᵀA x = Aᵀb
    let at = a.transpose().unwrap();
    let lhs = matmul(&matmul(&at, &a).unwrap(), &x).unwrap();
    let rhs = matmul(&at, &b).unwrap();
    assert_close(&lhs, &rhs, TOL, "normal equations");
}

#[test]
fn cond_identity_is_one() {
    for ord in [NormOrd::Fro, NormOrd::One, NormOrd::Inf] {
        let c = cond(&Array::<f64>::eye(3), Some(ord)).unwrap();
        let expected = if ord == NormOrd::Fro { 3.0 } else { 1.0 };
        assert!((c - expected).abs() < 1e-10, "{:?}: {}", ord, c);
    }
}

#[test]
fn errors_display() {
    let e: LinalgError = ShapeError::NotSquare { rows: 2, cols: 3 }.into();
    assert_eq!(
        alloc::format!("{}", e),
        "last two dimensions must be square, got 2x3"
    );
    assert_eq!(
        alloc::format!("{}", LinalgError::Unsupported("spectral norm (ord = 2)")),
        "spectral norm (ord = 2) is not supported"
    );
}
