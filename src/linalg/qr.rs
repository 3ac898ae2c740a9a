use alloc::vec;
use alloc::vec::Vec;

use crate::array::{gemm, transpose_into, Array};
use crate::traits::FloatScalar;

use super::{matrix_2d, LinalgError};

/// Residual norm below which a column counts as linearly dependent.
const DEPENDENT_COLUMN: f64 = 1e-7;

/// Reduced QR decomposition by classical Gram–Schmidt.
///
/// For an `m x n` input with `k = min(m, n)`, returns `Q (m x k)` with
/// orthonormal columns and upper-triangular `R (k x n)`, `A ≈ Q·R`.
/// A column whose orthogonal residual has norm `<= 1e-7` is treated as
/// dependent and becomes a zero column of `Q`. Signs are normalised so the
/// diagonal of `R` is non-negative.
///
/// # Example
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::{matmul, qr};
///
/// let a = Array::from_rows(3, 2, &[3.0_f64, 1.0, 4.0, 2.0, 0.0, 5.0]);
/// let (q, r) = qr(&a).unwrap();
/// assert_eq!(q.shape(), &[3, 2]);
/// assert_eq!(r.shape(), &[2, 2]);
/// assert!(r[(0, 0)] > 0.0 && r[(1, 1)] > 0.0);
/// assert!(matmul(&q, &r).unwrap().all_close(&a, 1e-12, 0.0));
/// ```
pub fn qr<T: FloatScalar>(a: &Array<T>) -> Result<(Array<T>, Array<T>), LinalgError> {
    let (m, n) = matrix_2d(a)?;
    let k = m.min(n);
    if k == 0 {
        return Ok((Array::zeros(&[m, 0]), Array::zeros(&[0, n])));
    }
    let data = a.as_slice();
    let threshold = T::lit(DEPENDENT_COLUMN);

    // Q stored column-major while it is built: column j is q[j*m..(j+1)*m]
    let mut q = vec![T::zero(); k * m];
    let mut v = vec![T::zero(); m];
    for j in 0..k {
        for (i, vi) in v.iter_mut().enumerate() {
            *vi = data[i * n + j];
        }
        // classical: all projections use the original column
        let coeffs: Vec<T> = q[..j * m]
            .chunks_exact(m)
            .map(|qc| dot(qc, &v))
            .collect();
        for (qc, &c) in q[..j * m].chunks_exact(m).zip(coeffs.iter()) {
            for (vi, &qi) in v.iter_mut().zip(qc.iter()) {
                *vi = *vi - c * qi;
            }
        }

        let norm = dot(&v, &v).sqrt();
        let col = &mut q[j * m..(j + 1) * m];
        if norm > threshold {
            for (qi, &vi) in col.iter_mut().zip(v.iter()) {
                *qi = vi / norm;
            }
        }
    }

    // the column-major Q buffer read row-major is Qᵀ (k x m)
    let mut r = vec![T::zero(); k * n];
    gemm(&q, data, &mut r, k, m, n);

    for j in 0..k {
        if r[j * n + j] < T::zero() {
            for x in r[j * n..(j + 1) * n].iter_mut() {
                *x = -*x;
            }
            for x in q[j * m..(j + 1) * m].iter_mut() {
                *x = -*x;
            }
        }
    }

    let mut q_rows = vec![T::zero(); m * k];
    transpose_into(&q, &mut q_rows, k, m);
    Ok((Array::from_vec(&[m, k], q_rows), Array::from_vec(&[k, n], r)))
}

fn dot<T: FloatScalar>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b.iter()).fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

/// Numerical rank from the diagonal of `R` in [`qr`]: the number of
/// entries with `|R[i, i]| > tol`. Empty matrices have rank 0.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::matrix_rank;
///
/// let a = Array::from_rows(3, 3, &[1.0_f64, 2.0, 3.0, 2.0, 4.0, 6.0, 1.0, 0.0, 1.0]);
/// assert_eq!(matrix_rank(&a, 1e-5).unwrap(), 2);
/// ```
pub fn matrix_rank<T: FloatScalar>(a: &Array<T>, tol: T) -> Result<usize, LinalgError> {
    let (m, n) = matrix_2d(a)?;
    if m == 0 || n == 0 {
        return Ok(0);
    }
    let (_, r) = qr(a)?;
    let k = m.min(n);
    Ok((0..k).filter(|&i| r[(i, i)].abs() > tol).count())
}

/// [`matrix_rank`] with the default tolerance `1e-5`.
pub fn matrix_rank_default<T: FloatScalar>(a: &Array<T>) -> Result<usize, LinalgError> {
    matrix_rank(a, T::lit(1e-5))
}
