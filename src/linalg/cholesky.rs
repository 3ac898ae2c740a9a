use crate::array::{Array, ShapeError};
use crate::traits::FloatScalar;

use super::{matrix_2d, LinalgError};

/// Cholesky factorization in place on a row-major `n x n` slice.
///
/// On return the lower triangle (including the diagonal) holds `L` and the
/// strict upper triangle is zeroed. Only the lower triangle of the input is
/// read.
pub(crate) fn cholesky_in_place<T: FloatScalar>(a: &mut [T], n: usize) -> Result<(), LinalgError> {
    debug_assert_eq!(a.len(), n * n);

    for j in 0..n {
        let mut diag = a[j * n + j];
        for k in 0..j {
            let ljk = a[j * n + k];
            diag = diag - ljk * ljk;
        }
        // NaN pivots fail here too
        if !(diag > T::zero()) {
            log::debug!("cholesky: non-positive pivot {:?} at column {}", diag, j);
            return Err(LinalgError::NotPositiveDefinite);
        }
        let ljj = diag.sqrt();
        a[j * n + j] = ljj;

        for i in (j + 1)..n {
            let mut s = a[i * n + j];
            for k in 0..j {
                s = s - a[i * n + k] * a[j * n + k];
            }
            a[i * n + j] = s / ljj;
        }
        for x in a[j * n + j + 1..(j + 1) * n].iter_mut() {
            *x = T::zero();
        }
    }

    Ok(())
}

/// Lower-triangular Cholesky factor `L` of a symmetric positive-definite
/// matrix, `L·Lᵀ = A`.
///
/// `a` must be 2-D and square; a `0 x 0` input returns `0 x 0`.
///
/// # Errors
///
/// Shape errors for non-2-D or non-square input, and
/// [`LinalgError::NotPositiveDefinite`] when a pivot is not strictly
/// positive.
///
/// # Example
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::cholesky;
///
/// let a = Array::from_rows(3, 3, &[
///     4.0_f64, 12.0, -16.0,
///     12.0, 37.0, -43.0,
///     -16.0, -43.0, 98.0,
/// ]);
/// let l = cholesky(&a).unwrap();
/// assert_eq!(l.as_slice(), &[2.0, 0.0, 0.0, 6.0, 1.0, 0.0, -8.0, 5.0, 3.0]);
/// ```
pub fn cholesky<T: FloatScalar>(a: &Array<T>) -> Result<Array<T>, LinalgError> {
    let (rows, cols) = matrix_2d(a)?;
    if rows != cols {
        return Err(ShapeError::NotSquare { rows, cols }.into());
    }
    let mut l = a.clone();
    cholesky_in_place(l.as_mut_slice(), rows)?;
    Ok(l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::matmul;

    #[test]
    fn reconstructs_input() {
        let a = Array::from_rows(2, 2, &[4.0_f64, 2.0, 2.0, 3.0]);
        let l = cholesky(&a).unwrap();
        assert_eq!(l[(0, 1)], 0.0);
        let lt = l.transpose().unwrap();
        let back = matmul(&l, &lt).unwrap();
        assert!(back.all_close(&a, 1e-12, 0.0));
    }

    #[test]
    fn empty() {
        let a = Array::<f64>::zeros(&[0, 0]);
        assert_eq!(cholesky(&a).unwrap().shape(), &[0, 0]);
    }

    #[test]
    fn not_positive_definite() {
        let a = Array::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 1.0]);
        assert_eq!(cholesky(&a).unwrap_err(), LinalgError::NotPositiveDefinite);
        let z = Array::<f64>::zeros(&[2, 2]);
        assert_eq!(cholesky(&z).unwrap_err(), LinalgError::NotPositiveDefinite);
    }

    #[test]
    fn rejects_batches_and_rectangles() {
        let b = Array::<f64>::zeros(&[2, 2, 2]);
        assert_eq!(
            cholesky(&b).unwrap_err(),
            LinalgError::Shape(ShapeError::WrongDims { expected: 2, got: 3 })
        );
        let r = Array::<f64>::zeros(&[2, 3]);
        assert_eq!(
            cholesky(&r).unwrap_err(),
            LinalgError::Shape(ShapeError::NotSquare { rows: 2, cols: 3 })
        );
    }
}
