use crate::array::{matmul_batched, Array};
use crate::traits::FloatScalar;

use super::{inv, pinv, LinalgError};

/// `x = a_inv · b`, treating `b` as a (batch of) vector(s) when it has one
/// axis fewer than `a`.
fn apply<T: FloatScalar>(a_ndim: usize, a_inv: &Array<T>, b: &Array<T>) -> Result<Array<T>, LinalgError> {
    if b.ndim() + 1 == a_ndim {
        let col = b.unsqueeze(b.ndim())?;
        let x = matmul_batched(a_inv, &col)?;
        let nd = x.ndim();
        Ok(x.squeeze(nd - 1)?)
    } else {
        Ok(matmul_batched(a_inv, b)?)
    }
}

/// Solve `A·x = b` as `inv(A)·b`.
///
/// `a` is `(..., M, M)`; `b` is `(..., M)` or `(..., M, K)`, and the result
/// has `b`'s layout. Accuracy follows [`inv`].
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::solve;
///
/// let a = Array::from_rows(2, 2, &[3.0_f64, 1.0, 1.0, 2.0]);
/// let b = Array::from_slice(&[9.0, 8.0]);
/// let x = solve(&a, &b).unwrap();
/// assert!(x.all_close(&Array::from_slice(&[2.0, 3.0]), 1e-10, 0.0));
/// ```
pub fn solve<T: FloatScalar>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, LinalgError> {
    let a_inv = inv(a)?;
    apply(a.ndim(), &a_inv, b)
}

/// Least-squares solution of `A·x ≈ b` as `pinv(A)·b`.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::lstsq;
///
/// // fit y = 1 + 2t through three exact points
/// let a = Array::from_rows(3, 2, &[1.0_f64, 0.0, 1.0, 1.0, 1.0, 2.0]);
/// let y = Array::from_slice(&[1.0, 3.0, 5.0]);
/// let coef = lstsq(&a, &y).unwrap();
/// assert!(coef.all_close(&Array::from_slice(&[1.0, 2.0]), 1e-8, 0.0));
/// ```
pub fn lstsq<T: FloatScalar>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, LinalgError> {
    let a_pinv = pinv(a)?;
    apply(a.ndim(), &a_pinv, b)
}
