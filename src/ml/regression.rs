use alloc::vec::Vec;

use crate::array::{Array, ShapeError};
use crate::linalg::{inv, matmul, pinv, LinalgError};
use crate::traits::FloatScalar;

/// Validate `(x, y)` and build the design matrix `[x | 1]`.
fn design<T: FloatScalar>(x: &Array<T>, y: &Array<T>) -> Result<Array<T>, LinalgError> {
    if x.ndim() != 2 {
        return Err(ShapeError::WrongDims {
            expected: 2,
            got: x.ndim(),
        }
        .into());
    }
    let (rows, cols) = (x.shape()[0], x.shape()[1]);
    if y.shape() != [rows] {
        return Err(ShapeError::Mismatch {
            lhs: x.shape().to_vec(),
            rhs: y.shape().to_vec(),
        }
        .into());
    }

    let mut data = Vec::with_capacity(rows * (cols + 1));
    for row in x.as_slice().chunks_exact(cols.max(1)).take(rows) {
        data.extend_from_slice(&row[..cols]);
        data.push(T::one());
    }
    if cols == 0 {
        data.resize(rows, T::one());
    }
    Ok(Array::from_vec(&[rows, cols + 1], data))
}

/// Ordinary least squares through the normal equations,
/// `w = pinv(XbᵀXb)·Xbᵀ·y` with `Xb = [x | 1]`.
///
/// `x` is `(n_samples, n_features)` and `y` is `(n_samples,)`; the result
/// has `n_features + 1` weights, intercept last.
///
/// ```
/// use tinyops::Array;
/// use tinyops::ml::linear_regression;
///
/// // y = 2·x + 1
/// let x = Array::from_rows(4, 1, &[0.0_f64, 1.0, 2.0, 3.0]);
/// let y = Array::from_slice(&[1.0, 3.0, 5.0, 7.0]);
/// let w = linear_regression(&x, &y).unwrap();
/// assert!((w[0] - 2.0).abs() < 1e-6);
/// assert!((w[1] - 1.0).abs() < 1e-6);
/// ```
pub fn linear_regression<T: FloatScalar>(
    x: &Array<T>,
    y: &Array<T>,
) -> Result<Array<T>, LinalgError> {
    let xb = design(x, y)?;
    let xbt = xb.transpose()?;
    let gram = matmul(&xbt, &xb)?;
    let rhs = matmul(&xbt, y)?;
    matmul(&pinv(&gram)?, &rhs)
}

/// Ridge regression, `w = (XbᵀXb + α·I')⁻¹·Xbᵀ·y`.
///
/// `I'` is the identity with its last diagonal entry zeroed, so the
/// intercept is not penalized.
pub fn ridge<T: FloatScalar>(
    x: &Array<T>,
    y: &Array<T>,
    alpha: T,
) -> Result<Array<T>, LinalgError> {
    let xb = design(x, y)?;
    let p = xb.shape()[1];
    let xbt = xb.transpose()?;
    let mut gram = matmul(&xbt, &xb)?;
    for i in 0..p - 1 {
        gram[(i, i)] = gram[(i, i)] + alpha;
    }
    let rhs = matmul(&xbt, y)?;
    matmul(&inv(&gram)?, &rhs)
}
