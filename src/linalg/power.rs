use alloc::vec;

use crate::array::{matmul_batched, Array};
use crate::traits::FloatScalar;

use super::{inv, square_dims, LinalgError};

/// Raise every square matrix in `a` to the integer power `n`.
///
/// `n == 0` gives identities of `a`'s shape; negative powers raise
/// [`inv`]`(a)`. Uses binary exponentiation.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::matrix_power;
///
/// let a = Array::from_rows(2, 2, &[1.0_f64, 1.0, 0.0, 1.0]);
/// let a5 = matrix_power(&a, 5).unwrap();
/// assert_eq!(a5.as_slice(), &[1.0, 5.0, 0.0, 1.0]);
/// ```
pub fn matrix_power<T: FloatScalar>(a: &Array<T>, n: i32) -> Result<Array<T>, LinalgError> {
    let (_, m) = square_dims(a)?;

    if n == 0 {
        let mut eye = vec![T::zero(); m * m];
        for i in 0..m {
            eye[i * m + i] = T::one();
        }
        return Ok(Array::tile_batch(&eye, a.batch_shape(), m, m));
    }

    let mut base = if n < 0 { inv(a)? } else { a.clone() };
    let mut exp = n.unsigned_abs();
    let mut result: Option<Array<T>> = None;
    while exp > 0 {
        if exp & 1 == 1 {
            result = Some(match result {
                Some(r) => matmul_batched(&r, &base)?,
                None => base.clone(),
            });
        }
        exp >>= 1;
        if exp > 0 {
            base = matmul_batched(&base, &base)?;
        }
    }
    // exp started non-zero, so at least one bit was set
    Ok(result.unwrap_or(base))
}
