use alloc::vec::Vec;

use crate::array::{Array, ShapeError};
use crate::traits::FloatScalar;

use super::{matrix_2d, LinalgError};

/// Laplace expansion along the first row of a row-major `n x n` slice.
fn laplace<T: FloatScalar>(a: &[T], n: usize) -> T {
    match n {
        0 => T::one(),
        1 => a[0],
        2 => a[0] * a[3] - a[1] * a[2],
        _ => {
            let mut minor = Vec::with_capacity((n - 1) * (n - 1));
            let mut total = T::zero();
            for j in 0..n {
                minor.clear();
                for row in a[n..].chunks_exact(n) {
                    minor.extend(
                        row.iter()
                            .enumerate()
                            .filter(|&(c, _)| c != j)
                            .map(|(_, &x)| x),
                    );
                }
                let term = a[j] * laplace(&minor, n - 1);
                total = if j % 2 == 0 { total + term } else { total - term };
            }
            total
        }
    }
}

/// Determinant of a 2-D square matrix by cofactor expansion.
///
/// Cost grows factorially with `n`; meant for the small matrices of
/// geometric transforms and tests. A `0 x 0` matrix has determinant 1.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::det;
///
/// let a = Array::from_rows(3, 3, &[2.0_f64, 0.0, 1.0, 1.0, 3.0, 2.0, 1.0, 1.0, 2.0]);
/// assert_eq!(det(&a).unwrap(), 6.0);
/// ```
pub fn det<T: FloatScalar>(a: &Array<T>) -> Result<T, LinalgError> {
    let (rows, cols) = matrix_2d(a)?;
    if rows != cols {
        return Err(ShapeError::NotSquare { rows, cols }.into());
    }
    if rows > 8 {
        log::debug!("det: cofactor expansion on a {}x{} matrix", rows, cols);
    }
    Ok(laplace(a.as_slice(), rows))
}
