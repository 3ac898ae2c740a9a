//! Linear algebra on [`Array`](crate::Array) batches.
//!
//! Every routine treats an array with two or more axes as a batch of
//! matrices over its last two axes and returns newly allocated arrays.
//!
//! - [`inv`] / [`pinv`] — Newton–Schulz inverse and Moore–Penrose
//!   pseudo-inverse built only from matrix products. [`NewtonSchulz`]
//!   exposes the iteration budget.
//! - [`solve`] / [`lstsq`] — `inv(a)·b` and `pinv(a)·b`.
//! - [`cholesky`], [`qr`] (Gram–Schmidt), [`matrix_rank`], [`det`] (Laplace).
//! - [`norm`] / [`norm_axis`] with [`NormOrd`], [`cond`], [`matrix_power`].
//! - Products: [`matmul`], [`dot`], [`inner`], [`outer`], [`vdot`], [`kron`],
//!   [`tensordot`].
//! - [`diagonal`], [`trace`].
//!
//! # Example
//!
//! ```
//! use tinyops::Array;
//! use tinyops::linalg::{inv, matmul};
//!
//! let a = Array::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
//! let a_inv = inv(&a).unwrap();
//! let id = matmul(&a, &a_inv).unwrap();
//! assert!(id.all_close(&Array::eye(2), 1e-10, 0.0));
//! ```

mod cholesky;
mod det;
mod diagonal;
mod inverse;
mod norm;
mod power;
mod product;
mod qr;
mod solve;

#[cfg(test)]
mod tests;

pub use cholesky::cholesky;
pub use det::det;
pub use diagonal::{diagonal, trace};
pub use inverse::{inv, pinv, NewtonSchulz};
pub use norm::{cond, norm, norm_axis, NormOrd};
pub use power::matrix_power;
pub use product::{dot, inner, kron, matmul, outer, tensordot, vdot, TensorAxes};
pub use qr::{matrix_rank, matrix_rank_default, qr};
pub use solve::{lstsq, solve};

use crate::array::{Array, ShapeError};

/// Errors from linear algebra operations.
///
/// There is no non-convergence variant: the iterative
/// inverses return their best effort and leave quality checks to callers.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::{cholesky, LinalgError};
///
/// let not_pd = Array::from_rows(2, 2, &[1.0_f64, 5.0, 5.0, 1.0]);
/// assert_eq!(cholesky(&not_pd).unwrap_err(), LinalgError::NotPositiveDefinite);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Operand shape is unsuitable for the operation.
    Shape(ShapeError),
    /// Matrix is not positive definite (required for Cholesky).
    NotPositiveDefinite,
    /// Operation variant exists in numpy but is not implemented here.
    Unsupported(&'static str),
    /// Norm order is not defined for the operand's dimensionality.
    InvalidNorm,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::Shape(e) => write!(f, "{}", e),
            LinalgError::NotPositiveDefinite => write!(f, "matrix is not positive definite"),
            LinalgError::Unsupported(what) => write!(f, "{} is not supported", what),
            LinalgError::InvalidNorm => write!(f, "invalid norm order for this input"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

impl From<ShapeError> for LinalgError {
    fn from(e: ShapeError) -> Self {
        LinalgError::Shape(e)
    }
}

/// Require exactly two axes, returning `(rows, cols)`.
pub(crate) fn matrix_2d<T>(a: &Array<T>) -> Result<(usize, usize), ShapeError> {
    match a.shape() {
        &[rows, cols] => Ok((rows, cols)),
        s => Err(ShapeError::WrongDims {
            expected: 2,
            got: s.len(),
        }),
    }
}

/// Require `(..., n, n)`, returning `(batch, n)`.
pub(crate) fn square_dims<T>(a: &Array<T>) -> Result<(usize, usize), ShapeError> {
    let (batch, rows, cols) = a.matrix_dims()?;
    if rows != cols {
        return Err(ShapeError::NotSquare { rows, cols });
    }
    Ok((batch, rows))
}
