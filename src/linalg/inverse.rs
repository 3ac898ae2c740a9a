use alloc::vec;
use alloc::vec::Vec;

use crate::array::{gemm, transpose_into, Array};
use crate::traits::FloatScalar;

use super::{square_dims, LinalgError};

/// Newton–Schulz iteration budget.
///
/// Each step forms the product it needs for the update anyway (`A·X`, or
/// `X·A` for the tall pseudo-inverse branch) and measures the residual
/// `r = max|P - I|` on it:
///
/// - `r <= tolerance` stops immediately (rounding floor reached);
/// - once `min_iterations` updates have run, a residual that did not
///   shrink stops the iteration (singular input or rounding floor);
/// - otherwise the update is applied, at most `max_iterations` times.
///
/// [`NewtonSchulz::fixed`] turns the residual checks off and runs an exact
/// number of updates.
///
/// # Example
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::NewtonSchulz;
///
/// let a = Array::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 4.0]);
/// let x = NewtonSchulz::fixed(20).inv(&a).unwrap();
/// assert!((x[(0, 0)] - 0.5).abs() < 1e-12);
/// assert!((x[(1, 1)] - 0.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonSchulz<T> {
    /// Updates always applied unless the residual is already within tolerance.
    pub min_iterations: usize,
    /// Hard cap on the number of updates.
    pub max_iterations: usize,
    /// Convergence threshold on `max|P - I|`; `None` uses `n·ε` for an
    /// `n x n` identity target.
    pub tolerance: Option<T>,
    /// Whether residuals are measured at all.
    pub check_residual: bool,
}

impl<T> Default for NewtonSchulz<T> {
    fn default() -> Self {
        Self {
            min_iterations: 20,
            max_iterations: 100,
            tolerance: None,
            check_residual: true,
        }
    }
}

impl<T> NewtonSchulz<T> {
    /// Exactly `iterations` updates, no residual checks.
    pub fn fixed(iterations: usize) -> Self {
        Self {
            min_iterations: iterations,
            max_iterations: iterations,
            tolerance: None,
            check_residual: false,
        }
    }

    /// Override the convergence threshold.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Override the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Which side of the product converges to the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Side {
    /// `X ← X·(2I − A·X)`, `A·X → I_m`.
    Right,
    /// `X ← (2I − X·A)·X`, `X·A → I_n`.
    Left,
}

/// Maximum absolute column sum and maximum absolute row sum of a row-major
/// `rows x cols` matrix.
fn norm_one_inf<T: FloatScalar>(a: &[T], rows: usize, cols: usize) -> (T, T) {
    let mut col_sums = vec![T::zero(); cols];
    let mut norm_inf = T::zero();
    for row in a.chunks_exact(cols.max(1)).take(rows) {
        let mut row_sum = T::zero();
        for (c, &x) in col_sums.iter_mut().zip(row.iter()) {
            *c = *c + x.abs();
            row_sum = row_sum + x.abs();
        }
        norm_inf = norm_inf.max(row_sum);
    }
    let norm_one = col_sums.iter().fold(T::zero(), |m, &c| m.max(c));
    (norm_one, norm_inf)
}

/// Turn `p` (a `dim x dim` product) into `2I - p` in place, returning the
/// residual `max|p - I|` measured before the rewrite.
fn two_minus_in_place<T: FloatScalar>(p: &mut [T], dim: usize) -> T {
    let two = T::one().twice();
    let mut residual = T::zero();
    for (idx, v) in p.iter_mut().enumerate() {
        let diag = idx / dim == idx % dim;
        let target = if diag { T::one() } else { T::zero() };
        residual = residual.max((*v - target).abs());
        *v = if diag { two - *v } else { T::zero() - *v };
    }
    residual
}

impl<T: FloatScalar> NewtonSchulz<T> {
    /// Approximate inverse of every square matrix in `a`.
    ///
    /// Fails only on shape: fewer than two axes, or non-square last axes.
    /// Singular or badly conditioned input is not detected and yields a
    /// poor or non-finite result.
    pub fn inv(&self, a: &Array<T>) -> Result<Array<T>, LinalgError> {
        let (batch, n) = square_dims(a)?;
        let mut out = Vec::with_capacity(batch * n * n);
        if n > 0 {
            for m in a.as_slice().chunks_exact(n * n) {
                out.extend(self.iterate(m, n, n, T::zero(), Side::Right));
            }
        }
        Ok(Array::from_vec(a.shape(), out))
    }

    /// Approximate Moore–Penrose pseudo-inverse of every matrix in `a`.
    ///
    /// `(..., m, n)` input produces `(..., n, m)` output. Tall and square
    /// matrices (`m >= n`) converge towards a left inverse, wide ones towards
    /// a right inverse.
    pub fn pinv(&self, a: &Array<T>) -> Result<Array<T>, LinalgError> {
        let (batch, m, n) = a.matrix_dims()?;
        let side = if m >= n { Side::Left } else { Side::Right };
        let mut out = Vec::with_capacity(batch * m * n);
        if m > 0 && n > 0 {
            let eps = T::lit(1e-12);
            for mat in a.as_slice().chunks_exact(m * n) {
                out.extend(self.iterate(mat, m, n, eps, side));
            }
        } else {
            out.resize(batch * m * n, T::zero());
        }

        let mut shape = a.shape().to_vec();
        let nd = shape.len();
        shape.swap(nd - 2, nd - 1);
        Ok(Array::from_vec(&shape, out))
    }

    /// Run the iteration on one row-major `m x n` matrix, returning `X` (`n x m`).
    fn iterate(&self, a: &[T], m: usize, n: usize, eps: T, side: Side) -> Vec<T> {
        let (norm_one, norm_inf) = norm_one_inf(a, m, n);
        let scale = T::one() / (norm_one * norm_inf + eps);

        let mut x = vec![T::zero(); n * m];
        transpose_into(a, &mut x, m, n);
        for v in x.iter_mut() {
            *v = *v * scale;
        }

        // identity target is I_m on the right, I_n on the left
        let dim = match side {
            Side::Right => m,
            Side::Left => n,
        };
        let tolerance = self
            .tolerance
            .unwrap_or_else(|| T::epsilon() * T::from_len(dim));

        let mut prod = vec![T::zero(); dim * dim];
        let mut next = vec![T::zero(); n * m];
        let mut prev_residual = T::infinity();

        for step in 0..self.max_iterations {
            match side {
                Side::Right => gemm(a, &x, &mut prod, m, n, m),
                Side::Left => gemm(&x, a, &mut prod, n, m, n),
            }
            let residual = two_minus_in_place(&mut prod, dim);

            if self.check_residual {
                log::trace!("newton-schulz step {}: residual {:?}", step, residual);
                if residual <= tolerance {
                    log::debug!("newton-schulz converged after {} steps", step);
                    break;
                }
                if step >= self.min_iterations && !(residual < prev_residual) {
                    log::debug!(
                        "newton-schulz stagnated after {} steps (residual {:?})",
                        step,
                        residual
                    );
                    break;
                }
                prev_residual = residual;
            }

            match side {
                Side::Right => gemm(&x, &prod, &mut next, n, m, m),
                Side::Left => gemm(&prod, &x, &mut next, n, n, m),
            }
            core::mem::swap(&mut x, &mut next);
        }
        x
    }
}

/// Multiplicative inverse of every square matrix in `a`, by Newton–Schulz
/// iteration.
///
/// Uses only matrix products: `X₀ = Aᵀ / (‖A‖₁·‖A‖∞)`, then
/// `X ← X·(2I − A·X)` under the default [`NewtonSchulz`] budget. The result
/// is a best-effort approximation; callers that need a guarantee should
/// check `A·X ≈ I` themselves.
///
/// # Errors
///
/// [`ShapeError::TooFewDims`](crate::ShapeError::TooFewDims) below two axes,
/// [`ShapeError::NotSquare`](crate::ShapeError::NotSquare) when the last
/// two axes differ.
///
/// # Example
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::{inv, matmul};
///
/// let a = Array::from_rows(3, 3, &[
///     4.0_f64, 12.0, -16.0,
///     12.0, 37.0, -43.0,
///     -16.0, -43.0, 98.0,
/// ]);
/// let x = inv(&a).unwrap();
/// let id = matmul(&x, &a).unwrap();
/// assert!(id.all_close(&Array::eye(3), 1e-4, 0.0));
/// ```
pub fn inv<T: FloatScalar>(a: &Array<T>) -> Result<Array<T>, LinalgError> {
    NewtonSchulz::default().inv(a)
}

/// Moore–Penrose pseudo-inverse of every matrix in `a`, by Newton–Schulz
/// iteration.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::{pinv, matmul};
///
/// // tall: pinv(A)·A = I₂
/// let a = Array::from_rows(3, 2, &[1.0_f64, 0.0, 0.0, 1.0, 1.0, 1.0]);
/// let x = pinv(&a).unwrap();
/// assert_eq!(x.shape(), &[2, 3]);
/// let id = matmul(&x, &a).unwrap();
/// assert!(id.all_close(&Array::eye(2), 1e-8, 0.0));
/// ```
pub fn pinv<T: FloatScalar>(a: &Array<T>) -> Result<Array<T>, LinalgError> {
    NewtonSchulz::default().pinv(a)
}
