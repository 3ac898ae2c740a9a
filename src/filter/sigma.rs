use alloc::vec::Vec;

use crate::array::{Array, ShapeError};
use crate::linalg::{cholesky, LinalgError};
use crate::traits::FloatScalar;

use super::FilterError;

/// Merwe scaled sigma-point parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MerweParams<T> {
    /// Spread of the points around the mean (typically 1e-4 to 1).
    pub alpha: T,
    /// Prior knowledge of the distribution (2 is optimal for Gaussians).
    pub beta: T,
    /// Secondary scaling (typically 0 or `3 - n`).
    pub kappa: T,
}

impl<T: FloatScalar> Default for MerweParams<T> {
    /// `alpha = 1e-3`, `beta = 2`, `kappa = 0`.
    fn default() -> Self {
        Self {
            alpha: T::lit(1e-3),
            beta: T::one().twice(),
            kappa: T::zero(),
        }
    }
}

/// Sigma points with their mean and covariance weights.
#[derive(Debug, Clone, PartialEq)]
pub struct SigmaPoints<T> {
    /// `(2n + 1, n)`: the mean, then `x + U[i]` for each row of `U`, then
    /// `x - U[i]`.
    pub sigmas: Array<T>,
    /// Mean weights, length `2n + 1`.
    pub wm: Array<T>,
    /// Covariance weights, length `2n + 1`.
    pub wc: Array<T>,
}

/// Merwe scaled sigma points for state `x` with covariance `p`.
///
/// `x` is `(n,)` or `(n, 1)` and `p` is `(n, n)`. With
/// `λ = α²(n + κ) − n`, the spread comes from the upper Cholesky factor
/// `U = Lᵀ` of `(n + λ)·P`.
///
/// # Errors
///
/// [`FilterError::Shape`] for mis-shaped inputs and
/// [`FilterError::CovarianceNotPD`] when `(n + λ)·P` has no Cholesky factor.
pub fn sigma_points<T: FloatScalar>(
    x: &Array<T>,
    p: &Array<T>,
    params: &MerweParams<T>,
) -> Result<SigmaPoints<T>, FilterError> {
    let n = match x.shape() {
        &[n] | &[n, 1] => n,
        s => {
            return Err(ShapeError::Mismatch {
                lhs: s.to_vec(),
                rhs: p.shape().to_vec(),
            }
            .into())
        }
    };
    if p.shape() != [n, n] {
        return Err(ShapeError::Mismatch {
            lhs: x.shape().to_vec(),
            rhs: p.shape().to_vec(),
        }
        .into());
    }

    let nf = T::from_len(n);
    let alpha2 = params.alpha * params.alpha;
    let lambda = alpha2 * (nf + params.kappa) - nf;

    let l = cholesky(&(p * (nf + lambda))).map_err(|e| match e {
        LinalgError::Shape(s) => FilterError::Shape(s),
        _ => FilterError::CovarianceNotPD,
    })?;
    let u = l.transpose()?;

    let mean = x.as_slice();
    let mut sigmas = Vec::with_capacity((2 * n + 1) * n);
    sigmas.extend_from_slice(mean);
    for row in u.as_slice().chunks_exact(n.max(1)).take(n) {
        sigmas.extend(mean.iter().zip(row.iter()).map(|(&m, &d)| m + d));
    }
    for row in u.as_slice().chunks_exact(n.max(1)).take(n) {
        sigmas.extend(mean.iter().zip(row.iter()).map(|(&m, &d)| m - d));
    }

    let w = T::one() / (nf + lambda).twice();
    let wm0 = lambda / (nf + lambda);
    let wc0 = wm0 + (T::one() - alpha2 + params.beta);
    let mut wm = Array::full(&[2 * n + 1], w);
    let mut wc = Array::full(&[2 * n + 1], w);
    wm[0] = wm0;
    wc[0] = wc0;

    Ok(SigmaPoints {
        sigmas: Array::from_vec(&[2 * n + 1, n], sigmas),
        wm,
        wc,
    })
}
