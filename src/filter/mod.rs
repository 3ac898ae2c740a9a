//! Kalman-filter helpers: Merwe scaled sigma points and discrete white-noise
//! process covariance.
//!
//! Both are stateless constructors for the matrices a UKF or linear Kalman
//! filter needs; the filter loop itself is left to the caller.
//!
//! # Sigma points
//!
//! ```
//! use tinyops::Array;
//! use tinyops::filter::{sigma_points, MerweParams};
//!
//! let x = Array::from_slice(&[1.0_f64, 2.0]);
//! let p = Array::from_rows(2, 2, &[2.0, 0.5, 0.5, 2.0]);
//! let sp = sigma_points(&x, &p, &MerweParams::default()).unwrap();
//! assert_eq!(sp.sigmas.shape(), &[5, 2]);
//!
//! // weighted mean of the sigma points recovers x
//! let mean: f64 = (0..5).map(|i| sp.wm[i] * sp.sigmas[(i, 0)]).sum();
//! assert!((mean - 1.0).abs() < 1e-6);
//! ```
//!
//! # Process noise
//!
//! ```
//! use tinyops::filter::noise_cov;
//!
//! let q = noise_cov(2, 0.1_f64, 1.0, 1, true).unwrap();
//! assert!((q[(1, 1)] - 0.01).abs() < 1e-15);
//! ```

mod noise;
mod sigma;


pub use noise::noise_cov;
pub use sigma::{sigma_points, MerweParams, SigmaPoints};

use crate::array::ShapeError;

/// Errors from the filter helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// White-noise model order outside `2..=4`.
    InvalidDimension { dim: usize },
    /// Scaled covariance is not positive definite (Cholesky failed).
    CovarianceNotPD,
    /// State or covariance has the wrong shape.
    Shape(ShapeError),
}

impl core::fmt::Display for FilterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FilterError::InvalidDimension { dim } => {
                write!(f, "white-noise dimension must be 2, 3 or 4, got {}", dim)
            }
            FilterError::CovarianceNotPD => {
                write!(f, "covariance matrix is not positive definite")
            }
            FilterError::Shape(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FilterError {}

impl From<ShapeError> for FilterError {
    fn from(e: ShapeError) -> Self {
        FilterError::Shape(e)
    }
}
