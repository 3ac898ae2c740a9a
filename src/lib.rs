//! # tinyops
//!
//! Pure-Rust numpy/SciPy-style numeric routines, no-std compatible (with
//! `alloc`). The centerpiece is a matrix inverse and Moore–Penrose
//! pseudo-inverse computed by Newton–Schulz iteration, using nothing but
//! matrix products, so every routine that needs an inverse is branch-free
//! and deterministic.
//!
//! ## Quick start
//!
//! ```
//! use tinyops::Array;
//! use tinyops::linalg::{inv, matmul};
//!
//! let a = Array::from_rows(
//!     3,
//!     3,
//!     &[4.0_f64, 12.0, -16.0, 12.0, 37.0, -43.0, -16.0, -43.0, 98.0],
//! );
//! let a_inv = inv(&a).unwrap();
//! let id = matmul(&a_inv, &a).unwrap();
//! assert!(id.all_close(&Array::eye(3), 1e-4, 0.0));
//! ```
//!
//! ## Modules
//!
//! - [`array`] — Heap-allocated, row-major N-dimensional [`Array<T>`]. Arrays
//!   with two or more axes are batches of matrices over their last two axes.
//!   Includes reshaping, permutation, element-wise arithmetic and batched
//!   matrix products ([`matmul_batched`]).
//!
//! - [`linalg`] — Newton–Schulz [`linalg::inv`] / [`linalg::pinv`] with a
//!   configurable [`linalg::NewtonSchulz`] budget, plus `solve`, `lstsq`,
//!   Cholesky, Gram–Schmidt QR, rank, determinant, norms, condition
//!   numbers, matrix powers, products (`dot`, `kron`, `tensordot`, ...) and
//!   diagonals.
//!
//! - [`filter`] — Merwe scaled sigma points and discrete white-noise
//!   process covariance for Kalman filters.
//!
//! - [`signal`] — Radix-2 FFT / inverse FFT over [`Complex`], `fftfreq`,
//!   Hann / Hamming / Blackman windows and 1-D convolution.
//!
//! - [`ml`] — Closed-form linear and ridge regression.
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all array elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats, required by every numeric routine
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade at `debug` / `trace` level
//! (iteration counts and residuals of the Newton–Schulz solver). The crate
//! never installs a logger.
//!
//! ## Cargo features
//!
//! | Feature | Default  | Description |
//! |---------|----------|-------------|
//! | `std`   | yes      | Hardware FPU via system libm, `std::error::Error` impls |
//! | `libm`  | baseline | Pure-Rust software float fallback for `no_std` |

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("tinyops needs either the `std` or the `libm` feature for float math");

extern crate alloc;

pub mod array;
pub mod filter;
pub mod linalg;
pub mod ml;
pub mod signal;
pub mod traits;

pub use array::{matmul_batched, Array, ShapeError};
pub use traits::{FloatScalar, Scalar};

pub use num_complex::Complex;
