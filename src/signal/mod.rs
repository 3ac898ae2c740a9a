//! One-dimensional signal processing: radix-2 FFT, sample frequencies,
//! cosine-sum windows and linear convolution.
//!
//! Complex samples are [`num_complex::Complex`]; real-valued results come
//! back as [`Array`](crate::Array).
//!
//! ```
//! use tinyops::Complex;
//! use tinyops::signal::{fft, ifft};
//!
//! let x: Vec<Complex<f64>> = [1.0, 2.0, 3.0, 4.0]
//!     .iter()
//!     .map(|&v| Complex::new(v, 0.0))
//!     .collect();
//! let spectrum = fft(&x).unwrap();
//! assert_eq!(spectrum[0], Complex::new(10.0, 0.0));
//!
//! let back = ifft(&spectrum).unwrap();
//! for (a, b) in back.iter().zip(x.iter()) {
//!     assert!((a - b).norm() < 1e-12);
//! }
//! ```

mod convolve;
mod fft;
mod window;


pub use convolve::{convolve, ConvolveMode};
pub use fft::{fft, fft_real, fftfreq, ifft};
pub use window::{blackman, hamming, hanning};

use crate::array::ShapeError;

/// Errors from the signal routines.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalError {
    /// FFT length is not a power of two.
    NotPowerOfTwo { len: usize },
    /// A required operand was empty; carries the operand name.
    EmptyInput(&'static str),
    /// Input is not one-dimensional.
    Shape(ShapeError),
}

impl core::fmt::Display for SignalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SignalError::NotPowerOfTwo { len } => {
                write!(f, "FFT length must be a power of 2, got {}", len)
            }
            SignalError::EmptyInput(name) => write!(f, "{} cannot be empty", name),
            SignalError::Shape(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SignalError {}

impl From<ShapeError> for SignalError {
    fn from(e: ShapeError) -> Self {
        SignalError::Shape(e)
    }
}

/// Require a 1-D array.
fn vector_len<T>(x: &crate::array::Array<T>) -> Result<usize, SignalError> {
    if x.ndim() != 1 {
        return Err(ShapeError::WrongDims {
            expected: 1,
            got: x.ndim(),
        }
        .into());
    }
    Ok(x.len())
}
