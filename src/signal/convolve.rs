use alloc::vec::Vec;

use crate::array::Array;
use crate::traits::Scalar;

use super::{vector_len, SignalError};

/// Output extent of [`convolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolveMode {
    /// Every point of overlap, `n + m - 1` samples.
    #[default]
    Full,
    /// Centered on the longer operand, `max(n, m)` samples.
    Same,
    /// Only points of complete overlap, `max(n, m) - min(n, m) + 1` samples.
    Valid,
}

/// Discrete linear convolution of two 1-D arrays.
///
/// The operands are swapped when `v` is longer, so the result does not
/// depend on argument order.
///
/// ```
/// use tinyops::Array;
/// use tinyops::signal::{convolve, ConvolveMode};
///
/// let a = Array::from_slice(&[1.0_f64, 2.0, 3.0]);
/// let v = Array::from_slice(&[0.0, 1.0, 0.5]);
/// let full = convolve(&a, &v, ConvolveMode::Full).unwrap();
/// assert_eq!(full.as_slice(), &[0.0, 1.0, 2.5, 4.0, 1.5]);
/// let same = convolve(&a, &v, ConvolveMode::Same).unwrap();
/// assert_eq!(same.as_slice(), &[1.0, 2.5, 4.0]);
/// ```
///
/// # Errors
///
/// [`SignalError::EmptyInput`] naming the first empty operand (`"a"`, then
/// `"v"`), or [`SignalError::Shape`] when either input is not 1-D.
pub fn convolve<T: Scalar>(
    a: &Array<T>,
    v: &Array<T>,
    mode: ConvolveMode,
) -> Result<Array<T>, SignalError> {
    let la = vector_len(a)?;
    let lv = vector_len(v)?;
    if la == 0 {
        return Err(SignalError::EmptyInput("a"));
    }
    if lv == 0 {
        return Err(SignalError::EmptyInput("v"));
    }

    let (long, short) = if lv > la {
        (v.as_slice(), a.as_slice())
    } else {
        (a.as_slice(), v.as_slice())
    };
    let (n, m) = (long.len(), short.len());

    let mut full = alloc::vec![T::zero(); n + m - 1];
    for (i, &x) in long.iter().enumerate() {
        for (j, &k) in short.iter().enumerate() {
            full[i + j] = full[i + j] + x * k;
        }
    }

    let (start, len) = match mode {
        ConvolveMode::Full => (0, n + m - 1),
        ConvolveMode::Same => ((m - 1) / 2, n),
        ConvolveMode::Valid => (m - 1, n - m + 1),
    };
    let out: Vec<T> = full[start..start + len].to_vec();
    Ok(Array::from_vec(&[len], out))
}
