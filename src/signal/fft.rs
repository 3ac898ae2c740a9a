use alloc::vec::Vec;

use num_complex::Complex;

use crate::array::Array;
use crate::traits::FloatScalar;

use super::{vector_len, SignalError};

/// Discrete Fourier transform by recursive radix-2 Cooley–Tukey.
///
/// Uses the `exp(-2πi·k/N)` sign convention and no normalization. Inputs of
/// length 0 or 1 are returned unchanged.
///
/// # Errors
///
/// [`SignalError::NotPowerOfTwo`] when `x.len()` is not a power of two.
pub fn fft<T: FloatScalar>(x: &[Complex<T>]) -> Result<Vec<Complex<T>>, SignalError> {
    let n = x.len();
    if n <= 1 {
        return Ok(x.to_vec());
    }
    if !n.is_power_of_two() {
        return Err(SignalError::NotPowerOfTwo { len: n });
    }
    Ok(radix2(x))
}

fn radix2<T: FloatScalar>(x: &[Complex<T>]) -> Vec<Complex<T>> {
    let n = x.len();
    if n == 1 {
        return x.to_vec();
    }
    let even: Vec<Complex<T>> = x.iter().step_by(2).copied().collect();
    let odd: Vec<Complex<T>> = x.iter().skip(1).step_by(2).copied().collect();
    let even = radix2(&even);
    let odd = radix2(&odd);

    let half = n / 2;
    let step = -T::lit(core::f64::consts::TAU) / T::from_len(n);
    let mut out = alloc::vec![Complex::new(T::zero(), T::zero()); n];
    for k in 0..half {
        let t = Complex::cis(step * T::from_len(k)) * odd[k];
        out[k] = even[k] + t;
        out[k + half] = even[k] - t;
    }
    out
}

/// Inverse DFT, normalized by `1/N`.
///
/// Computed as `conj(fft(conj(x))) / N`, so the same length rule applies.
pub fn ifft<T: FloatScalar>(x: &[Complex<T>]) -> Result<Vec<Complex<T>>, SignalError> {
    let n = x.len();
    let conj: Vec<Complex<T>> = x.iter().map(|c| c.conj()).collect();
    let mut y = fft(&conj)?;
    let scale = T::from_len(n.max(1));
    for c in y.iter_mut() {
        *c = c.conj() / scale;
    }
    Ok(y)
}

/// FFT of a real 1-D array.
pub fn fft_real<T: FloatScalar>(x: &Array<T>) -> Result<Vec<Complex<T>>, SignalError> {
    vector_len(x)?;
    let samples: Vec<Complex<T>> = x
        .as_slice()
        .iter()
        .map(|&re| Complex::new(re, T::zero()))
        .collect();
    fft(&samples)
}

/// Sample frequencies for an `n`-point FFT with sample spacing `d`.
///
/// Non-negative frequencies first, then the negative ones:
/// `[0, 1, …, (n-1)/2, -(n/2), …, -1] / (n·d)`.
///
/// ```
/// use tinyops::signal::fftfreq;
///
/// let f = fftfreq(4, 0.25_f64);
/// assert_eq!(f.as_slice(), &[0.0, 1.0, -2.0, -1.0]);
/// ```
pub fn fftfreq<T: FloatScalar>(n: usize, d: T) -> Array<T> {
    if n == 0 {
        return Array::from_vec(&[0], Vec::new());
    }
    let scale = T::one() / (T::from_len(n) * d);
    let positive = (n - 1) / 2 + 1;
    let data: Vec<T> = (0..n)
        .map(|i| {
            if i < positive {
                T::from_len(i) * scale
            } else {
                -T::from_len(n - i) * scale
            }
        })
        .collect();
    Array::from_vec(&[n], data)
}
