use alloc::vec::Vec;

use crate::array::Array;
use crate::traits::FloatScalar;

/// Symmetric cosine-sum window `Σ (-1)^k a_k cos(2πk·i/(m-1))`.
fn cosine_sum<T: FloatScalar>(m: usize, coeffs: &[f64]) -> Array<T> {
    match m {
        0 => return Array::from_vec(&[0], Vec::new()),
        1 => return Array::from_slice(&[T::one()]),
        _ => {}
    }
    let denom = T::from_len(m - 1);
    let tau = T::lit(core::f64::consts::TAU);
    let data: Vec<T> = (0..m)
        .map(|i| {
            let phase = tau * T::from_len(i) / denom;
            coeffs
                .iter()
                .enumerate()
                .fold(T::zero(), |acc, (k, &a)| {
                    let term = T::lit(a) * (phase * T::from_len(k)).cos();
                    if k % 2 == 0 {
                        acc + term
                    } else {
                        acc - term
                    }
                })
        })
        .collect();
    Array::from_vec(&[m], data)
}

/// Hann window of `m` points.
///
/// ```
/// use tinyops::signal::hanning;
///
/// let w = hanning::<f64>(5);
/// assert!((w[2] - 1.0).abs() < 1e-15);
/// assert!(w[0].abs() < 1e-15);
/// ```
pub fn hanning<T: FloatScalar>(m: usize) -> Array<T> {
    cosine_sum(m, &[0.5, 0.5])
}

/// Hamming window of `m` points.
pub fn hamming<T: FloatScalar>(m: usize) -> Array<T> {
    cosine_sum(m, &[0.54, 0.46])
}

/// Blackman window of `m` points.
pub fn blackman<T: FloatScalar>(m: usize) -> Array<T> {
    cosine_sum(m, &[0.42, 0.5, 0.08])
}
