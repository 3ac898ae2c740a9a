use alloc::vec::Vec;

use crate::array::{normalize_axis, Array, ShapeError};
use crate::traits::FloatScalar;

use super::{inv, LinalgError};

/// Order of a vector or matrix norm.
///
/// | Order    | Vector                  | Matrix             |
/// |----------|-------------------------|--------------------|
/// | `Fro`    | invalid                 | Frobenius          |
/// | `Two`    | Euclidean               | unsupported (SVD)  |
/// | `One`    | `Σ|x|`                  | max column sum     |
/// | `NegOne` | `(Σ|x|⁻¹)⁻¹`            | min column sum     |
/// | `Inf`    | `max|x|`                | max row sum        |
/// | `NegInf` | `min|x|`                | min row sum        |
/// | `Zero`   | non-zero count          | invalid            |
/// | `P(p)`   | `(Σ|x|ᵖ)^(1/p)`         | invalid            |
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormOrd<T> {
    Fro,
    Two,
    One,
    NegOne,
    Inf,
    NegInf,
    Zero,
    P(T),
}

/// Largest (or smallest, when `largest` is false) of `values`; `Empty` if
/// there are none.
fn extreme<T: FloatScalar>(values: impl Iterator<Item = T>, largest: bool) -> Result<T, LinalgError> {
    values
        .reduce(|m, x| if largest { m.max(x) } else { m.min(x) })
        .ok_or_else(|| ShapeError::Empty.into())
}

fn power_sum<T: FloatScalar>(values: &[T], p: T) -> T {
    let s = values.iter().fold(T::zero(), |acc, &x| acc + x.abs().powf(p));
    s.powf(T::one() / p)
}

fn vector_norm<T: FloatScalar>(values: &[T], ord: NormOrd<T>) -> Result<T, LinalgError> {
    match ord {
        NormOrd::Two => Ok(values.iter().fold(T::zero(), |acc, &x| acc + x * x).sqrt()),
        NormOrd::One => Ok(values.iter().fold(T::zero(), |acc, &x| acc + x.abs())),
        NormOrd::NegOne => Ok(power_sum(values, -T::one())),
        NormOrd::Inf => extreme(values.iter().map(|x| x.abs()), true),
        NormOrd::NegInf => extreme(values.iter().map(|x| x.abs()), false),
        NormOrd::Zero => Ok(T::from_len(values.iter().filter(|&&x| x != T::zero()).count())),
        NormOrd::P(p) => Ok(power_sum(values, p)),
        NormOrd::Fro => Err(LinalgError::InvalidNorm),
    }
}

fn matrix_norm<T: FloatScalar>(
    values: &[T],
    rows: usize,
    cols: usize,
    ord: NormOrd<T>,
) -> Result<T, LinalgError> {
    let row_sums = || {
        values
            .chunks_exact(cols.max(1))
            .take(rows)
            .map(|r| r.iter().fold(T::zero(), |acc, &x| acc + x.abs()))
    };
    let col_sums = || {
        (0..cols).map(move |j| {
            (0..rows).fold(T::zero(), |acc, i| acc + values[i * cols + j].abs())
        })
    };
    match ord {
        NormOrd::Fro => Ok(values.iter().fold(T::zero(), |acc, &x| acc + x * x).sqrt()),
        NormOrd::Inf => extreme(row_sums(), true),
        NormOrd::NegInf => extreme(row_sums(), false),
        NormOrd::One => extreme(col_sums(), true),
        NormOrd::NegOne => extreme(col_sums(), false),
        NormOrd::Two => Err(LinalgError::Unsupported("spectral norm (ord = 2)")),
        NormOrd::Zero | NormOrd::P(_) => Err(LinalgError::InvalidNorm),
    }
}

/// Norm of a whole array.
///
/// - 1-D: vector norm, default [`NormOrd::Two`];
/// - 2-D: matrix norm, default [`NormOrd::Fro`];
/// - higher: only `None` is accepted, giving the 2-norm of the flattened
///   array.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::{norm, NormOrd};
///
/// let v = Array::from_slice(&[3.0_f64, -4.0]);
/// assert_eq!(norm(&v, None).unwrap(), 5.0);
/// assert_eq!(norm(&v, Some(NormOrd::Inf)).unwrap(), 4.0);
///
/// let m = Array::from_rows(2, 2, &[1.0_f64, -2.0, 3.0, 4.0]);
/// assert_eq!(norm(&m, Some(NormOrd::One)).unwrap(), 6.0);
/// assert_eq!(norm(&m, Some(NormOrd::Inf)).unwrap(), 7.0);
/// ```
pub fn norm<T: FloatScalar>(x: &Array<T>, ord: Option<NormOrd<T>>) -> Result<T, LinalgError> {
    match (x.shape(), ord) {
        (&[_], ord) => vector_norm(x.as_slice(), ord.unwrap_or(NormOrd::Two)),
        (&[rows, cols], ord) => matrix_norm(x.as_slice(), rows, cols, ord.unwrap_or(NormOrd::Fro)),
        (_, None) => vector_norm(x.as_slice(), NormOrd::Two),
        (_, Some(_)) => Err(LinalgError::InvalidNorm),
    }
}

/// Vector norm along one axis.
///
/// The reduced axis is dropped, or kept with length 1 when `keepdims` is set.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::{norm_axis, NormOrd};
///
/// let m = Array::from_rows(2, 2, &[3.0_f64, 0.0, 4.0, 1.0]);
/// let cols = norm_axis(&m, None, 0, false).unwrap();
/// assert_eq!(cols.as_slice(), &[5.0, 1.0]);
/// let rows = norm_axis(&m, Some(NormOrd::One), -1, true).unwrap();
/// assert_eq!(rows.shape(), &[2, 1]);
/// assert_eq!(rows.as_slice(), &[3.0, 5.0]);
/// ```
pub fn norm_axis<T: FloatScalar>(
    x: &Array<T>,
    ord: Option<NormOrd<T>>,
    axis: isize,
    keepdims: bool,
) -> Result<Array<T>, LinalgError> {
    let ax = normalize_axis(axis, x.ndim())?;
    let ord = ord.unwrap_or(NormOrd::Two);
    let shape = x.shape();
    let outer: usize = shape[..ax].iter().product();
    let len = shape[ax];
    let inner: usize = shape[ax + 1..].iter().product();

    let mut lane = Vec::with_capacity(len);
    let mut data = Vec::with_capacity(outer * inner);
    for o in 0..outer {
        for i in 0..inner {
            lane.clear();
            lane.extend((0..len).map(|k| x.as_slice()[(o * len + k) * inner + i]));
            data.push(vector_norm(&lane, ord)?);
        }
    }

    let mut out_shape = shape.to_vec();
    if keepdims {
        out_shape[ax] = 1;
    } else {
        out_shape.remove(ax);
    }
    Ok(Array::from_vec(&out_shape, data))
}

/// Condition number `‖A‖·‖A⁻¹‖` of a 2-D square matrix, with `A⁻¹` from
/// [`inv`].
///
/// Orders `Fro`, `One`, `NegOne`, `Inf` and `NegInf` are supported. `None`
/// and `Two` need singular values and return [`LinalgError::Unsupported`].
pub fn cond<T: FloatScalar>(a: &Array<T>, ord: Option<NormOrd<T>>) -> Result<T, LinalgError> {
    let ord = match ord {
        None | Some(NormOrd::Two) => {
            return Err(LinalgError::Unsupported("2-norm condition number"))
        }
        Some(o) => o,
    };
    let a_inv = inv(a)?;
    Ok(norm(a, Some(ord))? * norm(&a_inv, Some(ord))?)
}
