use alloc::vec;
use alloc::vec::Vec;

use crate::array::{normalize_axis, Array, ShapeError};
use crate::traits::Scalar;

use super::LinalgError;

/// Diagonals over the plane of `axis1` x `axis2`.
///
/// Both axes are removed and the diagonal is appended as the last axis.
/// Positive `offset` selects diagonals above the main one, negative below;
/// an offset past the edge gives a zero-length last axis.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::diagonal;
///
/// let a = Array::from_rows(3, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
/// assert_eq!(diagonal(&a, 0, 0, 1).unwrap().as_slice(), &[1, 5, 9]);
/// assert_eq!(diagonal(&a, 1, 0, 1).unwrap().as_slice(), &[2, 6]);
/// assert_eq!(diagonal(&a, -2, 0, 1).unwrap().as_slice(), &[7]);
/// ```
pub fn diagonal<T: Scalar>(
    a: &Array<T>,
    offset: isize,
    axis1: isize,
    axis2: isize,
) -> Result<Array<T>, LinalgError> {
    let nd = a.ndim();
    let ax1 = normalize_axis(axis1, nd)?;
    let ax2 = normalize_axis(axis2, nd)?;
    if ax1 == ax2 {
        return Err(ShapeError::DuplicateAxis { axis: ax1 }.into());
    }

    let mut perm: Vec<usize> = (0..nd).filter(|&i| i != ax1 && i != ax2).collect();
    perm.push(ax1);
    perm.push(ax2);
    let moved = a.permute(&perm)?;

    let rows = a.shape()[ax1];
    let cols = a.shape()[ax2];
    let (r0, c0) = if offset >= 0 {
        (0, offset.unsigned_abs())
    } else {
        (offset.unsigned_abs(), 0)
    };
    let len = rows.saturating_sub(r0).min(cols.saturating_sub(c0));

    let mut data = Vec::new();
    for plane in moved.as_slice().chunks_exact((rows * cols).max(1)) {
        data.extend((0..len).map(|k| plane[(r0 + k) * cols + c0 + k]));
    }

    let mut shape: Vec<usize> = perm[..nd - 2].iter().map(|&i| a.shape()[i]).collect();
    shape.push(len);
    Ok(Array::from_vec(&shape, data))
}

/// Sum along diagonals; the result has the shape of `a` without `axis1`
/// and `axis2`.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::trace;
///
/// let a = Array::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(trace(&a, 0, 0, 1).unwrap().as_slice(), &[5.0]);
/// assert_eq!(trace(&a, 5, 0, 1).unwrap().as_slice(), &[0.0]);
/// ```
pub fn trace<T: Scalar>(
    a: &Array<T>,
    offset: isize,
    axis1: isize,
    axis2: isize,
) -> Result<Array<T>, LinalgError> {
    let d = diagonal(a, offset, axis1, axis2)?;
    let len = d.shape()[d.ndim() - 1];
    let shape = &d.shape()[..d.ndim() - 1];
    let data = if len == 0 {
        let n: usize = shape.iter().product();
        vec![T::zero(); n]
    } else {
        d.as_slice()
            .chunks_exact(len)
            .map(|lane| lane.iter().fold(T::zero(), |acc, &x| acc + x))
            .collect()
    };
    Ok(Array::from_vec(shape, data))
}
