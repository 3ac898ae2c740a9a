use alloc::vec;
use alloc::vec::Vec;

use crate::array::{gemm, matmul_batched, normalize_axis, strides, Array, ShapeError};
use crate::traits::Scalar;

use super::LinalgError;

/// Axis selection for [`tensordot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TensorAxes {
    /// Contract the last `k` axes of `a` with the first `k` axes of `b`.
    Count(usize),
    /// Contract `a`'s listed axes pairwise with `b`'s. Negative indices
    /// count from the end.
    Pairs(Vec<isize>, Vec<isize>),
}

fn mismatch<T>(a: &Array<T>, b: &Array<T>) -> ShapeError {
    ShapeError::Mismatch {
        lhs: a.shape().to_vec(),
        rhs: b.shape().to_vec(),
    }
}

/// Single value of a 0-D array.
fn scalar_value<T: Copy>(a: &Array<T>) -> Option<T> {
    if a.ndim() == 0 {
        a.as_slice().first().copied()
    } else {
        None
    }
}

fn first_duplicate(axes: &[usize]) -> Option<usize> {
    axes.iter()
        .enumerate()
        .find(|&(i, &ax)| axes[..i].contains(&ax))
        .map(|(_, &ax)| ax)
}

/// `(p x k)·(k x q)` into a fresh buffer.
fn contract<T: Scalar>(a: &[T], b: &[T], p: usize, k: usize, q: usize) -> Vec<T> {
    let mut out = vec![T::zero(); p * q];
    gemm(a, b, &mut out, p, k, q);
    out
}

/// Matrix product with numpy `matmul` semantics.
///
/// 1-D operands are promoted to matrices (a row vector on the left, a
/// column vector on the right) and the promoted axis is removed from the
/// result. Leading batch axes broadcast. 0-D operands are rejected.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::matmul;
///
/// let a = Array::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// let v = Array::from_slice(&[1.0, 1.0]);
/// let av = matmul(&a, &v).unwrap();
/// assert_eq!(av.shape(), &[2]);
/// assert_eq!(av.as_slice(), &[3.0, 7.0]);
/// ```
pub fn matmul<T: Scalar>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, LinalgError> {
    for x in [a, b] {
        if x.ndim() == 0 {
            return Err(ShapeError::TooFewDims { required: 1, got: 0 }.into());
        }
    }
    let a_vec = a.ndim() == 1;
    let b_vec = b.ndim() == 1;
    let lhs = if a_vec { a.unsqueeze(0)? } else { a.clone() };
    let rhs = if b_vec { b.unsqueeze(1)? } else { b.clone() };

    let mut out = matmul_batched(&lhs, &rhs).map_err(|_| mismatch(a, b))?;
    let nd = out.ndim();
    if b_vec {
        out = out.squeeze(nd - 1)?;
    }
    if a_vec {
        out = out.squeeze(nd - 2)?;
    }
    Ok(out)
}

/// numpy `dot`.
///
/// - either operand 0-D: element-wise scaling of the other;
/// - `b` 1-D: sum-product over the last axis of `a`;
/// - otherwise: sum-product over the last axis of `a` and the second-to-last
///   axis of `b`, giving shape `a[..-1] + b[..-2] + b[-1]`.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::dot;
///
/// let a = Array::from_slice(&[1.0_f64, 2.0, 3.0]);
/// let b = Array::from_slice(&[4.0, 5.0, 6.0]);
/// assert_eq!(dot(&a, &b).unwrap().as_slice(), &[32.0]);
/// ```
pub fn dot<T: Scalar>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, LinalgError> {
    if let Some(s) = scalar_value(a) {
        return Ok(b * s);
    }
    if let Some(s) = scalar_value(b) {
        return Ok(a * s);
    }

    let k = a.shape()[a.ndim() - 1];
    let lead_a = &a.shape()[..a.ndim() - 1];
    let p: usize = lead_a.iter().product();

    if b.ndim() == 1 {
        if b.len() != k {
            return Err(mismatch(a, b).into());
        }
        let data = contract(a.as_slice(), b.as_slice(), p, k, 1);
        return Ok(Array::from_vec(lead_a, data));
    }

    let nb = b.ndim();
    if b.shape()[nb - 2] != k {
        return Err(mismatch(a, b).into());
    }
    // bring b's contracted axis to the front: (k, b[..-2], b[-1])
    let mut perm = Vec::with_capacity(nb);
    perm.push(nb - 2);
    perm.extend(0..nb - 2);
    perm.push(nb - 1);
    let b_perm = b.permute(&perm)?;
    let q = b.shape()[..nb - 2].iter().product::<usize>() * b.shape()[nb - 1];

    let data = contract(a.as_slice(), b_perm.as_slice(), p, k, q);
    let mut shape = lead_a.to_vec();
    shape.extend_from_slice(&b.shape()[..nb - 2]);
    shape.push(b.shape()[nb - 1]);
    Ok(Array::from_vec(&shape, data))
}

/// numpy `inner`: sum-product over the last axes of both operands, result
/// shape `a[..-1] + b[..-1]`.
pub fn inner<T: Scalar>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, LinalgError> {
    if let Some(s) = scalar_value(a) {
        return Ok(b * s);
    }
    if let Some(s) = scalar_value(b) {
        return Ok(a * s);
    }
    let k = a.shape()[a.ndim() - 1];
    if b.shape()[b.ndim() - 1] != k {
        return Err(mismatch(a, b).into());
    }
    let lead_a = &a.shape()[..a.ndim() - 1];
    let lead_b = &b.shape()[..b.ndim() - 1];
    let p: usize = lead_a.iter().product();
    let q: usize = lead_b.iter().product();

    let bt = b.reshape(&[q, k])?.transpose()?;
    let data = contract(a.as_slice(), bt.as_slice(), p, k, q);
    let mut shape = lead_a.to_vec();
    shape.extend_from_slice(lead_b);
    Ok(Array::from_vec(&shape, data))
}

/// Outer product of the flattened operands, `len(a) x len(b)`.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::outer;
///
/// let o = outer(&Array::from_slice(&[1, 2]), &Array::from_slice(&[3, 4, 5]));
/// assert_eq!(o.shape(), &[2, 3]);
/// assert_eq!(o.as_slice(), &[3, 4, 5, 6, 8, 10]);
/// ```
pub fn outer<T: Scalar>(a: &Array<T>, b: &Array<T>) -> Array<T> {
    let mut data = Vec::with_capacity(a.len() * b.len());
    for &x in a.as_slice() {
        data.extend(b.as_slice().iter().map(|&y| x * y));
    }
    Array::from_vec(&[a.len(), b.len()], data)
}

/// Dot product of the flattened operands. Element counts must match.
pub fn vdot<T: Scalar>(a: &Array<T>, b: &Array<T>) -> Result<T, LinalgError> {
    if a.len() != b.len() {
        return Err(ShapeError::SizeMismatch {
            expected: a.len(),
            got: b.len(),
        }
        .into());
    }
    Ok(a
        .as_slice()
        .iter()
        .zip(b.as_slice().iter())
        .fold(T::zero(), |acc, (&x, &y)| acc + x * y))
}

/// Kronecker product. The lower-rank operand is padded with leading
/// length-1 axes; output axis `i` has length `a[i] * b[i]`.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::kron;
///
/// let k = kron(&Array::<f64>::eye(2), &Array::from_rows(1, 2, &[1.0, 2.0]));
/// assert_eq!(k.shape(), &[2, 4]);
/// assert_eq!(k.as_slice(), &[1.0, 2.0, 0.0, 0.0, 0.0, 0.0, 1.0, 2.0]);
/// ```
pub fn kron<T: Scalar>(a: &Array<T>, b: &Array<T>) -> Array<T> {
    let nd = a.ndim().max(b.ndim());
    let pad = |s: &[usize]| {
        let mut out = vec![1usize; nd - s.len()];
        out.extend_from_slice(s);
        out
    };
    let a_shape = pad(a.shape());
    let b_shape = pad(b.shape());
    let a_strides = strides(&a_shape);
    let b_strides = strides(&b_shape);
    let out_shape: Vec<usize> = a_shape.iter().zip(b_shape.iter()).map(|(x, y)| x * y).collect();
    let total: usize = out_shape.iter().product();

    let mut data = Vec::with_capacity(total);
    let mut idx = vec![0usize; nd];
    for _ in 0..total {
        let mut ao = 0;
        let mut bo = 0;
        for ax in 0..nd {
            ao += idx[ax] / b_shape[ax] * a_strides[ax];
            bo += idx[ax] % b_shape[ax] * b_strides[ax];
        }
        data.push(a.as_slice()[ao] * b.as_slice()[bo]);
        for ax in (0..nd).rev() {
            idx[ax] += 1;
            if idx[ax] < out_shape[ax] {
                break;
            }
            idx[ax] = 0;
        }
    }
    Array::from_vec(&out_shape, data)
}

/// Sum-product over the selected axes of `a` and `b`.
///
/// The result carries `a`'s free axes followed by `b`'s free axes.
///
/// ```
/// use tinyops::Array;
/// use tinyops::linalg::{tensordot, TensorAxes};
///
/// let a = Array::from_vec(&[2, 3], vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// let b = Array::from_vec(&[3, 2], vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
/// let c = tensordot(&a, &b, TensorAxes::Count(1)).unwrap();
/// assert_eq!(c.shape(), &[2, 2]);
/// assert_eq!(c.as_slice(), &[4.0, 5.0, 10.0, 11.0]);
///
/// let full = tensordot(&a, &a, TensorAxes::Pairs(vec![0, 1], vec![0, 1])).unwrap();
/// assert_eq!(full.as_slice(), &[91.0]);
/// ```
pub fn tensordot<T: Scalar>(
    a: &Array<T>,
    b: &Array<T>,
    axes: TensorAxes,
) -> Result<Array<T>, LinalgError> {
    let (na, nb) = (a.ndim(), b.ndim());
    let (axes_a, axes_b): (Vec<usize>, Vec<usize>) = match axes {
        TensorAxes::Count(k) => {
            if k > na || k > nb {
                return Err(mismatch(a, b).into());
            }
            ((na - k..na).collect(), (0..k).collect())
        }
        TensorAxes::Pairs(xa, xb) => {
            if xa.len() != xb.len() {
                return Err(ShapeError::SizeMismatch {
                    expected: xa.len(),
                    got: xb.len(),
                }
                .into());
            }
            let ra = xa
                .iter()
                .map(|&ax| normalize_axis(ax, na))
                .collect::<Result<Vec<_>, _>>()?;
            let rb = xb
                .iter()
                .map(|&ax| normalize_axis(ax, nb))
                .collect::<Result<Vec<_>, _>>()?;
            (ra, rb)
        }
    };
    for axes in [&axes_a, &axes_b] {
        if let Some(dup) = first_duplicate(axes) {
            return Err(ShapeError::DuplicateAxis { axis: dup }.into());
        }
    }
    for (&i, &j) in axes_a.iter().zip(axes_b.iter()) {
        if a.shape()[i] != b.shape()[j] {
            return Err(mismatch(a, b).into());
        }
    }

    let free_a: Vec<usize> = (0..na).filter(|i| !axes_a.contains(i)).collect();
    let free_b: Vec<usize> = (0..nb).filter(|i| !axes_b.contains(i)).collect();

    let perm_a: Vec<usize> = free_a.iter().chain(axes_a.iter()).copied().collect();
    let perm_b: Vec<usize> = axes_b.iter().chain(free_b.iter()).copied().collect();
    let new_a = a.permute(&perm_a)?;
    let new_b = b.permute(&perm_b)?;

    let p: usize = free_a.iter().map(|&i| a.shape()[i]).product();
    let k: usize = axes_a.iter().map(|&i| a.shape()[i]).product();
    let q: usize = free_b.iter().map(|&i| b.shape()[i]).product();
    let data = contract(new_a.as_slice(), new_b.as_slice(), p, k, q);

    let shape: Vec<usize> = free_a
        .iter()
        .map(|&i| a.shape()[i])
        .chain(free_b.iter().map(|&i| b.shape()[i]))
        .collect();
    Ok(Array::from_vec(&shape, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matmul_vector_vector_is_scalar() {
        let a = Array::from_slice(&[1.0_f64, 2.0, 3.0]);
        let c = matmul(&a, &a).unwrap();
        assert_eq!(c.ndim(), 0);
        assert_eq!(c.as_slice(), &[14.0]);
    }

    #[test]
    fn matmul_vector_matrix() {
        let v = Array::from_slice(&[1.0_f64, 1.0]);
        let m = Array::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let c = matmul(&v, &m).unwrap();
        assert_eq!(c.shape(), &[3]);
        assert_eq!(c.as_slice(), &[5.0, 7.0, 9.0]);
    }

    #[test]
    fn matmul_rejects_scalars_and_mismatch() {
        let s = Array::scalar(1.0_f64);
        let m = Array::<f64>::eye(2);
        assert_eq!(
            matmul(&s, &m).unwrap_err(),
            LinalgError::Shape(ShapeError::TooFewDims { required: 1, got: 0 })
        );
        let v = Array::from_slice(&[1.0_f64, 2.0, 3.0]);
        assert!(matches!(
            matmul(&m, &v),
            Err(LinalgError::Shape(ShapeError::Mismatch { .. }))
        ));
    }

    #[test]
    fn dot_scalar_scales() {
        let s = Array::scalar(2.0_f64);
        let v = Array::from_slice(&[1.0, 2.0]);
        assert_eq!(dot(&s, &v).unwrap().as_slice(), &[2.0, 4.0]);
        assert_eq!(dot(&v, &s).unwrap().as_slice(), &[2.0, 4.0]);
    }

    #[test]
    fn dot_nd_shapes() {
        // (2, 3) · (4, 3, 5) -> (2, 4, 5)
        let a = Array::from_vec(&[2, 3], (0..6).map(|x| x as f64).collect());
        let b = Array::from_vec(&[4, 3, 5], (0..60).map(|x| x as f64).collect());
        let c = dot(&a, &b).unwrap();
        assert_eq!(c.shape(), &[2, 4, 5]);
        // c[i, j, l] = sum_k a[i, k] * b[j, k, l]
        let expect = |i: usize, j: usize, l: usize| -> f64 {
            (0..3)
                .map(|k| a.as_slice()[i * 3 + k] * b.as_slice()[j * 15 + k * 5 + l])
                .sum()
        };
        assert_eq!(c.get(&[1, 2, 3]), Some(&expect(1, 2, 3)));
        assert_eq!(c.get(&[0, 3, 4]), Some(&expect(0, 3, 4)));
    }

    #[test]
    fn dot_matrix_vector() {
        let a = Array::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        let v = Array::from_slice(&[1.0, -1.0]);
        assert_eq!(dot(&a, &v).unwrap().as_slice(), &[-1.0, -1.0]);
    }

    #[test]
    fn inner_shapes() {
        let a = Array::from_vec(&[2, 3], vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Array::from_vec(&[1, 3], vec![1.0, 0.0, -1.0]);
        let c = inner(&a, &b).unwrap();
        assert_eq!(c.shape(), &[2, 1]);
        assert_eq!(c.as_slice(), &[-2.0, -2.0]);
        let bad = Array::<f64>::zeros(&[2]);
        assert!(inner(&a, &bad).is_err());
    }

    #[test]
    fn vdot_flattens() {
        let a = Array::from_rows(2, 2, &[1, 2, 3, 4]);
        let b = Array::from_slice(&[1, 1, 1, 1]);
        assert_eq!(vdot(&a, &b).unwrap(), 10);
        assert!(vdot(&a, &Array::from_slice(&[1])).is_err());
    }

    #[test]
    fn kron_pads_lower_rank() {
        let a = Array::from_slice(&[1, 2]);
        let b = Array::from_rows(2, 1, &[1, 10]);
        let k = kron(&a, &b);
        assert_eq!(k.shape(), &[2, 2]);
        assert_eq!(k.as_slice(), &[1, 2, 10, 20]);
    }

    #[test]
    fn tensordot_negative_axes() {
        let a = Array::from_vec(&[2, 3], vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Array::from_vec(&[3], vec![1.0, 1.0, 1.0]);
        let c = tensordot(&a, &b, TensorAxes::Pairs(vec![-1], vec![0])).unwrap();
        assert_eq!(c.shape(), &[2]);
        assert_eq!(c.as_slice(), &[6.0, 15.0]);
    }

    #[test]
    fn tensordot_errors() {
        let a = Array::<f64>::zeros(&[2, 3]);
        let b = Array::<f64>::zeros(&[2, 3]);
        assert!(tensordot(&a, &b, TensorAxes::Count(1)).is_err());
        assert!(tensordot(&a, &b, TensorAxes::Pairs(vec![0], vec![])).is_err());
        assert!(tensordot(&a, &b, TensorAxes::Pairs(vec![5], vec![0])).is_err());
        assert!(matches!(
            tensordot(&a, &b, TensorAxes::Pairs(vec![0, 0], vec![0, 0])),
            Err(LinalgError::Shape(ShapeError::DuplicateAxis { axis: 0 }))
        ));
    }
}
