use alloc::vec;
use alloc::vec::Vec;

use crate::traits::Scalar;

use super::{broadcast_batch, strides, Array, ShapeError};

/// `c = a * b` for row-major `a (m x k)`, `b (k x n)`, `c (m x n)`.
///
/// `c` is overwritten. i-k-j loop order keeps the inner loop contiguous in
/// both `b` and `c`.
#[inline]
pub(crate) fn gemm<T: Scalar>(a: &[T], b: &[T], c: &mut [T], m: usize, k: usize, n: usize) {
    debug_assert_eq!(a.len(), m * k);
    debug_assert_eq!(b.len(), k * n);
    debug_assert_eq!(c.len(), m * n);

    for x in c.iter_mut() {
        *x = T::zero();
    }
    for i in 0..m {
        let c_row = &mut c[i * n..(i + 1) * n];
        for p in 0..k {
            let aip = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (cij, &bpj) in c_row.iter_mut().zip(b_row.iter()) {
                *cij = *cij + aip * bpj;
            }
        }
    }
}

/// Write the transpose of row-major `src (rows x cols)` into `dst (cols x rows)`.
#[inline]
pub(crate) fn transpose_into<T: Copy>(src: &[T], dst: &mut [T], rows: usize, cols: usize) {
    debug_assert_eq!(src.len(), rows * cols);
    debug_assert_eq!(dst.len(), rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            dst[j * rows + i] = src[i * cols + j];
        }
    }
}

/// Offset of the `flat`-th matrix of the broadcast batch inside an operand
/// whose own batch shape is `own` (right-aligned, size-1 axes repeat).
fn batch_offset(flat: usize, out_batch: &[usize], own: &[usize], own_strides: &[usize]) -> usize {
    let lead = out_batch.len() - own.len();
    let mut rem = flat;
    let mut offset = 0;
    for ax in (0..out_batch.len()).rev() {
        let idx = rem % out_batch[ax];
        rem /= out_batch[ax];
        if ax >= lead {
            let own_ax = ax - lead;
            if own[own_ax] != 1 {
                offset += idx * own_strides[own_ax];
            }
        }
    }
    offset
}

/// Matrix product over the last two axes with numpy batch broadcasting.
///
/// Both operands need at least two axes. Leading axes broadcast against
/// each other; the inner dimensions must agree.
///
/// ```
/// use tinyops::{Array, matmul_batched};
///
/// let a = Array::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// let b = Array::from_rows(3, 1, &[1.0, 0.0, -1.0]);
/// let c = matmul_batched(&a, &b).unwrap();
/// assert_eq!(c.shape(), &[2, 1]);
/// assert_eq!(c.as_slice(), &[-2.0, -2.0]);
/// ```
pub fn matmul_batched<T: Scalar>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, ShapeError> {
    let (_, m, k) = a.matrix_dims()?;
    let (_, k2, n) = b.matrix_dims()?;
    let mismatch = || ShapeError::Mismatch {
        lhs: a.shape.clone(),
        rhs: b.shape.clone(),
    };
    if k != k2 {
        return Err(mismatch());
    }
    let out_batch = broadcast_batch(a.batch_shape(), b.batch_shape()).ok_or_else(mismatch)?;
    let batch: usize = out_batch.iter().product();

    let a_strides: Vec<usize> = strides(a.batch_shape()).iter().map(|s| s * m * k).collect();
    let b_strides: Vec<usize> = strides(b.batch_shape()).iter().map(|s| s * k * n).collect();

    let mut data = vec![T::zero(); batch * m * n];
    for (i, c) in data.chunks_exact_mut((m * n).max(1)).enumerate().take(batch) {
        let ao = batch_offset(i, &out_batch, a.batch_shape(), &a_strides);
        let bo = batch_offset(i, &out_batch, b.batch_shape(), &b_strides);
        gemm(&a.data[ao..ao + m * k], &b.data[bo..bo + k * n], c, m, k, n);
    }

    let mut shape = out_batch;
    shape.push(m);
    shape.push(n);
    Ok(Array { data, shape })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemm_2x2() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut c = [0.0; 4];
        gemm(&a, &b, &mut c, 2, 2, 2);
        assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn transpose_into_rect() {
        let src = [1, 2, 3, 4, 5, 6];
        let mut dst = [0; 6];
        transpose_into(&src, &mut dst, 2, 3);
        assert_eq!(dst, [1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn broadcast_single_matrix_over_batch() {
        let a = Array::from_vec(&[2, 2, 2], vec![1.0, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 2.0]);
        let b = Array::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let c = matmul_batched(&a, &b).unwrap();
        assert_eq!(c.shape(), &[2, 2, 2]);
        assert_eq!(c.as_slice(), &[1.0, 2.0, 3.0, 4.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn broadcast_size_one_axis() {
        let a = Array::from_vec(&[1, 3, 1, 1], vec![1.0, 2.0, 3.0]);
        let b = Array::from_vec(&[2, 1, 1, 1], vec![10.0, 100.0]);
        let c = matmul_batched(&a, &b).unwrap();
        assert_eq!(c.shape(), &[2, 3, 1, 1]);
        assert_eq!(c.as_slice(), &[10.0, 20.0, 30.0, 100.0, 200.0, 300.0]);
    }

    #[test]
    fn inner_dimension_mismatch() {
        let a = Array::<f64>::zeros(&[2, 3]);
        let b = Array::<f64>::zeros(&[2, 3]);
        assert!(matches!(
            matmul_batched(&a, &b),
            Err(ShapeError::Mismatch { .. })
        ));
    }

    #[test]
    fn rejects_vectors() {
        let a = Array::<f64>::zeros(&[3]);
        let b = Array::<f64>::zeros(&[3, 1]);
        assert_eq!(
            matmul_batched(&a, &b).unwrap_err(),
            ShapeError::TooFewDims { required: 2, got: 1 }
        );
    }
}
