use alloc::vec;
use alloc::vec::Vec;

use super::{strides, Array, ShapeError};

/// Resolve a possibly negative axis against `ndim` axes.
pub(crate) fn normalize_axis(axis: isize, ndim: usize) -> Result<usize, ShapeError> {
    let resolved = if axis < 0 { axis + ndim as isize } else { axis };
    if resolved < 0 || resolved as usize >= ndim {
        return Err(ShapeError::InvalidAxis { axis, ndim });
    }
    Ok(resolved as usize)
}

/// Broadcast two batch shapes with numpy rules (right-aligned, 1 stretches).
pub(crate) fn broadcast_batch(lhs: &[usize], rhs: &[usize]) -> Option<Vec<usize>> {
    let nd = lhs.len().max(rhs.len());
    let mut out = vec![0usize; nd];
    for i in 0..nd {
        let a = if i < nd - lhs.len() { 1 } else { lhs[i - (nd - lhs.len())] };
        let b = if i < nd - rhs.len() { 1 } else { rhs[i - (nd - rhs.len())] };
        out[i] = match (a, b) {
            _ if a == b => a,
            (1, _) => b,
            (_, 1) => a,
            _ => return None,
        };
    }
    Some(out)
}

impl<T: Copy> Array<T> {
    /// Same elements under a new shape.
    ///
    /// ```
    /// use tinyops::Array;
    /// let a = Array::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let m = a.reshape(&[2, 3]).unwrap();
    /// assert_eq!(m[(1, 2)], 6.0);
    /// assert!(a.reshape(&[4, 2]).is_err());
    /// ```
    pub fn reshape(&self, shape: &[usize]) -> Result<Self, ShapeError> {
        let expected: usize = shape.iter().product();
        if expected != self.data.len() {
            return Err(ShapeError::SizeMismatch {
                expected,
                got: self.data.len(),
            });
        }
        Ok(Self {
            data: self.data.clone(),
            shape: shape.to_vec(),
        })
    }

    /// 1-D copy of the elements in row-major order.
    pub fn flatten(&self) -> Self {
        Self {
            data: self.data.clone(),
            shape: vec![self.data.len()],
        }
    }

    /// Reorder axes: axis `i` of the result is axis `perm[i]` of `self`.
    ///
    /// ```
    /// use tinyops::Array;
    /// let a = Array::from_vec(&[2, 3, 4], (0..24).map(|x| x as f64).collect());
    /// let p = a.permute(&[2, 0, 1]).unwrap();
    /// assert_eq!(p.shape(), &[4, 2, 3]);
    /// assert_eq!(p.get(&[3, 1, 2]), a.get(&[1, 2, 3]));
    /// ```
    pub fn permute(&self, perm: &[usize]) -> Result<Self, ShapeError> {
        let nd = self.shape.len();
        if perm.len() != nd {
            return Err(ShapeError::SizeMismatch {
                expected: nd,
                got: perm.len(),
            });
        }
        let mut seen = vec![false; nd];
        for &p in perm {
            if p >= nd {
                return Err(ShapeError::InvalidAxis {
                    axis: p as isize,
                    ndim: nd,
                });
            }
            if seen[p] {
                return Err(ShapeError::DuplicateAxis { axis: p });
            }
            seen[p] = true;
        }

        let new_shape: Vec<usize> = perm.iter().map(|&p| self.shape[p]).collect();
        let old_strides = strides(&self.shape);
        let src_strides: Vec<usize> = perm.iter().map(|&p| old_strides[p]).collect();

        let mut data = Vec::with_capacity(self.data.len());
        let mut idx = vec![0usize; nd];
        for _ in 0..self.data.len() {
            let offset: usize = idx.iter().zip(src_strides.iter()).map(|(i, s)| i * s).sum();
            data.push(self.data[offset]);
            // odometer increment over the new shape
            for ax in (0..nd).rev() {
                idx[ax] += 1;
                if idx[ax] < new_shape[ax] {
                    break;
                }
                idx[ax] = 0;
            }
        }
        Ok(Self {
            data,
            shape: new_shape,
        })
    }

    /// Swap the last two axes (batched matrix transpose).
    ///
    /// ```
    /// use tinyops::Array;
    /// let a = Array::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.transpose().unwrap();
    /// assert_eq!(t.shape(), &[3, 2]);
    /// assert_eq!(t[(2, 1)], 6.0);
    /// ```
    pub fn transpose(&self) -> Result<Self, ShapeError> {
        let (batch, rows, cols) = self.matrix_dims()?;
        let mut data = Vec::with_capacity(self.data.len());
        for b in 0..batch {
            let m = &self.data[b * rows * cols..(b + 1) * rows * cols];
            for j in 0..cols {
                for i in 0..rows {
                    data.push(m[i * cols + j]);
                }
            }
        }
        let nd = self.shape.len();
        let mut shape = self.shape.clone();
        shape.swap(nd - 2, nd - 1);
        Ok(Self { data, shape })
    }

    /// Insert a length-1 axis at `axis` (`0..=ndim`).
    pub fn unsqueeze(&self, axis: usize) -> Result<Self, ShapeError> {
        if axis > self.shape.len() {
            return Err(ShapeError::InvalidAxis {
                axis: axis as isize,
                ndim: self.shape.len(),
            });
        }
        let mut shape = self.shape.clone();
        shape.insert(axis, 1);
        Ok(Self {
            data: self.data.clone(),
            shape,
        })
    }

    /// Remove a length-1 axis.
    pub fn squeeze(&self, axis: usize) -> Result<Self, ShapeError> {
        match self.shape.get(axis) {
            Some(1) => {
                let mut shape = self.shape.clone();
                shape.remove(axis);
                Ok(Self {
                    data: self.data.clone(),
                    shape,
                })
            }
            Some(&n) => Err(ShapeError::SizeMismatch { expected: 1, got: n }),
            None => Err(ShapeError::InvalidAxis {
                axis: axis as isize,
                ndim: self.shape.len(),
            }),
        }
    }

    /// Repeat a `(rows, cols)` block over `batch` leading axes.
    pub(crate) fn tile_batch(block: &[T], batch_shape: &[usize], rows: usize, cols: usize) -> Self {
        let batch: usize = batch_shape.iter().product();
        let mut data = Vec::with_capacity(batch * rows * cols);
        for _ in 0..batch {
            data.extend_from_slice(block);
        }
        let mut shape = batch_shape.to_vec();
        shape.push(rows);
        shape.push(cols);
        Self { data, shape }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_negative_axis() {
        assert_eq!(normalize_axis(-1, 3).unwrap(), 2);
        assert_eq!(normalize_axis(0, 3).unwrap(), 0);
        assert!(normalize_axis(3, 3).is_err());
        assert!(normalize_axis(-4, 3).is_err());
    }

    #[test]
    fn broadcast_rules() {
        assert_eq!(broadcast_batch(&[], &[4]), Some(vec![4]));
        assert_eq!(broadcast_batch(&[2, 1], &[3]), Some(vec![2, 3]));
        assert_eq!(broadcast_batch(&[2], &[3]), None);
    }

    #[test]
    fn batched_transpose() {
        let a = Array::from_vec(&[2, 2, 3], (0..12).map(|x| x as f64).collect());
        let t = a.transpose().unwrap();
        assert_eq!(t.shape(), &[2, 3, 2]);
        for b in 0..2 {
            for i in 0..2 {
                for j in 0..3 {
                    assert_eq!(t.get(&[b, j, i]), a.get(&[b, i, j]));
                }
            }
        }
    }

    #[test]
    fn transpose_rejects_vectors() {
        let v = Array::from_slice(&[1.0, 2.0]);
        assert!(v.transpose().is_err());
    }

    #[test]
    fn permute_rejects_duplicates() {
        let a = Array::<f64>::zeros(&[2, 3]);
        assert_eq!(a.permute(&[0, 0]).unwrap_err(), ShapeError::DuplicateAxis { axis: 0 });
    }

    #[test]
    fn squeeze_unsqueeze() {
        let v = Array::from_slice(&[1.0, 2.0, 3.0]);
        let col = v.unsqueeze(1).unwrap();
        assert_eq!(col.shape(), &[3, 1]);
        assert_eq!(col.squeeze(1).unwrap(), v);
        assert!(col.squeeze(0).is_err());
    }
}
