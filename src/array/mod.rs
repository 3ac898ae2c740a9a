mod matmul;
mod ops;
mod shape;
mod util;

pub use matmul::matmul_batched;
pub(crate) use matmul::{gemm, transpose_into};
pub(crate) use shape::{broadcast_batch, normalize_axis};

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::Scalar;

/// Shape or dimensionality error.
///
/// Raised eagerly, before any numeric work, whenever an operand does not
/// have the layout an operation requires.
///
/// # Example
///
/// ```
/// use tinyops::{Array, ShapeError};
/// use tinyops::linalg::{inv, LinalgError};
///
/// let v = Array::from_slice(&[1.0_f64, 2.0, 3.0]);
/// assert_eq!(
///     inv(&v).unwrap_err(),
///     LinalgError::Shape(ShapeError::TooFewDims { required: 2, got: 1 })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Operand has fewer axes than the operation needs.
    TooFewDims { required: usize, got: usize },
    /// Operand must have exactly `expected` axes.
    WrongDims { expected: usize, got: usize },
    /// The last two axes were expected to be equal.
    NotSquare { rows: usize, cols: usize },
    /// Two operand shapes cannot be combined.
    Mismatch { lhs: Vec<usize>, rhs: Vec<usize> },
    /// Element count does not match the requested shape.
    SizeMismatch { expected: usize, got: usize },
    /// Axis index out of range for an array of `ndim` axes.
    InvalidAxis { axis: isize, ndim: usize },
    /// The same axis was named twice.
    DuplicateAxis { axis: usize },
    /// Operand has no elements.
    Empty,
}

impl core::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShapeError::TooFewDims { required, got } => {
                write!(f, "array must have at least {} dimensions, got {}", required, got)
            }
            ShapeError::WrongDims { expected, got } => {
                write!(f, "array must have exactly {} dimensions, got {}", expected, got)
            }
            ShapeError::NotSquare { rows, cols } => {
                write!(f, "last two dimensions must be square, got {}x{}", rows, cols)
            }
            ShapeError::Mismatch { lhs, rhs } => {
                write!(f, "shapes {:?} and {:?} are not aligned", lhs, rhs)
            }
            ShapeError::SizeMismatch { expected, got } => {
                write!(f, "expected {} elements, got {}", expected, got)
            }
            ShapeError::InvalidAxis { axis, ndim } => {
                write!(f, "axis {} is out of bounds for array of dimension {}", axis, ndim)
            }
            ShapeError::DuplicateAxis { axis } => write!(f, "axis {} repeated", axis),
            ShapeError::Empty => write!(f, "array is empty"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShapeError {}

/// Heap-allocated, row-major, N-dimensional array.
///
/// `shape` lists the extent of every axis; a 0-D array (empty shape) holds
/// exactly one element. Arrays of two or more dimensions are treated as a
/// batch of matrices over their last two axes by the linear algebra
/// routines.
///
/// # Examples
///
/// ```
/// use tinyops::Array;
///
/// let a = Array::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// assert_eq!(a.shape(), &[2, 3]);
/// assert_eq!(a[(1, 0)], 4.0);
///
/// let id = Array::<f64>::eye(3);
/// assert_eq!(id[(2, 2)], 1.0);
/// assert_eq!(id[(0, 2)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Array<T> {
    data: Vec<T>,
    shape: Vec<usize>,
}

/// Row-major strides for `shape`, in elements.
pub(crate) fn strides(shape: &[usize]) -> Vec<usize> {
    let mut out = vec![1usize; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        out[i] = out[i + 1] * shape[i + 1];
    }
    out
}

// ── Constructors ────────────────────────────────────────────────────

impl<T> Array<T> {
    /// Create an array from an owned `Vec<T>` in row-major order.
    ///
    /// Panics if `data.len()` differs from the product of `shape`.
    ///
    /// ```
    /// use tinyops::Array;
    /// let a = Array::from_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(a[(0, 1)], 2.0);
    /// ```
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Self {
        let expected: usize = shape.iter().product();
        assert_eq!(
            data.len(),
            expected,
            "vec length {} does not match shape {:?}",
            data.len(),
            shape,
        );
        Self {
            data,
            shape: shape.to_vec(),
        }
    }

    /// Create a 0-D array holding a single value.
    pub fn scalar(value: T) -> Self {
        Self {
            data: vec![value],
            shape: Vec::new(),
        }
    }

    /// Create an `nrows x ncols` array by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use tinyops::Array;
    /// let m = Array::from_fn(2, 2, |i, j| (i * 2 + j) as f64);
    /// assert_eq!(m[(1, 0)], 2.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self {
            data,
            shape: vec![nrows, ncols],
        }
    }
}

impl<T: Scalar> Array<T> {
    /// Array of the given shape filled with zeros.
    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(shape, T::zero())
    }

    /// Array of the given shape filled with `value`.
    pub fn full(shape: &[usize], value: T) -> Self {
        let len = shape.iter().product();
        Self {
            data: vec![value; len],
            shape: shape.to_vec(),
        }
    }

    /// `n x n` identity matrix.
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(&[n, n]);
        for i in 0..n {
            m.data[i * n + i] = T::one();
        }
        m
    }

    /// 1-D array copied from a slice.
    pub fn from_slice(values: &[T]) -> Self {
        Self {
            data: values.to_vec(),
            shape: vec![values.len()],
        }
    }

    /// 2-D array from a flat row-major slice.
    ///
    /// Panics if `row_major.len() != nrows * ncols`.
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self {
            data: row_major.to_vec(),
            shape: vec![nrows, ncols],
        }
    }
}

// ── Accessors ───────────────────────────────────────────────────────

impl<T> Array<T> {
    /// Extent of every axis.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major element storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the array, returning its row-major storage.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Element at a full multi-index, or `None` if out of bounds.
    ///
    /// ```
    /// use tinyops::Array;
    /// let a = Array::from_vec(&[2, 2, 2], (0..8).map(|x| x as f64).collect());
    /// assert_eq!(a.get(&[1, 0, 1]), Some(&5.0));
    /// assert_eq!(a.get(&[2, 0, 0]), None);
    /// ```
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&i, &n) in index.iter().zip(self.shape.iter()) {
            if i >= n {
                return None;
            }
            flat = flat * n + i;
        }
        self.data.get(flat)
    }

    /// Split a `(..., rows, cols)` array into `(batch, rows, cols)`.
    ///
    /// Fails for arrays with fewer than two axes.
    pub fn matrix_dims(&self) -> Result<(usize, usize, usize), ShapeError> {
        let nd = self.shape.len();
        if nd < 2 {
            return Err(ShapeError::TooFewDims {
                required: 2,
                got: nd,
            });
        }
        let rows = self.shape[nd - 2];
        let cols = self.shape[nd - 1];
        let batch = self.shape[..nd - 2].iter().product();
        Ok((batch, rows, cols))
    }

    /// Leading (batch) axes of a `(..., rows, cols)` array.
    #[inline]
    pub(crate) fn batch_shape(&self) -> &[usize] {
        &self.shape[..self.shape.len().saturating_sub(2)]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Array<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert_eq!(self.shape.len(), 2, "2-D index into {}-D array", self.shape.len());
        &self.data[row * self.shape[1] + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Array<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert_eq!(self.shape.len(), 2, "2-D index into {}-D array", self.shape.len());
        &mut self.data[row * self.shape[1] + col]
    }
}

impl<T> Index<usize> for Array<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        debug_assert_eq!(self.shape.len(), 1, "1-D index into {}-D array", self.shape.len());
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Array<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        debug_assert_eq!(self.shape.len(), 1, "1-D index into {}-D array", self.shape.len());
        &mut self.data[i]
    }
}
