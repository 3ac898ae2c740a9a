use alloc::vec::Vec;
use core::fmt;

use crate::traits::{FloatScalar, Scalar};

use super::Array;

// ── Map ─────────────────────────────────────────────────────────────

impl<T: Copy> Array<T> {
    /// Apply a function to every element, producing a new array of the same shape.
    ///
    /// ```
    /// use tinyops::Array;
    /// let a = Array::from_slice(&[1.0_f64, 4.0, 9.0]);
    /// assert_eq!(a.map(|x| x.sqrt()).as_slice(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Array<U> {
        let data: Vec<U> = self.data.iter().map(|&x| f(x)).collect();
        Array {
            data,
            shape: self.shape.clone(),
        }
    }

    /// Combine two same-shaped arrays element by element.
    ///
    /// Panics if the shapes differ.
    pub fn zip_map<U: Copy, V>(&self, rhs: &Array<U>, f: impl Fn(T, U) -> V) -> Array<V> {
        assert_eq!(
            self.shape, rhs.shape,
            "dimension mismatch: {:?} vs {:?}",
            self.shape, rhs.shape,
        );
        let data: Vec<V> = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Array {
            data,
            shape: self.shape.clone(),
        }
    }
}

// ── Aggregation ─────────────────────────────────────────────────────

impl<T: Scalar> Array<T> {
    /// Sum of all elements.
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc + x)
    }
}

impl<T: FloatScalar> Array<T> {
    /// Element-wise absolute value.
    pub fn abs(&self) -> Self {
        self.map(|x| x.abs())
    }

    /// Largest element, `None` for empty arrays. NaN propagates.
    pub fn max(&self) -> Option<T> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |m, x| if x > m || x.is_nan() { x } else { m }))
    }

    /// Smallest element, `None` for empty arrays. NaN propagates.
    pub fn min(&self) -> Option<T> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |m, x| if x < m || x.is_nan() { x } else { m }))
    }

    /// Whether every element satisfies `|a - b| <= atol + rtol * |b|`.
    ///
    /// Shapes must match exactly; NaN is never close to anything.
    ///
    /// ```
    /// use tinyops::Array;
    /// let a = Array::from_slice(&[1.0_f64, 2.0]);
    /// let b = Array::from_slice(&[1.0_f64, 2.0 + 1e-9]);
    /// assert!(a.all_close(&b, 1e-6, 0.0));
    /// ```
    pub fn all_close(&self, other: &Self, atol: T, rtol: T) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| (a - b).abs() <= atol + rtol * b.abs())
    }

    /// Largest absolute element-wise difference to `other`.
    ///
    /// Panics if the shapes differ.
    pub(crate) fn max_abs_diff(&self, other: &Self) -> T {
        self.zip_map(other, |a, b| (a - b).abs())
            .max()
            .unwrap_or_else(T::zero)
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for Array<T> {
    /// Prints 2-D arrays as aligned rows; everything else as a flat list
    /// followed by its shape.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shape.len() == 2 {
            let cols = self.shape[1];
            for (i, row) in self.data.chunks(cols.max(1)).enumerate() {
                if i > 0 {
                    writeln!(f)?;
                }
                write!(f, "[")?;
                for (j, x) in row.iter().enumerate() {
                    if j > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:>10.4}", x)?;
                }
                write!(f, "]")?;
            }
            return Ok(());
        }
        write!(f, "[")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "] shape={:?}", self.shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn sum_and_extrema() {
        let a = Array::from_slice(&[3.0_f64, -1.0, 2.0]);
        assert_eq!(a.sum(), 4.0);
        assert_eq!(a.max(), Some(3.0));
        assert_eq!(a.min(), Some(-1.0));
        assert_eq!(Array::<f64>::zeros(&[0]).max(), None);
    }

    #[test]
    fn max_propagates_nan() {
        let a = Array::from_slice(&[1.0_f64, f64::NAN, 2.0]);
        assert!(a.max().unwrap().is_nan());
    }

    #[test]
    fn all_close_rejects_shape_and_nan() {
        let a = Array::from_slice(&[1.0_f64, 2.0]);
        let b = a.reshape(&[2, 1]).unwrap();
        assert!(!a.all_close(&b, 1.0, 1.0));
        let n = Array::from_slice(&[1.0_f64, f64::NAN]);
        assert!(!n.all_close(&n, 1.0, 1.0));
    }

    #[test]
    fn display_matrix() {
        let m = Array::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        let s = format!("{}", m);
        assert_eq!(s.lines().count(), 2);
        assert!(s.contains("4.0000"));
    }

    #[test]
    fn display_vector() {
        let v = Array::from_slice(&[1, 2]);
        assert_eq!(format!("{}", v), "[1, 2] shape=[2]");
    }
}
