use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::traits::Scalar;

use super::Array;

// ── Element-wise addition / subtraction ─────────────────────────────

macro_rules! impl_elementwise {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Scalar> $trait<&Array<T>> for &Array<T> {
            type Output = Array<T>;

            fn $method(self, rhs: &Array<T>) -> Array<T> {
                assert_eq!(
                    self.shape, rhs.shape,
                    "dimension mismatch: {:?} {} {:?}",
                    self.shape, stringify!($op), rhs.shape,
                );
                self.zip_map(rhs, |a, b| a $op b)
            }
        }

        impl<T: Scalar> $trait<Array<T>> for Array<T> {
            type Output = Array<T>;

            fn $method(self, rhs: Array<T>) -> Array<T> {
                <&Array<T> as $trait<&Array<T>>>::$method(&self, &rhs)
            }
        }

        impl<T: Scalar> $trait<&Array<T>> for Array<T> {
            type Output = Array<T>;

            fn $method(self, rhs: &Array<T>) -> Array<T> {
                <&Array<T> as $trait<&Array<T>>>::$method(&self, rhs)
            }
        }

        impl<T: Scalar> $trait<Array<T>> for &Array<T> {
            type Output = Array<T>;

            fn $method(self, rhs: Array<T>) -> Array<T> {
                <&Array<T> as $trait<&Array<T>>>::$method(self, &rhs)
            }
        }
    };
}

impl_elementwise!(Add, add, +);
impl_elementwise!(Sub, sub, -);

impl<T: Scalar> AddAssign<&Array<T>> for Array<T> {
    fn add_assign(&mut self, rhs: &Array<T>) {
        assert_eq!(
            self.shape, rhs.shape,
            "dimension mismatch: {:?} += {:?}",
            self.shape, rhs.shape,
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a + b;
        }
    }
}

impl<T: Scalar> SubAssign<&Array<T>> for Array<T> {
    fn sub_assign(&mut self, rhs: &Array<T>) {
        assert_eq!(
            self.shape, rhs.shape,
            "dimension mismatch: {:?} -= {:?}",
            self.shape, rhs.shape,
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a - b;
        }
    }
}

// ── Scalar multiplication / division ────────────────────────────────

impl<T: Scalar> Mul<T> for &Array<T> {
    type Output = Array<T>;

    fn mul(self, rhs: T) -> Array<T> {
        self.map(|x| x * rhs)
    }
}

impl<T: Scalar> Mul<T> for Array<T> {
    type Output = Array<T>;

    fn mul(mut self, rhs: T) -> Array<T> {
        for x in self.data.iter_mut() {
            *x = *x * rhs;
        }
        self
    }
}

impl<T: Scalar> Div<T> for &Array<T> {
    type Output = Array<T>;

    fn div(self, rhs: T) -> Array<T> {
        self.map(|x| x / rhs)
    }
}

impl<T: Scalar> Div<T> for Array<T> {
    type Output = Array<T>;

    fn div(mut self, rhs: T) -> Array<T> {
        for x in self.data.iter_mut() {
            *x = *x / rhs;
        }
        self
    }
}

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar + Neg<Output = T>> Neg for Array<T> {
    type Output = Array<T>;

    fn neg(mut self) -> Array<T> {
        for x in self.data.iter_mut() {
            *x = -*x;
        }
        self
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for &Array<T> {
    type Output = Array<T>;

    fn neg(self) -> Array<T> {
        self.map(|x| -x)
    }
}
