use core::fmt::Debug;
use num_traits::{Float, FromPrimitive, Num, One, Zero};

/// Trait for types that can be stored in an [`Array`](crate::Array).
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point array elements.
///
/// Required by every numeric routine in the crate (inverses, norms,
/// decompositions, transforms). `FromPrimitive` lets the routines lift
/// literal constants and sizes into `T` without panicking casts.
pub trait FloatScalar: Scalar + Float + FromPrimitive {
    /// Lift an `f64` constant into `Self`.
    #[inline]
    fn lit(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).unwrap_or_else(Self::nan)
    }

    /// Lift a dimension or count into `Self`.
    #[inline]
    fn from_len(n: usize) -> Self {
        <Self as FromPrimitive>::from_usize(n).unwrap_or_else(Self::nan)
    }

    /// `2 * self`, used by the Newton–Schulz update `2I - AX`.
    #[inline]
    fn twice(self) -> Self {
        self + self
    }
}

impl<T: Scalar + Float + FromPrimitive> FloatScalar for T {}
