use crate::array::Array;
use crate::linalg::kron;
use crate::traits::FloatScalar;

use super::FilterError;

/// Process noise `Q` of the discrete constant white-noise model.
///
/// `dim` is the model order (2: position/velocity, 3: adds acceleration,
/// 4: adds jerk). With `block_size > 1` the same `Q` is repeated for
/// several independent axes: ordered by dimension (`I ⊗ Q`, block
/// diagonal) or by derivative (`Q ⊗ I`). The result is scaled by `var`.
///
/// ```
/// use tinyops::filter::noise_cov;
///
/// let q = noise_cov(2, 1.0_f64, 2.0, 2, true).unwrap();
/// assert_eq!(q.shape(), &[4, 4]);
/// assert_eq!(q[(0, 0)], 0.5);
/// assert_eq!(q[(0, 2)], 0.0);
/// assert_eq!(q[(3, 3)], 2.0);
/// ```
pub fn noise_cov<T: FloatScalar>(
    dim: usize,
    dt: T,
    var: T,
    block_size: usize,
    order_by_dim: bool,
) -> Result<Array<T>, FilterError> {
    let d2 = dt * dt;
    let d3 = d2 * dt;
    let d4 = d3 * dt;
    let half = T::lit(0.5);
    let quarter = T::lit(0.25);
    let one = T::one();

    let q = match dim {
        2 => Array::from_rows(2, 2, &[d4 * quarter, d3 * half, d3 * half, d2]),
        3 => Array::from_rows(
            3,
            3,
            &[
                d4 * quarter, d3 * half, d2 * half,
                d3 * half, d2, dt,
                d2 * half, dt, one,
            ],
        ),
        4 => {
            let d5 = d4 * dt;
            let d6 = d5 * dt;
            let (six, twelve, thirtysix) = (T::lit(6.0), T::lit(12.0), T::lit(36.0));
            Array::from_rows(
                4,
                4,
                &[
                    d6 / thirtysix, d5 / twelve, d4 / six, d3 / six,
                    d5 / twelve, d4 * quarter, d3 * half, d2 * half,
                    d4 / six, d3 * half, d2, dt,
                    d3 / six, d2 * half, dt, one,
                ],
            )
        }
        _ => return Err(FilterError::InvalidDimension { dim }),
    };

    let q = if block_size == 1 {
        q
    } else {
        let eye = Array::eye(block_size);
        if order_by_dim {
            kron(&eye, &q)
        } else {
            kron(&q, &eye)
        }
    };
    Ok(q * var)
}
