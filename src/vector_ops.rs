use std::cmp::PartialOrd;

use num_complex::Complex;
use num_traits::Float;

/// Index and value of the largest element. Panics on an empty slice.
pub fn max<T: Copy + PartialOrd>(vector: &[T]) -> (usize, T) {
    let mut max_idx = 0;
    let mut max_val = vector[0];

    for (i, &val) in vector.iter().enumerate().skip(1) {
        if val > max_val {
            max_val = val;
            max_idx = i;
        }
    }

    (max_idx, max_val)
}

/// `10*log10(x)` per element. Zero maps to `-inf`, negative input to NaN.
pub fn to_db<T: Float>(vector: &[T]) -> Vec<T> {
    let ten = T::from(10.0).unwrap_or_else(T::nan);
    vector.iter().map(|val| ten * val.log10()).collect()
}

/// Average of `|x|^2` over the slice.
pub fn mean_power<T: Float>(samples: &[Complex<T>]) -> T {
    if samples.is_empty() {
        return T::zero();
    }
    let total = samples.iter().fold(T::zero(), |acc, s| acc + s.norm_sqr());
    total / T::from(samples.len()).unwrap_or_else(T::nan)
}

pub fn add<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: std::ops::Add<Output = T> + Copy,
{
    assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| *x + *y).collect()
}
