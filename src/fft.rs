use std::fmt::Debug;
use std::sync::Arc;

use num_complex::Complex;
use num_traits::{Float, NumCast};
use rustfft::{Fft, FftNum, FftPlanner};

/// Floating point type usable by every transform in this crate (`f32`, `f64`).
pub trait Real: Float + FftNum + Debug {}

impl<T: Float + FftNum + Debug> Real for T {}

/// Lossless-for-our-purposes numeric cast into `T`.
pub(crate) fn cast<T: Real, N: NumCast>(n: N) -> T {
    <T as NumCast>::from(n).unwrap_or_else(T::nan)
}

/// Plan a forward transform of `len` points.
pub fn plan_forward<T: Real>(len: usize) -> Arc<dyn Fft<T>> {
    let mut planner = FftPlanner::<T>::new();
    planner.plan_fft_forward(len)
}

/// In-place forward FFT, scaled by `1/N`.
pub fn fft<T: Real>(input: &mut [Complex<T>]) {
    let plan = plan_forward::<T>(input.len());
    forward(plan.as_ref(), input);
}

/// Run an existing plan and apply the same `1/N` scaling as [`fft`].
pub fn forward<T: Real>(plan: &dyn Fft<T>, input: &mut [Complex<T>]) {
    plan.process(input);
    scale(input);
}

pub fn scale<T: Real>(input: &mut [Complex<T>]) {
    if input.is_empty() {
        return;
    }
    let inv_n = T::one() / cast::<T, _>(input.len());
    input.iter_mut().for_each(|x| *x = x.scale(inv_n));
}

/// Move the zero-frequency bin to the centre (numpy convention: roll by `n/2`).
///
/// `[0, 1, 2, 3, 4, 5, 6, 7]` becomes `[4, 5, 6, 7, 0, 1, 2, 3]` and
/// `[0, 1, 2, 3, 4]` becomes `[3, 4, 0, 1, 2]`.
pub fn fftshift<T>(input_vec: &mut [T]) {
    let n = input_vec.len();
    input_vec.rotate_right(n / 2);
}

/// `num_points` values evenly spaced over `[start, stop]`, both ends included.
pub fn fftfreqs<T: Real>(start: T, stop: T, num_points: usize) -> Vec<T> {
    match num_points {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / cast::<T, _>(num_points - 1);
            (0..num_points)
                .map(|i| start + cast::<T, _>(i) * step)
                .collect()
        }
    }
}

/// Bin centre frequencies of an `n`-point transform after [`fftshift`].
///
/// For even `n` this is `-fs/2, -fs/2 + fs/n, ..., fs/2 - fs/n`; the upper
/// edge is never reached. Odd lengths are offset by half a bin so the axis
/// stays symmetric about 0 Hz.
pub fn shifted_bin_freqs<T: Real>(sample_rate: T, n: usize) -> Vec<T> {
    let df = sample_rate / cast::<T, _>(n);
    let half = (n / 2) as i64;
    (0..n as i64)
        .map(|k| cast::<T, _>(k - half) * df)
        .collect()
}

/// Non-negative bin frequencies `k * fs / nfft` for `k` in `0..len`.
pub fn onesided_freqs<T: Real>(sample_rate: T, nfft: usize, len: usize) -> Vec<T> {
    let df = sample_rate / cast::<T, _>(nfft);
    (0..len).map(|k| cast::<T, _>(k) * df).collect()
}
