use num_complex::Complex;

use crate::error::{Result, SpectraError};
use crate::fft::{cast, Real};
use crate::vector_ops;

/// A captured or simulated block of complex baseband samples together with
/// the rate it was sampled at.
///
/// Always holds at least one sample and a finite, positive sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer<T> {
    samples: Vec<Complex<T>>,
    sample_rate: T,
}

impl<T: Real> SampleBuffer<T> {
    /// Take ownership of `samples`, validating the buffer invariants.
    pub fn new(samples: Vec<Complex<T>>, sample_rate: T) -> Result<Self> {
        if !(sample_rate.is_finite() && sample_rate > T::zero()) {
            return Err(SpectraError::invalid(
                "sample_rate",
                format!("must be finite and > 0, got {:?}", sample_rate),
            ));
        }
        if samples.is_empty() {
            return Err(SpectraError::invalid("samples", "buffer must hold at least one sample"));
        }
        Ok(SampleBuffer { samples, sample_rate })
    }

    pub fn samples(&self) -> &[Complex<T>] {
        &self.samples
    }

    pub fn sample_rate(&self) -> T {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Never true for a constructed buffer; present for API symmetry with `Vec`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Capture duration in seconds.
    pub fn duration(&self) -> T {
        cast::<T, _>(self.len()) / self.sample_rate
    }

    /// Sample instants `n / fs` for `n` in `0..len`.
    pub fn time_axis(&self) -> Vec<T> {
        time_axis(self.len(), self.sample_rate)
    }

    /// Mean of `|x|^2` over the buffer.
    pub fn mean_power(&self) -> T {
        vector_ops::mean_power(&self.samples)
    }

    // Returns real vector of sqrt(r^2 + i^2)
    pub fn abs(&self) -> Vec<T> {
        self.samples.iter().map(|x| x.norm()).collect()
    }

    /// Consecutive non-overlapping frames of `frame_len` samples; a trailing
    /// partial frame is not returned.
    pub fn frames(&self, frame_len: usize) -> impl Iterator<Item = &[Complex<T>]> {
        self.samples.chunks_exact(frame_len.max(1))
    }

    pub fn into_inner(self) -> Vec<Complex<T>> {
        self.samples
    }
}

impl<T> std::ops::Index<usize> for SampleBuffer<T> {
    type Output = Complex<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

pub(crate) fn time_axis<T: Real>(len: usize, sample_rate: T) -> Vec<T> {
    (0..len)
        .map(|n| cast::<T, _>(n) / sample_rate)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rejects_bad_sample_rate() {
        let samples = vec![Complex::new(1.0_f64, 0.0)];
        for fs in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = SampleBuffer::new(samples.clone(), fs).unwrap_err();
            assert!(matches!(err, SpectraError::InvalidParameter { name: "sample_rate", .. }));
        }
    }

    #[test]
    fn test_rejects_empty_buffer() {
        let err = SampleBuffer::<f32>::new(vec![], 1.0).unwrap_err();
        assert!(matches!(err, SpectraError::InvalidParameter { name: "samples", .. }));
    }

    #[test]
    fn test_time_axis_and_duration() {
        let buf = SampleBuffer::new(vec![Complex::new(0.0_f64, 0.0); 4], 2.0).unwrap();
        assert_eq!(buf.time_axis(), vec![0.0, 0.5, 1.0, 1.5]);
        assert_abs_diff_eq!(buf.duration(), 2.0);
    }

    #[test]
    fn test_frames_drop_partial_tail() {
        let samples: Vec<_> = (0..10).map(|i| Complex::new(i as f64, 0.0)).collect();
        let buf = SampleBuffer::new(samples, 1.0).unwrap();
        let frames: Vec<_> = buf.frames(4).collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1][0].re, 4.0);
    }

    #[test]
    fn test_abs_and_power() {
        let buf = SampleBuffer::new(vec![Complex::new(3.0_f64, 4.0), Complex::new(0.0, 0.0)], 1.0).unwrap();
        assert_eq!(buf.abs(), vec![5.0, 0.0]);
        assert_abs_diff_eq!(buf.mean_power(), 12.5);
        assert_eq!(buf[0], Complex::new(3.0, 4.0));
    }
}
