use num_complex::Complex;
use std::f64::consts::PI;

use crate::fft::{cast, Real};

/// Unit-amplitude complex exponential `exp(i*2*pi*f*t)`.
///
/// Negative frequencies rotate clockwise, i.e. sit below DC in a
/// baseband spectrum.
pub struct Tone {
    freq_hz: f64,
    sample_rate_hz: f64,
    sample_num: usize,
}

impl Tone {
    pub fn new(freq_hz: f64, sample_rate_hz: f64) -> Self {
        Tone {
            freq_hz,
            sample_rate_hz,
            sample_num: 0,
        }
    }

    pub fn freq_hz(&self) -> f64 {
        self.freq_hz
    }

    /// Next `len` samples; phase continues across calls.
    pub fn generate_block<T: Real>(&mut self, len: usize) -> Vec<Complex<T>> {
        let w = 2.0 * PI * self.freq_hz;
        let block = (self.sample_num..self.sample_num + len)
            .map(|n| {
                // Phase in f64 then narrow, so f32 output does not drift
                let t = n as f64 / self.sample_rate_hz;
                let (q, i) = (w * t).sin_cos();
                Complex::new(cast::<T, _>(i), cast::<T, _>(q))
            })
            .collect();
        self.sample_num += len;
        block
    }

    /// Add this tone onto an existing buffer in place.
    pub fn accumulate<T: Real>(&mut self, buffer: &mut [Complex<T>]) {
        let tone = self.generate_block::<T>(buffer.len());
        for (b, t) in buffer.iter_mut().zip(tone) {
            *b = *b + t;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_tone_is_unit_amplitude() {
        let block = Tone::new(-100e3, 500e3).generate_block::<f64>(1024);
        assert_eq!(block.len(), 1024);
        for s in &block {
            assert_abs_diff_eq!(s.norm(), 1.0, epsilon = 1e-12);
        }
        assert_eq!(block[0], Complex::new(1.0, 0.0));
    }

    #[test]
    fn test_quarter_rate_tone() {
        // fs/4 steps a quarter turn per sample; negative steps clockwise
        let pos = Tone::new(250.0, 1000.0).generate_block::<f64>(2);
        let neg = Tone::new(-250.0, 1000.0).generate_block::<f64>(2);
        assert_abs_diff_eq!(pos[1].im, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(neg[1].im, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_phase_continues_across_blocks() {
        let mut split = Tone::new(37.0, 1000.0);
        let mut joined: Vec<Complex<f64>> = split.generate_block(10);
        joined.extend(split.generate_block::<f64>(10));

        let whole = Tone::new(37.0, 1000.0).generate_block::<f64>(20);
        for (a, b) in joined.iter().zip(whole.iter()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-12);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }
}
