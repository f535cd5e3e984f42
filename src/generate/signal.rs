use tracing::debug;

use crate::error::{Result, SpectraError};
use crate::fft::{cast, Real};
use crate::generate::awgn::AWGN;
use crate::generate::tone::Tone;
use crate::samples::SampleBuffer;
use crate::vector_ops;

/// Noise power used when the caller does not pick one.
pub const DEFAULT_NOISE_POWER: f64 = 2.0;

/// Synthetic capture: a sum of unit-amplitude tones plus complex AWGN.
pub struct SignalGenerator {
    tones: Vec<f64>,
    sample_rate_hz: f64,
    num_samples: usize,
    awgn: AWGN,
}

impl SignalGenerator {
    /// Reproducible generator.
    ///
    /// # Arguments
    /// * `tones` - Tone frequencies in Hz (signed; may be empty)
    /// * `seconds` - Capture duration
    /// * `sample_rate_hz` - Sample rate
    /// * `noise_power` - Linear noise power (see [`DEFAULT_NOISE_POWER`])
    /// * `seed` - RNG seed for the noise
    pub fn new_from_seed(
        tones: &[f64],
        seconds: f64,
        sample_rate_hz: f64,
        noise_power: f64,
        seed: u64,
    ) -> Result<Self> {
        let num_samples = sample_count(seconds, sample_rate_hz)?;
        validate_tones(tones)?;
        Ok(SignalGenerator {
            tones: tones.to_vec(),
            sample_rate_hz,
            num_samples,
            awgn: AWGN::new_from_seed(noise_power, seed)?,
        })
    }

    /// Generator seeded from system entropy.
    pub fn new_from_entropy(
        tones: &[f64],
        seconds: f64,
        sample_rate_hz: f64,
        noise_power: f64,
    ) -> Result<Self> {
        let num_samples = sample_count(seconds, sample_rate_hz)?;
        validate_tones(tones)?;
        Ok(SignalGenerator {
            tones: tones.to_vec(),
            sample_rate_hz,
            num_samples,
            awgn: AWGN::new_from_entropy(noise_power)?,
        })
    }

    pub fn tones(&self) -> &[f64] {
        &self.tones
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Produce one capture. Tones restart at `t = 0` on every call; the noise
    /// stream continues, so successive captures see fresh noise.
    pub fn generate<T: Real>(&mut self) -> Result<SampleBuffer<T>> {
        let noise = self.awgn.generate_block::<T>(self.num_samples);

        let mut tones = vec![num_complex::Complex::new(T::zero(), T::zero()); self.num_samples];
        for &freq in &self.tones {
            Tone::new(freq, self.sample_rate_hz).accumulate(&mut tones);
        }

        debug!(
            samples = self.num_samples,
            tones = self.tones.len(),
            noise_power = self.awgn.noise_power(),
            "generated capture"
        );

        SampleBuffer::new(
            vector_ops::add(&noise, &tones),
            cast::<T, _>(self.sample_rate_hz),
        )
    }
}

/// `round(seconds * sample_rate)`, rejecting anything that yields no samples.
pub fn sample_count(seconds: f64, sample_rate_hz: f64) -> Result<usize> {
    if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
        return Err(SpectraError::invalid(
            "sample_rate",
            format!("must be finite and > 0, got {}", sample_rate_hz),
        ));
    }
    if !(seconds.is_finite() && seconds > 0.0) {
        return Err(SpectraError::invalid(
            "seconds",
            format!("must be finite and > 0, got {}", seconds),
        ));
    }
    let count = (seconds * sample_rate_hz).round();
    if count < 1.0 {
        return Err(SpectraError::invalid(
            "seconds",
            format!("{} s at {} Hz is less than one sample", seconds, sample_rate_hz),
        ));
    }
    if count > usize::MAX as f64 {
        return Err(SpectraError::invalid("seconds", "sample count overflows usize"));
    }
    Ok(count as usize)
}

fn validate_tones(tones: &[f64]) -> Result<()> {
    match tones.iter().find(|f| !f.is_finite()) {
        Some(f) => Err(SpectraError::invalid("tones", format!("non-finite frequency {}", f))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex;

    #[test]
    fn test_sample_count_rounding() {
        assert_eq!(sample_count(1.0, 10_000.0).unwrap(), 10_000);
        // 0.29 * 100 is 28.999999999999996 in binary floating point
        assert_eq!(sample_count(0.29, 100.0).unwrap(), 29);
        assert!(sample_count(0.0, 100.0).is_err());
        assert!(sample_count(1.0, 0.0).is_err());
        assert!(sample_count(1.0, -5.0).is_err());
        assert!(sample_count(0.001, 100.0).is_err());
    }

    #[test]
    fn test_noiseless_tones_are_exact() {
        let mut gen = SignalGenerator::new_from_seed(&[1000.0], 1.0, 10_000.0, 0.0, 1).unwrap();
        let buf = gen.generate::<f64>().unwrap();
        assert_eq!(buf.len(), 10_000);
        assert_eq!(buf.sample_rate(), 10_000.0);
        // 1 kHz at 10 kHz: 10 samples per cycle
        assert_abs_diff_eq!(buf[10].re, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(buf[10].im, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tones_superimpose() {
        let mut gen =
            SignalGenerator::new_from_seed(&[100.0, -100.0], 0.01, 1000.0, 0.0, 1).unwrap();
        let buf = gen.generate::<f64>().unwrap();
        // exp(iwt) + exp(-iwt) = 2cos(wt), purely real
        for (n, s) in buf.samples().iter().enumerate() {
            let t = n as f64 / 1000.0;
            let expected = 2.0 * (2.0 * std::f64::consts::PI * 100.0 * t).cos();
            assert_abs_diff_eq!(s.re, expected, epsilon = 1e-9);
            assert_abs_diff_eq!(s.im, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_no_tones_is_noise_only() {
        let mut gen = SignalGenerator::new_from_seed(&[], 10.0, 20_000.0, 2.0, 42).unwrap();
        let buf = gen.generate::<f64>().unwrap();
        let p = buf.mean_power();
        assert!((p - 2.0).abs() / 2.0 < 0.05, "noise power {}", p);
    }

    #[test]
    fn test_same_seed_same_capture() {
        let a = SignalGenerator::new_from_seed(&[50.0], 1.0, 300.0, DEFAULT_NOISE_POWER, 9)
            .unwrap()
            .generate::<f32>()
            .unwrap();
        let b = SignalGenerator::new_from_seed(&[50.0], 1.0, 300.0, DEFAULT_NOISE_POWER, 9)
            .unwrap()
            .generate::<f32>()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(SignalGenerator::new_from_seed(&[1.0], -1.0, 100.0, 1.0, 0).is_err());
        assert!(SignalGenerator::new_from_seed(&[1.0], 1.0, 100.0, -1.0, 0).is_err());
        assert!(SignalGenerator::new_from_seed(&[f64::NAN], 1.0, 100.0, 1.0, 0).is_err());
        assert!(SignalGenerator::new_from_entropy(&[], 1.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_generated_samples_are_sum_of_parts() {
        let mut gen = SignalGenerator::new_from_seed(&[25.0], 0.1, 1000.0, 0.5, 3).unwrap();
        let buf = gen.generate::<f64>().unwrap();

        let noise = AWGN::new_from_seed(0.5, 3).unwrap().generate_block::<f64>(100);
        let tone = Tone::new(25.0, 1000.0).generate_block::<f64>(100);
        for i in 0..100 {
            let expected: Complex<f64> = noise[i] + tone[i];
            assert_abs_diff_eq!(buf[i].re, expected.re, epsilon = 1e-12);
            assert_abs_diff_eq!(buf[i].im, expected.im, epsilon = 1e-12);
        }
    }
}
