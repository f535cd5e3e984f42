use num_complex::Complex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{Result, SpectraError};
use crate::fft::{cast, Real};

/// Circularly-symmetric complex Gaussian noise source.
///
/// Each sample is `(a + ib) / sqrt(2) * sqrt(noise_power)` with `a`, `b`
/// independent standard normals, so the expected `|x|^2` equals
/// `noise_power`.
pub struct AWGN {
    noise_power: f64,
    rng: StdRng,
}

impl AWGN {
    /// Create AWGN generator from a seed (reproducible)
    pub fn new_from_seed(noise_power: f64, seed: u64) -> Result<Self> {
        Self::with_rng(noise_power, StdRng::seed_from_u64(seed))
    }

    /// Create AWGN generator from system entropy (non-reproducible)
    pub fn new_from_entropy(noise_power: f64) -> Result<Self> {
        Self::with_rng(noise_power, StdRng::from_entropy())
    }

    fn with_rng(noise_power: f64, rng: StdRng) -> Result<Self> {
        if !(noise_power.is_finite() && noise_power >= 0.0) {
            return Err(SpectraError::invalid(
                "noise_power",
                format!("must be finite and >= 0, got {}", noise_power),
            ));
        }
        Ok(AWGN { noise_power, rng })
    }

    pub fn noise_power(&self) -> f64 {
        self.noise_power
    }

    /// Draw `len` noise samples.
    ///
    /// The RNG advances by two normals per sample even when the power is
    /// zero, so a given seed yields the same stream at any power.
    pub fn generate_block<T: Real>(&mut self, len: usize) -> Vec<Complex<T>> {
        let gain = (self.noise_power / 2.0).sqrt();

        (0..len)
            .map(|_| {
                let i_std: f64 = StandardNormal.sample(&mut self.rng);
                let q_std: f64 = StandardNormal.sample(&mut self.rng);
                Complex::new(cast::<T, _>(i_std * gain), cast::<T, _>(q_std * gain))
            })
            .collect()
    }
}
