use num_complex::Complex;
use rustfft::Fft;
use tracing::debug;

use crate::error::{Result, SpectraError};
use crate::fft::{cast, fftshift, forward, plan_forward, shifted_bin_freqs, Real};
use crate::samples::SampleBuffer;
use crate::spectrum::estimate::PsdEstimate;

/// Direct FFT power spectrum of the whole capture.
///
/// No window is applied. Each bin holds `(|X[k]| / N)^2` with `N` the
/// capture length, so a unit-amplitude tone on a bin centre reads 0 dB.
/// The result is FFT-shifted: index 0 is the most negative frequency.
///
/// # Arguments
/// * `buffer` - Capture to analyse
/// * `nfft` - Optional transform length `>= N`; the capture is zero-padded
///   up to it (e.g. `buffer.len().next_power_of_two()` for speed). Padding
///   interpolates between bins but leaves levels unchanged.
pub fn periodogram<T: Real>(buffer: &SampleBuffer<T>, nfft: Option<usize>) -> Result<PsdEstimate<T>> {
    let n = buffer.len();
    let fft_len = nfft.unwrap_or(n);
    if fft_len < n {
        return Err(SpectraError::invalid(
            "nfft",
            format!("transform length {} is shorter than the {} sample capture", fft_len, n),
        ));
    }

    debug!(samples = n, nfft = fft_len, "fft periodogram");

    let plan = plan_forward::<T>(fft_len);
    let power = shifted_power(buffer.samples(), plan.as_ref());
    let freqs = shifted_bin_freqs(buffer.sample_rate(), fft_len);

    Ok(PsdEstimate::new(freqs, power, false))
}

/// `(|X[k]| / N)^2` of `samples` zero-padded to the plan length, FFT-shifted.
pub(crate) fn shifted_power<T: Real>(samples: &[Complex<T>], plan: &dyn Fft<T>) -> Vec<T> {
    let fft_len = plan.len();
    let mut fft_input = samples.to_vec();
    fft_input.resize(fft_len, Complex::new(T::zero(), T::zero()));

    // forward() divides by the padded length; rescale to the capture length
    forward(plan, &mut fft_input);
    let gain = cast::<T, _>(fft_len) / cast::<T, _>(samples.len());
    let gain_sq = gain * gain;

    let mut power: Vec<T> = fft_input.iter().map(|c| c.norm_sqr() * gain_sq).collect();
    fftshift(&mut power);
    power
}
