use std::str::FromStr;

use num_complex::Complex;
use rustfft::Fft;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SpectraError};
use crate::fft::{cast, fftfreqs, fftshift, forward, onesided_freqs, plan_forward, shifted_bin_freqs, Real};
use crate::samples::SampleBuffer;
use crate::spectrum::estimate::PsdEstimate;
use crate::spectrum::window::{generate_periodic_window, window_energy, window_sum, WindowType};

/// Averaging method for combining periodograms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AveragingMethod {
    /// Mean averaging (standard Welch method)
    Mean,
    /// Median averaging (robust to outliers and bursts), bias corrected
    Median,
    /// Maximum across segments (peak hold)
    Max,
    /// Minimum across segments (noise floor estimation)
    Min,
}

impl AveragingMethod {
    pub fn name(&self) -> &'static str {
        match self {
            AveragingMethod::Mean => "mean",
            AveragingMethod::Median => "median",
            AveragingMethod::Max => "max",
            AveragingMethod::Min => "min",
        }
    }
}

impl FromStr for AveragingMethod {
    type Err = SpectraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" | "average" => Ok(AveragingMethod::Mean),
            "median" => Ok(AveragingMethod::Median),
            "max" | "peak" => Ok(AveragingMethod::Max),
            "min" => Ok(AveragingMethod::Min),
            other => Err(SpectraError::invalid(
                "averaging",
                format!("unrecognised averaging method `{}`", other),
            )),
        }
    }
}

/// Output units of the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scaling {
    /// Power spectral density, power/Hz: `|X|^2 / (fs * sum(w^2))`
    Density,
    /// Power spectrum, power per bin: `|X|^2 / sum(w)^2`
    Spectrum,
}

/// Per-segment trend removal before windowing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detrend {
    None,
    /// Subtract the segment mean
    Constant,
}

/// How the two-sided frequency axis is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyAxis {
    /// True bin centres, `-fs/2 .. fs/2 - fs/nfft` (same as the FFT path)
    Bins,
    /// `nfft` points spread over `[-fs/2, fs/2]` with both edges included
    Linspace,
}

/// Parameters for [`welch`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WelchConfig {
    /// Window applied to each segment
    pub window: WindowType,
    /// Segment length
    pub nperseg: usize,
    /// Samples shared by consecutive segments (default: `nperseg / 2`)
    pub noverlap: Option<usize>,
    /// FFT length for zero-padding (default: `nperseg`)
    pub nfft: Option<usize>,
    pub averaging: AveragingMethod,
    /// Fold negative frequencies onto positive ones
    pub onesided: bool,
    pub scaling: Scaling,
    pub detrend: Detrend,
    pub axis: FrequencyAxis,
}

impl Default for WelchConfig {
    fn default() -> Self {
        WelchConfig {
            window: WindowType::Hann,
            nperseg: 256,
            noverlap: None,
            nfft: None,
            averaging: AveragingMethod::Mean,
            onesided: false,
            scaling: Scaling::Density,
            detrend: Detrend::None,
            axis: FrequencyAxis::Bins,
        }
    }
}

impl WelchConfig {
    pub fn new(window: WindowType, nperseg: usize) -> Self {
        WelchConfig {
            window,
            nperseg,
            ..WelchConfig::default()
        }
    }

    pub fn overlap(&self) -> usize {
        self.noverlap.unwrap_or(self.nperseg / 2)
    }

    pub fn fft_len(&self) -> usize {
        self.nfft.unwrap_or(self.nperseg)
    }

    /// Number of full segments a capture of `len` samples splits into.
    pub fn num_segments(&self, len: usize) -> usize {
        if self.nperseg == 0 || len < self.nperseg || self.overlap() >= self.nperseg {
            return 0;
        }
        (len - self.nperseg) / (self.nperseg - self.overlap()) + 1
    }

    /// Check the configuration against a capture of `len` samples.
    pub fn validate(&self, len: usize) -> Result<()> {
        if self.nperseg == 0 {
            return Err(SpectraError::invalid("nperseg", "segment length must be > 0"));
        }
        if self.nperseg > len {
            return Err(SpectraError::invalid(
                "nperseg",
                format!("segment length {} exceeds the {} available samples", self.nperseg, len),
            ));
        }
        if self.overlap() >= self.nperseg {
            return Err(SpectraError::invalid(
                "noverlap",
                format!("overlap {} must be smaller than nperseg {}", self.overlap(), self.nperseg),
            ));
        }
        if self.fft_len() < self.nperseg {
            return Err(SpectraError::invalid(
                "nfft",
                format!("nfft {} must be at least nperseg {}", self.fft_len(), self.nperseg),
            ));
        }
        Ok(())
    }
}

/// Welch's method for power spectral density estimation
///
/// Splits the capture into overlapping segments, windows each one, and
/// combines their periodograms bin by bin. Levels are normalised once,
/// so `power_db` is `10*log10(density)` with no further correction.
///
/// Two-sided output runs from `-fs/2` upwards (FFT-shifted) and has
/// `nfft` bins. One-sided output sums each negative-frequency bin into its
/// positive mirror and has `nfft/2 + 1` bins for even `nfft`,
/// `(nfft + 1)/2` for odd.
pub fn welch<T: Real>(buffer: &SampleBuffer<T>, config: &WelchConfig) -> Result<PsdEstimate<T>> {
    config.validate(buffer.len())?;

    let nperseg = config.nperseg;
    let overlap = config.overlap();
    let fft_len = config.fft_len();
    let sample_rate = buffer.sample_rate();

    let window = generate_periodic_window::<T>(config.window, nperseg);
    let plan = plan_forward::<T>(fft_len);

    let psds: Vec<Vec<T>> = extract_segments(buffer.samples(), nperseg, overlap)
        .map(|seg| compute_segment_psd(seg, &window, config.detrend, plan.as_ref()))
        .collect();

    debug!(
        segments = psds.len(),
        nperseg,
        noverlap = overlap,
        nfft = fft_len,
        window = %config.window,
        averaging = ?config.averaging,
        "welch"
    );

    let mut averaged = average_spectra(&psds, config.averaging);
    if config.averaging == AveragingMethod::Median {
        let bias = cast::<T, _>(median_bias(psds.len()));
        averaged.iter_mut().for_each(|p| *p = *p / bias);
    }

    let psd = normalize_psd(averaged, &window, sample_rate, fft_len, config.scaling);

    if config.onesided {
        let folded = fold_onesided(&psd);
        let freqs = onesided_freqs(sample_rate, fft_len, folded.len());
        return Ok(PsdEstimate::new(freqs, folded, true));
    }

    let mut shifted = psd;
    fftshift(&mut shifted);
    let two = cast::<T, _>(2.0);
    let freqs = match config.axis {
        FrequencyAxis::Bins => shifted_bin_freqs(sample_rate, fft_len),
        FrequencyAxis::Linspace => fftfreqs(-sample_rate / two, sample_rate / two, fft_len),
    };

    Ok(PsdEstimate::new(freqs, shifted, false))
}

/// Full-length segments starting every `nperseg - noverlap` samples.
fn extract_segments<T>(
    signal: &[Complex<T>],
    nperseg: usize,
    noverlap: usize,
) -> impl Iterator<Item = &[Complex<T>]> {
    let step = nperseg - noverlap;
    signal
        .windows(nperseg)
        .step_by(step)
}

/// Detrend, window, zero-pad and transform one segment; returns `|X|^2`
/// of the `1/N` scaled transform.
fn compute_segment_psd<T: Real>(
    segment: &[Complex<T>],
    window: &[T],
    detrend: Detrend,
    plan: &dyn Fft<T>,
) -> Vec<T> {
    let offset = match detrend {
        Detrend::None => Complex::new(T::zero(), T::zero()),
        Detrend::Constant => {
            let sum = segment
                .iter()
                .fold(Complex::new(T::zero(), T::zero()), |acc, s| acc + s);
            sum / cast::<T, _>(segment.len())
        }
    };

    let mut fft_input: Vec<Complex<T>> = segment
        .iter()
        .zip(window.iter())
        .map(|(s, &w)| (s - offset).scale(w))
        .collect();
    fft_input.resize(plan.len(), Complex::new(T::zero(), T::zero()));

    forward(plan, &mut fft_input);

    fft_input.iter().map(|c| c.norm_sqr()).collect()
}

/// Combine power spectra bin by bin using the specified method
fn average_spectra<T: Real>(spectra: &[Vec<T>], method: AveragingMethod) -> Vec<T> {
    let Some(first) = spectra.first() else {
        return vec![];
    };
    let n_spectra = cast::<T, _>(spectra.len());

    (0..first.len())
        .map(|i| {
            let column = spectra.iter().map(|spec| spec[i]);
            match method {
                AveragingMethod::Mean => column.fold(T::zero(), |acc, v| acc + v) / n_spectra,
                AveragingMethod::Median => {
                    let mut values: Vec<T> = column.collect();
                    median_of_slice(&mut values)
                }
                AveragingMethod::Max => column.fold(T::neg_infinity(), T::max),
                AveragingMethod::Min => column.fold(T::infinity(), T::min),
            }
        })
        .collect()
}

/// Compute median of a slice (sorts in place)
fn median_of_slice<T: Real>(values: &mut [T]) -> T {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let len = values.len();

    if len % 2 == 0 {
        let mid = len / 2;
        (values[mid - 1] + values[mid]) / cast::<T, _>(2.0)
    } else {
        values[len / 2]
    }
}

/// Ratio of the sample median to the mean for `n` exponentially distributed
/// periodogram values: `1 + sum_{i=1}^{(n-1)/2} (1/(2i+1) - 1/(2i))`.
///
/// Tends to `ln 2` as `n` grows; dividing by it makes median averaging an
/// unbiased density estimate.
pub fn median_bias(n: usize) -> f64 {
    let terms = n.saturating_sub(1) / 2;
    1.0 + (1..=terms)
        .map(|i| {
            let even = 2.0 * i as f64;
            1.0 / (even + 1.0) - 1.0 / even
        })
        .sum::<f64>()
}

/// Scale `|X|^2` of the `1/N` transform into density or spectrum units
fn normalize_psd<T: Real>(
    mut psd: Vec<T>,
    window: &[T],
    sample_rate: T,
    nfft: usize,
    scaling: Scaling,
) -> Vec<T> {
    // The transform was divided by nfft, so nfft^2 undoes that before the
    // window normalisation.
    let nfft_float = cast::<T, _>(nfft);
    let nfft_sq = nfft_float * nfft_float;
    let scale = match scaling {
        Scaling::Density => nfft_sq / (sample_rate * window_energy(window)),
        Scaling::Spectrum => {
            let sum = window_sum(window);
            nfft_sq / (sum * sum)
        }
    };

    psd.iter_mut().for_each(|val| *val = *val * scale);
    psd
}

/// Sum each negative-frequency bin into its positive mirror.
///
/// DC and (for even lengths) Nyquist have no mirror and stay as they are.
/// For real input this is the usual doubling of the interior bins.
fn fold_onesided<T: Real>(psd: &[T]) -> Vec<T> {
    let n = psd.len();
    let out_len = if n % 2 == 0 { n / 2 + 1 } else { (n + 1) / 2 };

    (0..out_len)
        .map(|k| {
            let mirror = (n - k) % n;
            if k == 0 || mirror == k {
                psd[k]
            } else {
                psd[k] + psd[mirror]
            }
        })
        .collect()
}
