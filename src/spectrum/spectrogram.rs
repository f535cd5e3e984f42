use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SpectraError};
use crate::fft::{cast, plan_forward, shifted_bin_freqs, Real};
use crate::samples::SampleBuffer;
use crate::spectrum::periodogram::shifted_power;
use crate::spectrum::welch::{welch, WelchConfig};
use crate::vector_ops;

/// Per-frame estimator used to build a [`Spectrogram`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum SpectrogramMethod {
    /// Unwindowed FFT per frame, zero-padded to `nfft` (default: frame length)
    Periodogram { nfft: Option<usize> },
    /// Welch estimate per frame; must be two-sided
    Welch(WelchConfig),
}

/// Time/frequency power map: one dB row per frame, rows in capture order.
#[derive(Debug, Clone)]
pub struct Spectrogram<T> {
    frequencies: Vec<T>,
    frame_times: Vec<T>,
    rows: Vec<Vec<T>>,
}

impl<T: Real> Spectrogram<T> {
    /// Split `buffer` into back-to-back frames of `frame_len` samples and
    /// estimate each one. Samples past the last full frame are ignored.
    pub fn compute(
        buffer: &SampleBuffer<T>,
        frame_len: usize,
        method: &SpectrogramMethod,
    ) -> Result<Self> {
        if frame_len == 0 || frame_len > buffer.len() {
            return Err(SpectraError::invalid(
                "frame_len",
                format!("must be in 1..={}, got {}", buffer.len(), frame_len),
            ));
        }

        let num_frames = buffer.len() / frame_len;
        let leftover = buffer.len() % frame_len;
        if leftover > 0 {
            warn!(leftover, frame_len, "dropping samples past the last full frame");
        }

        let sample_rate = buffer.sample_rate();
        let (frequencies, rows) = match method {
            SpectrogramMethod::Periodogram { nfft } => {
                let fft_len = nfft.unwrap_or(frame_len);
                if fft_len < frame_len {
                    return Err(SpectraError::invalid(
                        "nfft",
                        format!("nfft {} is shorter than the {} sample frame", fft_len, frame_len),
                    ));
                }
                let plan = plan_forward::<T>(fft_len);
                let rows = buffer
                    .frames(frame_len)
                    .map(|frame| vector_ops::to_db(&shifted_power(frame, plan.as_ref())))
                    .collect();
                (shifted_bin_freqs(sample_rate, fft_len), rows)
            }
            SpectrogramMethod::Welch(config) => {
                if config.onesided {
                    return Err(SpectraError::invalid(
                        "onesided",
                        "spectrogram rows are two-sided",
                    ));
                }
                let mut frequencies = Vec::new();
                let mut rows = Vec::with_capacity(num_frames);
                for frame in buffer.frames(frame_len) {
                    let frame_buf = SampleBuffer::new(frame.to_vec(), sample_rate)?;
                    let est = welch(&frame_buf, config)?;
                    if frequencies.is_empty() {
                        frequencies = est.frequencies().to_vec();
                    }
                    rows.push(est.power_db().to_vec());
                }
                (frequencies, rows)
            }
        };

        debug!(frames = num_frames, frame_len, bins = frequencies.len(), "spectrogram");

        let frame_times = (0..num_frames)
            .map(|i| cast::<T, _>(i * frame_len) / sample_rate)
            .collect();

        Ok(Spectrogram {
            frequencies,
            frame_times,
            rows,
        })
    }

    /// Column frequencies in Hz.
    pub fn frequencies(&self) -> &[T] {
        &self.frequencies
    }

    /// Start time of each frame in seconds.
    pub fn frame_times(&self) -> &[T] {
        &self.frame_times
    }

    /// dB rows, `rows()[frame][bin]`.
    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    pub fn row(&self, frame: usize) -> Option<&[T]> {
        self.rows.get(frame).map(|r| r.as_slice())
    }

    pub fn num_frames(&self) -> usize {
        self.rows.len()
    }

    /// Frequency of the strongest bin in each frame.
    pub fn peak_track(&self) -> Vec<T> {
        self.rows
            .iter()
            .map(|row| self.frequencies[vector_ops::max(row).0])
            .collect()
    }
}
