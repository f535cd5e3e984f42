//! Complex baseband signal simulation and power spectral density
//! estimation for SDR captures.
//!
//! A [`SignalGenerator`] produces a [`SampleBuffer`] of tones in complex
//! white Gaussian noise; [`periodogram`] and [`welch`] turn any buffer into
//! a [`PsdEstimate`] with frequencies, linear density and dB levels.

pub mod config;
pub mod error;
pub mod fft;
pub mod generate;
pub mod plot;
pub mod report;
pub mod samples;
pub mod spectrum;
pub mod vector_ops;

pub use error::{Result, SpectraError};
pub use fft::Real;
pub use generate::{SampleSource, SignalGenerator, Tone, AWGN};
pub use samples::SampleBuffer;
pub use spectrum::{
    periodogram, welch, AveragingMethod, PsdEstimate, Spectrogram, SpectrogramMethod, WelchConfig,
    WindowType,
};
