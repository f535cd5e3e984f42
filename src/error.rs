//! Error types for signal generation and spectral estimation

use std::io;
use thiserror::Error;

/// Result type for sdr-spectra operations
pub type Result<T> = std::result::Result<T, SpectraError>;

/// Errors that can occur while generating or analysing samples
#[derive(Error, Debug)]
pub enum SpectraError {
    /// A caller-supplied parameter is out of range or unrecognised
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A spectral bin has zero power, so its logarithm is not finite
    #[error("Non-finite dB value at bin {index} ({frequency} Hz): zero power")]
    Domain { index: usize, frequency: f64 },

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading config or writing estimates failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Writing an estimate as CSV failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SpectraError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SpectraError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
