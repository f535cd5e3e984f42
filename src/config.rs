use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, SpectraError};
use crate::generate::{SignalGenerator, DEFAULT_NOISE_POWER};
use crate::spectrum::{SpectrogramMethod, WelchConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Tone frequencies in Hz, negative values below the carrier
    #[serde(default = "SimulationConfig::default_tones")]
    pub tones: Vec<f64>,
    #[serde(default = "SimulationConfig::default_seconds")]
    pub seconds: f64,
    #[serde(default = "SimulationConfig::default_sample_rate_hz")]
    pub sample_rate_hz: f64,
    #[serde(default = "SimulationConfig::default_noise_power")]
    pub noise_power: f64,
    /// Fixed RNG seed; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Zero-pad the FFT periodogram to this length
    #[serde(default)]
    pub nfft: Option<usize>,
}

impl SimulationConfig {
    fn default_tones() -> Vec<f64> {
        vec![50.0]
    }
    fn default_seconds() -> f64 {
        10.0
    }
    fn default_sample_rate_hz() -> f64 {
        300.0
    }
    fn default_noise_power() -> f64 {
        DEFAULT_NOISE_POWER
    }

    /// Build the generator these settings describe.
    pub fn generator(&self) -> Result<SignalGenerator> {
        match self.seed {
            Some(seed) => SignalGenerator::new_from_seed(
                &self.tones,
                self.seconds,
                self.sample_rate_hz,
                self.noise_power,
                seed,
            ),
            None => SignalGenerator::new_from_entropy(
                &self.tones,
                self.seconds,
                self.sample_rate_hz,
                self.noise_power,
            ),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tones: Self::default_tones(),
            seconds: Self::default_seconds(),
            sample_rate_hz: Self::default_sample_rate_hz(),
            noise_power: Self::default_noise_power(),
            seed: None,
            nfft: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrogramConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "SpectrogramConfig::default_frame_len")]
    pub frame_len: usize,
    #[serde(default = "SpectrogramConfig::default_method")]
    pub method: SpectrogramMethod,
}

impl SpectrogramConfig {
    fn default_frame_len() -> usize {
        256
    }
    fn default_method() -> SpectrogramMethod {
        SpectrogramMethod::Periodogram { nfft: None }
    }
}

impl Default for SpectrogramConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            frame_len: Self::default_frame_len(),
            method: Self::default_method(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV file receiving `estimator,frequency_hz,density,power_db` rows
    #[serde(default)]
    pub csv: Option<PathBuf>,
    /// Standalone plotly HTML page
    #[serde(default)]
    pub html: Option<PathBuf>,
    /// Bins within this many dB of the peak count as occupied
    #[serde(default = "OutputConfig::default_occupied_below_db")]
    pub occupied_below_db: f64,
}

impl OutputConfig {
    fn default_occupied_below_db() -> f64 {
        30.0
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv: None,
            html: None,
            occupied_below_db: Self::default_occupied_below_db(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub welch: WelchConfig,
    #[serde(default)]
    pub spectrogram: SpectrogramConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| SpectraError::Config(err.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| SpectraError::Config(err.to_string()))
    }

    /// Read `path`, or fall back to defaults when it does not exist.
    ///
    /// A file that exists but fails to parse is an error rather than a
    /// silent fallback.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents).map_err(|err| match err {
            SpectraError::Config(msg) => SpectraError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }
}
