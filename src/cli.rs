use std::path::PathBuf;

use clap::Parser;
use sdr_spectra::config::AppConfig;
use sdr_spectra::spectrum::{AveragingMethod, SpectrogramMethod, WindowType};

/// Simulate a noisy complex baseband capture and estimate its spectrum
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML (missing file means defaults)
    #[arg(long, default_value = "sdr-spectra.toml")]
    pub config: PathBuf,

    /// Tone frequencies in Hz, comma separated (e.g. 50,-120)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub tones: Option<Vec<f64>>,

    /// Capture length in seconds
    #[arg(long)]
    pub seconds: Option<f64>,

    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<f64>,

    /// Total complex noise power (linear)
    #[arg(long)]
    pub noise_power: Option<f64>,

    /// RNG seed for reproducible noise
    #[arg(long)]
    pub seed: Option<u64>,

    /// Zero-pad the FFT periodogram to this length
    #[arg(long)]
    pub nfft: Option<usize>,

    /// Welch window (rectangular, hann, hamming, blackman, flattop)
    #[arg(long)]
    pub window: Option<WindowType>,

    /// Welch segment length
    #[arg(long)]
    pub nperseg: Option<usize>,

    /// Welch segment overlap in samples
    #[arg(long)]
    pub noverlap: Option<usize>,

    /// Welch averaging (mean, median, max, min)
    #[arg(long)]
    pub averaging: Option<AveragingMethod>,

    /// One-sided Welch output (overrides config)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub onesided: Option<bool>,

    /// Also compute a spectrogram with frames of this many samples
    #[arg(long, value_name = "FRAME_LEN")]
    pub spectrogram: Option<usize>,

    /// Write estimates to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write an HTML plot to this file
    #[arg(long)]
    pub html: Option<PathBuf>,
}

impl Args {
    /// Apply command line overrides on top of the file config.
    pub fn apply(&self, cfg: &mut AppConfig) {
        let sim = &mut cfg.simulation;
        if let Some(tones) = &self.tones {
            sim.tones = tones.clone();
        }
        if let Some(seconds) = self.seconds {
            sim.seconds = seconds;
        }
        if let Some(fs) = self.sample_rate {
            sim.sample_rate_hz = fs;
        }
        if let Some(p) = self.noise_power {
            sim.noise_power = p;
        }
        if self.seed.is_some() {
            sim.seed = self.seed;
        }
        if self.nfft.is_some() {
            sim.nfft = self.nfft;
        }

        let welch = &mut cfg.welch;
        if let Some(window) = self.window {
            welch.window = window;
        }
        if let Some(nperseg) = self.nperseg {
            welch.nperseg = nperseg;
        }
        if self.noverlap.is_some() {
            welch.noverlap = self.noverlap;
        }
        if let Some(averaging) = self.averaging {
            welch.averaging = averaging;
        }
        if let Some(onesided) = self.onesided {
            welch.onesided = onesided;
        }

        if let Some(frame_len) = self.spectrogram {
            cfg.spectrogram.enabled = true;
            cfg.spectrogram.frame_len = frame_len;
            if let SpectrogramMethod::Periodogram { nfft } = &mut cfg.spectrogram.method {
                *nfft = nfft.filter(|&n| n >= frame_len);
            }
        }

        if self.csv.is_some() {
            cfg.output.csv = self.csv.clone();
        }
        if self.html.is_some() {
            cfg.output.html = self.html.clone();
        }
    }
}
