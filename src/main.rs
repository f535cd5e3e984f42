// Entry point: simulate a capture, estimate its spectrum, report and export.
mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use sdr_spectra::config::AppConfig;
use sdr_spectra::error::Result;
use sdr_spectra::generate::SampleSource;
use sdr_spectra::plot;
use sdr_spectra::report::{self, Summary};
use sdr_spectra::samples::SampleBuffer;
use sdr_spectra::spectrum::{periodogram, welch, PsdEstimate, Spectrogram};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn log_summary(name: &str, est: &PsdEstimate<f64>, below_peak_db: f64) {
    match Summary::of(est, below_peak_db) {
        Some(s) => info!(
            estimator = name,
            bins = est.len(),
            peak_hz = s.peak_hz,
            peak_db = s.peak_db,
            floor_db = s.floor_db,
            occupied_hz = s.occupied_hz,
            "estimate"
        ),
        None => warn!(estimator = name, "empty estimate"),
    }
    if est.ensure_finite().is_err() {
        warn!(estimator = name, "estimate holds zero-power bins (-inf dB)");
    }
}

fn spectrogram_path(html: &Path) -> PathBuf {
    let stem = html
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "spectrum".to_string());
    html.with_file_name(format!("{stem}-spectrogram.html"))
}

fn run(cfg: &AppConfig) -> Result<()> {
    let mut source = cfg.simulation.generator()?;
    let buffer: SampleBuffer<f64> = source.capture()?;
    info!(
        samples = buffer.len(),
        sample_rate_hz = buffer.sample_rate(),
        tones = ?cfg.simulation.tones,
        "captured"
    );

    let fft = periodogram(&buffer, cfg.simulation.nfft)?;
    let welch_est = welch(&buffer, &cfg.welch)?;
    let below = cfg.output.occupied_below_db;
    log_summary("fft", &fft, below);
    log_summary("welch", &welch_est, below);

    let spectrogram = if cfg.spectrogram.enabled {
        let spec = Spectrogram::compute(&buffer, cfg.spectrogram.frame_len, &cfg.spectrogram.method)?;
        info!(frames = spec.num_frames(), bins = spec.frequencies().len(), "spectrogram");
        Some(spec)
    } else {
        None
    };

    let estimates = [("fft", &fft), ("welch", &welch_est)];
    if let Some(path) = &cfg.output.csv {
        report::write_csv_file(path, &estimates)?;
        info!(path = %path.display(), "wrote csv");
    }
    if let Some(path) = &cfg.output.html {
        let title = format!("FFT vs Welch ({} window, nperseg {})", cfg.welch.window, cfg.welch.nperseg);
        plot::write_html(&plot::spectrum_plot(&estimates, &title), path)?;
        info!(path = %path.display(), "wrote plot");
        if let Some(spec) = &spectrogram {
            let spec_path = spectrogram_path(path);
            plot::write_html(&plot::spectrogram_plot(spec, "Spectrogram"), &spec_path)?;
            info!(path = %spec_path.display(), "wrote spectrogram plot");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args = cli::Args::parse();

    let mut cfg = match AppConfig::load_or_default(&args.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(%err, "failed to load config");
            return ExitCode::FAILURE;
        }
    };
    args.apply(&mut cfg);

    match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "sdr-spectra failed");
            ExitCode::FAILURE
        }
    }
}
