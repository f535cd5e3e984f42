use std::fs;
use std::path::Path;

use plotly::common::Mode;
use plotly::layout::Axis;
use plotly::{HeatMap, Layout, Plot, Scatter};

use crate::error::Result;
use crate::fft::Real;
use crate::spectrum::{PsdEstimate, Spectrogram};

fn to_f64<T: Real>(values: &[T]) -> Vec<f64> {
    values.iter().map(|v| v.to_f64().unwrap_or(f64::NAN)).collect()
}

/// Overlay one or more estimates as frequency vs dB traces
///
/// # Arguments
/// * `traces` - `(legend name, estimate)` pairs
/// * `title` - Title for the plot
pub fn spectrum_plot<T: Real>(traces: &[(&str, &PsdEstimate<T>)], title: &str) -> Plot {
    let mut plot = Plot::new();
    for (name, est) in traces {
        let trace = Scatter::new(to_f64(est.frequencies()), to_f64(est.power_db()))
            .mode(Mode::Lines)
            .name(*name);
        plot.add_trace(trace);
    }

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Frequency (Hz)"))
        .y_axis(Axis::new().title("Magnitude (dB)"))
        .auto_size(true);
    plot.set_layout(layout);
    plot
}

/// Heat map of a spectrogram, time on the y axis
pub fn spectrogram_plot<T: Real>(spectrogram: &Spectrogram<T>, title: &str) -> Plot {
    let z: Vec<Vec<f64>> = spectrogram.rows().iter().map(|row| to_f64(row)).collect();
    let heatmap = HeatMap::new(
        to_f64(spectrogram.frequencies()),
        to_f64(spectrogram.frame_times()),
        z,
    );

    let mut plot = Plot::new();
    plot.add_trace(heatmap);
    plot.set_layout(
        Layout::new()
            .title(title)
            .x_axis(Axis::new().title("Frequency (Hz)"))
            .y_axis(Axis::new().title("Time (s)"))
            .auto_size(true),
    );
    plot
}

/// Write a standalone HTML page for `plot`.
pub fn write_html(plot: &Plot, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, plot.to_html())?;
    Ok(())
}
