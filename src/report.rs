//! Plain-data views of estimates for logging and CSV export

use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::fft::Real;
use crate::spectrum::PsdEstimate;

/// Headline numbers for one estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub peak_hz: f64,
    pub peak_db: f64,
    /// Median dB level, a robust noise-floor reading
    pub floor_db: f64,
    /// Bins within the occupancy threshold of the peak
    pub occupied_bins: usize,
    /// Occupied bins times bin width
    pub occupied_hz: f64,
}

impl Summary {
    pub fn of<T: Real>(estimate: &PsdEstimate<T>, below_peak_db: f64) -> Option<Self> {
        let (peak_hz, peak_db) = estimate.peak()?;
        let floor_db = estimate.median_db()?;
        let below: T = crate::fft::cast(below_peak_db);
        let occupied_bins = estimate.occupied_bins(below).len();
        let bin_width = estimate.bin_width().to_f64().unwrap_or(0.0);
        Some(Summary {
            peak_hz: peak_hz.to_f64().unwrap_or(f64::NAN),
            peak_db: peak_db.to_f64().unwrap_or(f64::NAN),
            floor_db: floor_db.to_f64().unwrap_or(f64::NAN),
            occupied_bins,
            occupied_hz: occupied_bins as f64 * bin_width,
        })
    }
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    estimator: &'a str,
    frequency_hz: f64,
    density: f64,
    power_db: f64,
}

/// Write `estimator,frequency_hz,density,power_db` rows for every bin of
/// every named estimate.
pub fn write_csv<T: Real, W: io::Write>(writer: W, estimates: &[(&str, &PsdEstimate<T>)]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (name, est) in estimates {
        for ((f, p), db) in est
            .frequencies()
            .iter()
            .zip(est.density())
            .zip(est.power_db())
        {
            wtr.serialize(Row {
                estimator: name,
                frequency_hz: f.to_f64().unwrap_or(f64::NAN),
                density: p.to_f64().unwrap_or(f64::NAN),
                power_db: db.to_f64().unwrap_or(f64::NAN),
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file<T: Real>(path: impl AsRef<Path>, estimates: &[(&str, &PsdEstimate<T>)]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(io::BufWriter::new(file), estimates)
}
