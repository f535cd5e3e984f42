use crate::error::{Result, SpectraError};
use crate::fft::{cast, Real};
use crate::vector_ops;

/// A power spectral density estimate ready for display.
///
/// `frequencies`, `density` (linear) and `power_db` always have the same
/// length and run in increasing frequency order. Zero-power bins read
/// `-inf` dB; use [`PsdEstimate::ensure_finite`] to turn that into an error.
#[derive(Debug, Clone, PartialEq)]
pub struct PsdEstimate<T> {
    frequencies: Vec<T>,
    density: Vec<T>,
    power_db: Vec<T>,
    onesided: bool,
}

impl<T: Real> PsdEstimate<T> {
    pub(crate) fn new(frequencies: Vec<T>, density: Vec<T>, onesided: bool) -> Self {
        debug_assert_eq!(frequencies.len(), density.len());
        let power_db = vector_ops::to_db(&density);
        PsdEstimate {
            frequencies,
            density,
            power_db,
            onesided,
        }
    }

    /// Frequency of each bin in Hz.
    pub fn frequencies(&self) -> &[T] {
        &self.frequencies
    }

    /// Linear power per bin.
    pub fn density(&self) -> &[T] {
        &self.density
    }

    /// `10*log10(density)` per bin.
    pub fn power_db(&self) -> &[T] {
        &self.power_db
    }

    pub fn is_onesided(&self) -> bool {
        self.onesided
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// `(frequency, dB)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.power_db.iter().copied())
    }

    /// Spacing between adjacent bins in Hz (0 for a single-bin estimate).
    pub fn bin_width(&self) -> T {
        if self.frequencies.len() < 2 {
            return T::zero();
        }
        self.frequencies[1] - self.frequencies[0]
    }

    /// Frequency and level of the strongest bin.
    pub fn peak(&self) -> Option<(T, T)> {
        if self.is_empty() {
            return None;
        }
        let (idx, db) = vector_ops::max(&self.power_db);
        Some((self.frequencies[idx], db))
    }

    /// Median dB level across all bins, a robust noise-floor reading.
    pub fn median_db(&self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let mut sorted = self.power_db.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some((sorted[mid - 1] + sorted[mid]) / cast::<T, _>(2.0))
        } else {
            Some(sorted[mid])
        }
    }

    /// Sum of linear bin values.
    pub fn total(&self) -> T {
        self.density.iter().fold(T::zero(), |acc, &p| acc + p)
    }

    /// Indices of bins within `below_peak_db` of the peak level.
    pub fn occupied_bins(&self, below_peak_db: T) -> Vec<usize> {
        let Some((_, peak_db)) = self.peak() else {
            return vec![];
        };
        let threshold = peak_db - below_peak_db;
        self.power_db
            .iter()
            .enumerate()
            .filter(|(_, db)| **db >= threshold)
            .map(|(i, _)| i)
            .collect()
    }

    /// Fail with [`SpectraError::Domain`] at the first bin whose dB value
    /// is not finite.
    pub fn ensure_finite(&self) -> Result<&Self> {
        match self.power_db.iter().position(|db| !db.is_finite()) {
            Some(index) => Err(SpectraError::Domain {
                index,
                frequency: self.frequencies[index].to_f64().unwrap_or(f64::NAN),
            }),
            None => Ok(self),
        }
    }
}
