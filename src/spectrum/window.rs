use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpectraError;
use crate::fft::{cast, Real};

/// Window function types for spectral analysis
///
/// Parsed case-insensitively from the usual names (`"hamming"`,
/// `"flattop"`, `"boxcar"`, ...), which is also how they appear in config
/// files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WindowType {
    /// Rectangular window (no windowing)
    Rectangular,
    /// Hann window (raised cosine)
    Hann,
    /// Hamming window (modified raised cosine)
    Hamming,
    /// Blackman window (three-term cosine)
    Blackman,
    /// Flat-top window (five-term cosine, accurate tone amplitudes)
    FlatTop,
}

impl WindowType {
    pub const ALL: [WindowType; 5] = [
        WindowType::Rectangular,
        WindowType::Hann,
        WindowType::Hamming,
        WindowType::Blackman,
        WindowType::FlatTop,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Rectangular => "rectangular",
            WindowType::Hann => "hann",
            WindowType::Hamming => "hamming",
            WindowType::Blackman => "blackman",
            WindowType::FlatTop => "flattop",
        }
    }

    /// Coefficients `a_k` of `w[n] = sum_k (-1)^k a_k cos(2*pi*k*n / (N-1))`.
    fn cosine_coefficients(&self) -> &'static [f64] {
        match self {
            WindowType::Rectangular => &[1.0],
            WindowType::Hann => &[0.5, 0.5],
            WindowType::Hamming => &[0.54, 0.46],
            WindowType::Blackman => &[0.42, 0.5, 0.08],
            WindowType::FlatTop => &[
                0.21557895,
                0.41663158,
                0.277263158,
                0.083578947,
                0.006947368,
            ],
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowType {
    type Err = SpectraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangular" | "rect" | "boxcar" | "none" => Ok(WindowType::Rectangular),
            "hann" | "hanning" => Ok(WindowType::Hann),
            "hamming" => Ok(WindowType::Hamming),
            "blackman" => Ok(WindowType::Blackman),
            "flattop" | "flat-top" | "flat_top" => Ok(WindowType::FlatTop),
            other => Err(SpectraError::invalid(
                "window",
                format!("unrecognised window function `{}`", other),
            )),
        }
    }
}

impl TryFrom<String> for WindowType {
    type Error = SpectraError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WindowType> for String {
    fn from(w: WindowType) -> String {
        w.name().to_string()
    }
}

/// Generate a symmetric window of the specified type and size
///
/// Symmetric windows are what filter design wants; for spectral estimation
/// use [`generate_periodic_window`].
pub fn generate_window<T: Real>(window_type: WindowType, size: usize) -> Vec<T> {
    match size {
        0 => vec![],
        1 => vec![T::one()],
        _ => cosine_sum(window_type.cosine_coefficients(), size, size - 1),
    }
}

/// Generate a periodic (DFT-even) window: the first `size` points of a
/// symmetric window of `size + 1` points.
pub fn generate_periodic_window<T: Real>(window_type: WindowType, size: usize) -> Vec<T> {
    match size {
        0 => vec![],
        1 => vec![T::one()],
        _ => cosine_sum(window_type.cosine_coefficients(), size, size),
    }
}

fn cosine_sum<T: Real>(coeffs: &[f64], size: usize, denom: usize) -> Vec<T> {
    let denom = denom as f64;
    (0..size)
        .map(|n| {
            let x = 2.0 * PI * n as f64 / denom;
            let w = coeffs
                .iter()
                .enumerate()
                .fold(0.0, |acc, (k, &a)| {
                    let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                    acc + sign * a * (k as f64 * x).cos()
                });
            cast::<T, _>(w)
        })
        .collect()
}

/// Calculate the energy (sum of squares) of a window
pub fn window_energy<T: Real>(window: &[T]) -> T {
    window.iter().fold(T::zero(), |acc, &w| acc + w * w)
}

/// Calculate the sum of window coefficients
pub fn window_sum<T: Real>(window: &[T]) -> T {
    window.iter().fold(T::zero(), |acc, &w| acc + w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::env;

    #[test]
    fn test_window_properties() {
        let size = 256;

        let rect: Vec<f64> = generate_window(WindowType::Rectangular, size);
        assert_eq!(rect.len(), size);
        assert!(rect.iter().all(|&w| (w - 1.0).abs() < 1e-12));

        let hann: Vec<f64> = generate_window(WindowType::Hann, size);
        assert!(hann[0].abs() < 1e-10, "Hann window should start near 0");
        assert!(hann[size - 1].abs() < 1e-10, "Hann window should end near 0");
        assert!(hann[size / 2] > 0.99, "Hann window peak should be near 1");

        let hamming: Vec<f64> = generate_window(WindowType::Hamming, size);
        assert!((hamming[0] - 0.08).abs() < 0.01, "Hamming window should start near 0.08");
        assert!(hamming[size / 2] > 0.99, "Hamming window peak should be near 1");

        let blackman: Vec<f64> = generate_window(WindowType::Blackman, size);
        assert!(blackman[0].abs() < 0.01, "Blackman window should start near 0");
        assert!(blackman[size - 1].abs() < 0.01, "Blackman window should end near 0");

        let flattop: Vec<f64> = generate_window(WindowType::FlatTop, 257);
        assert_abs_diff_eq!(flattop[128], 1.0, epsilon = 1e-6);
        assert!(flattop.iter().any(|&w| w < 0.0), "flat-top dips below zero");
    }

    #[test]
    fn test_symmetric_windows_are_symmetric() {
        for wt in WindowType::ALL {
            let w: Vec<f64> = generate_window(wt, 33);
            for i in 0..w.len() {
                assert_abs_diff_eq!(w[i], w[w.len() - 1 - i], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_periodic_window_is_truncated_symmetric() {
        for wt in WindowType::ALL {
            let periodic: Vec<f64> = generate_periodic_window(wt, 64);
            let symmetric: Vec<f64> = generate_window(wt, 65);
            assert_eq!(periodic.len(), 64);
            for i in 0..64 {
                assert_abs_diff_eq!(periodic[i], symmetric[i], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_window_energy_sum() {
        let size = 128;

        let rect: Vec<f64> = generate_window(WindowType::Rectangular, size);
        assert_abs_diff_eq!(window_energy(&rect), size as f64, epsilon = 1e-10);
        assert_abs_diff_eq!(window_sum(&rect), size as f64, epsilon = 1e-10);

        // Periodic Hann: sum is exactly N/2, energy exactly 3N/8
        let hann: Vec<f64> = generate_periodic_window(WindowType::Hann, size);
        assert_abs_diff_eq!(window_sum(&hann), size as f64 / 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(window_energy(&hann), 3.0 * size as f64 / 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(generate_window::<f64>(WindowType::Hann, 0).is_empty());
        assert_eq!(generate_window::<f64>(WindowType::Hann, 1), vec![1.0]);
        assert_eq!(generate_periodic_window::<f32>(WindowType::Blackman, 1), vec![1.0]);
    }

    #[test]
    fn test_parse_window_names() {
        assert_eq!("hamming".parse::<WindowType>().unwrap(), WindowType::Hamming);
        assert_eq!("FlatTop".parse::<WindowType>().unwrap(), WindowType::FlatTop);
        assert_eq!("flat-top".parse::<WindowType>().unwrap(), WindowType::FlatTop);
        assert_eq!("boxcar".parse::<WindowType>().unwrap(), WindowType::Rectangular);
        assert_eq!(" hanning ".parse::<WindowType>().unwrap(), WindowType::Hann);
        for wt in WindowType::ALL {
            assert_eq!(wt.to_string().parse::<WindowType>().unwrap(), wt);
        }
    }

    #[test]
    fn test_unknown_window_is_invalid_parameter() {
        let err = "kaiser-bessel".parse::<WindowType>().unwrap_err();
        assert!(matches!(err, SpectraError::InvalidParameter { name: "window", .. }));
    }

    #[test]
    fn test_window_shapes() {
        let plot = env::var("TEST_PLOT").unwrap_or_else(|_| "false".to_string());
        if plot.to_lowercase() != "true" {
            println!("Skipping window shapes plot (set TEST_PLOT=true to enable)");
            return;
        }

        use plotly::common::Mode;
        use plotly::layout::{Axis, Layout};
        use plotly::{Plot, Scatter};

        let size = 256;
        let indices: Vec<f64> = (0..size).map(|i| i as f64).collect();

        let mut plot = Plot::new();
        for wt in WindowType::ALL {
            let w: Vec<f64> = generate_window(wt, size);
            plot.add_trace(Scatter::new(indices.clone(), w).mode(Mode::Lines).name(wt.name()));
        }
        plot.set_layout(
            Layout::new()
                .title("Window Function Comparison")
                .x_axis(Axis::new().title("Sample Index"))
                .y_axis(Axis::new().title("Amplitude"))
                .auto_size(true),
        );
        plot.show();
    }
}
