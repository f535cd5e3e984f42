pub mod estimate;
pub mod periodogram;
pub mod spectrogram;
pub mod welch;
pub mod window;

pub use estimate::PsdEstimate;
pub use periodogram::periodogram;
pub use spectrogram::{Spectrogram, SpectrogramMethod};
pub use welch::{median_bias, welch, AveragingMethod, Detrend, FrequencyAxis, Scaling, WelchConfig};
pub use window::{generate_periodic_window, generate_window, window_energy, window_sum, WindowType};
