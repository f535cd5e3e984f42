pub mod awgn;
pub mod signal;
pub mod source;
pub mod tone;

pub use awgn::AWGN;
pub use signal::{sample_count, SignalGenerator, DEFAULT_NOISE_POWER};
pub use source::{ReplaySource, SampleSource};
pub use tone::Tone;
