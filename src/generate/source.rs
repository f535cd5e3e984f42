use crate::error::Result;
use crate::fft::{cast, Real};
use crate::generate::signal::SignalGenerator;
use crate::samples::SampleBuffer;

/// Anything that can hand over a finite, already-captured block of IQ
/// samples: a simulator here, a radio front-end elsewhere.
///
/// Estimators only ever see the returned [`SampleBuffer`]; tuning, gain and
/// buffering stay on the implementor's side.
pub trait SampleSource<T: Real> {
    /// Rate the captures are sampled at, in Hz.
    fn sample_rate(&self) -> T;

    /// Pull one capture.
    fn capture(&mut self) -> Result<SampleBuffer<T>>;
}

impl<T: Real> SampleSource<T> for SignalGenerator {
    fn sample_rate(&self) -> T {
        cast::<T, _>(self.sample_rate_hz())
    }

    fn capture(&mut self) -> Result<SampleBuffer<T>> {
        self.generate::<T>()
    }
}

/// Replays a fixed capture, e.g. samples loaded from disk.
pub struct ReplaySource<T> {
    buffer: SampleBuffer<T>,
}

impl<T: Real> ReplaySource<T> {
    pub fn new(buffer: SampleBuffer<T>) -> Self {
        ReplaySource { buffer }
    }
}

impl<T: Real> SampleSource<T> for ReplaySource<T> {
    fn sample_rate(&self) -> T {
        self.buffer.sample_rate()
    }

    fn capture(&mut self) -> Result<SampleBuffer<T>> {
        Ok(self.buffer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    fn mean_capture_power<S: SampleSource<f64>>(source: &mut S, captures: usize) -> f64 {
        let total: f64 = (0..captures)
            .map(|_| source.capture().unwrap().mean_power())
            .sum();
        total / captures as f64
    }

    #[test]
    fn test_generator_as_source() {
        let mut gen = SignalGenerator::new_from_seed(&[10.0], 1.0, 1000.0, 0.0, 1).unwrap();
        assert_eq!(SampleSource::<f64>::sample_rate(&gen), 1000.0);
        let p = mean_capture_power(&mut gen, 3);
        assert!((p - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_replay_source() {
        let buf = SampleBuffer::new(vec![Complex::new(2.0, 0.0); 8], 48_000.0).unwrap();
        let mut replay = ReplaySource::new(buf.clone());
        assert_eq!(replay.sample_rate(), 48_000.0);
        assert_eq!(replay.capture().unwrap(), buf);
        assert_eq!(mean_capture_power(&mut replay, 2), 4.0);
    }
}
