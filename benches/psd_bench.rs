//! Benchmarks for the PSD estimators.
//!
//! Run:
//! - cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sdr_spectra::samples::SampleBuffer;
use sdr_spectra::spectrum::{periodogram, welch, AveragingMethod, WelchConfig, WindowType};
use sdr_spectra::SignalGenerator;

const FS: f64 = 1_000_000.0;
const CAPTURE_LENS: [usize; 3] = [4_096, 65_536, 1_048_576];
const NPERSEG_LENS: [usize; 3] = [256, 1024, 4096];

fn capture(len: usize) -> SampleBuffer<f64> {
    let seconds = len as f64 / FS;
    SignalGenerator::new_from_seed(&[125_000.0, -40_000.0], seconds, FS, 2.0, 7)
        .unwrap()
        .generate()
        .unwrap()
}

fn bench_periodogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("periodogram");
    group.sample_size(20);
    for &len in &CAPTURE_LENS {
        let buf = capture(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &buf, |b, buf| {
            b.iter(|| periodogram(black_box(buf), None).unwrap())
        });
    }
    group.finish();
}

fn bench_welch(c: &mut Criterion) {
    let buf = capture(CAPTURE_LENS[2]);
    let mut group = c.benchmark_group("welch");
    group.sample_size(20);
    for averaging in [AveragingMethod::Mean, AveragingMethod::Median] {
        for &nperseg in &NPERSEG_LENS {
            let cfg = WelchConfig {
                averaging,
                ..WelchConfig::new(WindowType::Hann, nperseg)
            };
            let id = BenchmarkId::new(averaging.name(), nperseg);
            group.bench_with_input(id, &cfg, |b, cfg| {
                b.iter(|| welch(black_box(&buf), cfg).unwrap())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_periodogram, bench_welch);
criterion_main!(benches);
