//! DSP Benchmarks
//!
//! Performance benchmarks for the tone equalizer stages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tonekit::config::EqualizerConfig;
use tonekit::dsp::{analyze, equalize_bands, Band, SosFilter};
use tonekit::synth::{sine_wave, ToneParams};

fn benchmark_analysis(c: &mut Criterion) {
    let signal = sine_wave(&ToneParams::new(440.0, 0.5, 1.0, 44100)).unwrap();
    let config = EqualizerConfig::default();

    c.bench_function("analyze_1s_mono", |b| {
        b.iter(|| analyze(black_box(&signal), &config).unwrap())
    });
}

fn benchmark_filter_design(c: &mut Criterion) {
    let spec = EqualizerConfig::default().filter_spec(Band::Mid);

    c.bench_function("design_band_pass_order4", |b| {
        b.iter(|| SosFilter::design(black_box(&spec), 44100).unwrap())
    });
}

fn benchmark_equalizer(c: &mut Criterion) {
    let signal = sine_wave(&ToneParams::new(440.0, 0.5, 1.0, 44100)).unwrap();

    c.bench_function("equalize_bands_1s_mono", |b| {
        b.iter(|| equalize_bands(black_box(&signal)).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_analysis,
    benchmark_filter_design,
    benchmark_equalizer
);
criterion_main!(benches);
