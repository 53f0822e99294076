//! Spectral band analyzer
//!
//! Runs a full complex FFT over the whole signal and sums `|X[k]|^2`
//! per band. Bins are labeled with the usual FFT frequency convention
//! (upper half of the spectrum is negative), and a bin counts toward a
//! band when the magnitude of its frequency falls in the band, so both
//! mirror halves contribute. Energies are not normalized by N.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::config::EqualizerConfig;
use crate::dsp::band::{Band, BandEnergies};
use crate::engine::Signal;
use crate::error::{Result, ToneError};

/// Shortest signal the analyzer accepts
pub const MIN_ANALYSIS_LEN: usize = 2;

/// Frequency label of FFT bin `k` out of `n` at `sample_rate`
///
/// Bins at or above `ceil(n / 2)` map to negative frequencies.
pub fn bin_frequency(k: usize, n: usize, sample_rate: u32) -> f64 {
    let bin_hz = sample_rate as f64 / n as f64;
    if k < n.div_ceil(2) {
        k as f64 * bin_hz
    } else {
        (k as f64 - n as f64) * bin_hz
    }
}

/// Measure the energy of `signal` in each band of `config`
///
/// # Errors
/// * `InvalidInput` - If the signal has fewer than two samples
pub fn analyze(signal: &Signal, config: &EqualizerConfig) -> Result<BandEnergies> {
    let n = signal.len();
    if n < MIN_ANALYSIS_LEN {
        return Err(ToneError::invalid_input(format!(
            "need at least {} samples for spectral analysis, got {}",
            MIN_ANALYSIS_LEN, n
        )));
    }

    let mut spectrum: Vec<Complex<f64>> = signal
        .samples()
        .iter()
        .map(|&s| Complex::new(s, 0.0))
        .collect();
    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(n).process(&mut spectrum);

    let sample_rate = signal.sample_rate();
    let ranges = Band::ALL.map(|band| config.band_range(band, sample_rate));
    let mut totals = [0.0_f64; 3];

    for (k, coeff) in spectrum.iter().enumerate() {
        let freq = bin_frequency(k, n, sample_rate).abs();
        if let Some(slot) = ranges.iter().position(|range| range.contains(freq)) {
            totals[slot] += coeff.norm_sqr();
        }
    }

    Ok(BandEnergies::new(totals[0], totals[1], totals[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn sine(frequency: f64, amplitude: f64, sample_rate: u32, len: usize) -> Signal {
        Signal::from_fn(len, sample_rate, |i| {
            amplitude * (2.0 * PI * frequency * i as f64 / sample_rate as f64).sin()
        })
        .unwrap()
    }

    #[test]
    fn test_bin_frequency_labels() {
        // Even length: bin n/2 is labeled -fs/2
        assert_eq!(bin_frequency(0, 8, 8000), 0.0);
        assert_eq!(bin_frequency(3, 8, 8000), 3000.0);
        assert_eq!(bin_frequency(4, 8, 8000), -4000.0);
        assert_eq!(bin_frequency(7, 8, 8000), -1000.0);

        // Odd length: positive half includes (n-1)/2
        assert_eq!(bin_frequency(2, 5, 5000), 2000.0);
        assert_eq!(bin_frequency(3, 5, 5000), -2000.0);
    }

    #[test]
    fn test_degenerate_lengths_rejected() {
        let config = EqualizerConfig::default();
        for len in [0, 1] {
            let signal = Signal::new(vec![0.5; len], 44100).unwrap();
            assert!(matches!(
                analyze(&signal, &config),
                Err(ToneError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_silence_has_no_energy() {
        let signal = Signal::new(vec![0.0; 1024], 44100).unwrap();
        let energies = analyze(&signal, &EqualizerConfig::default()).unwrap();
        assert_eq!(energies, BandEnergies::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_mirror_bins_both_counted() {
        // 1 s at an exact bin: |X[k]| = A*N/2 on each of the two mirror bins
        let signal = sine(1000.0, 0.5, 8000, 8000);
        let energies = analyze(&signal, &EqualizerConfig::default()).unwrap();

        let per_bin = (0.5 * 8000.0 / 2.0_f64).powi(2);
        assert_relative_eq!(energies.mid, 2.0 * per_bin, max_relative = 1e-9);
    }

    #[test]
    fn test_parseval_holds_without_dc_or_nyquist() {
        // Sum over all bins equals N * sum(x^2) when no bin is excluded
        let signal = sine(440.0, 0.3, 44100, 4410);
        let energies = analyze(&signal, &EqualizerConfig::default()).unwrap();
        let time_energy: f64 = signal.samples().iter().map(|s| s * s).sum();

        assert_relative_eq!(
            energies.total(),
            signal.len() as f64 * time_energy,
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_each_band_isolated() {
        let config = EqualizerConfig::default();
        for (frequency, band) in [(100.0, Band::Low), (1000.0, Band::Mid), (5000.0, Band::High)] {
            let energies = analyze(&sine(frequency, 0.5, 44100, 44100), &config).unwrap();
            assert!(
                energies.fraction(band) > 0.999_999,
                "{} Hz should land in the {} band: {:?}",
                frequency,
                band.name(),
                energies
            );
        }
    }
}
