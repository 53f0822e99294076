//! Three-band filter bank
//!
//! Each band is an independent transform of the whole input: filter,
//! then scale. The bands never share state; the equalized signal is the
//! sample-wise sum of the three results.

use crate::config::EqualizerConfig;
use crate::dsp::band::{Band, BandGains};
use crate::dsp::filter::{FilterSpec, SosFilter};
use crate::engine::Signal;
use crate::error::Result;

/// Filter `signal` through `spec` and scale the result by `gain`
///
/// # Errors
/// * `InvalidFilterSpec` - If `spec` cannot be realized at the signal's rate
pub fn apply_band(signal: &Signal, spec: &FilterSpec, gain: f64) -> Result<Signal> {
    let filter = SosFilter::design(spec, signal.sample_rate())?;
    Ok(filter.apply(signal)?.scaled(gain))
}

/// Split `signal` into the configured bands, scale each, and sum
///
/// The output has the same length and sample rate as the input.
pub fn equalize(signal: &Signal, gains: &BandGains, config: &EqualizerConfig) -> Result<Signal> {
    BandFilterBank::new(config, signal.sample_rate())?.equalize(signal, gains)
}

/// The three band filters designed for one sample rate
#[derive(Debug, Clone)]
pub struct BandFilterBank {
    low: SosFilter,
    mid: SosFilter,
    high: SosFilter,
}

impl BandFilterBank {
    /// Design every band filter of `config` at `sample_rate`
    ///
    /// # Errors
    /// * `InvalidFilterSpec` - If any crossover is not below Nyquist
    pub fn new(config: &EqualizerConfig, sample_rate: u32) -> Result<Self> {
        let design = |band| SosFilter::design(&config.filter_spec(band), sample_rate);
        Ok(Self {
            low: design(Band::Low)?,
            mid: design(Band::Mid)?,
            high: design(Band::High)?,
        })
    }

    pub fn filter(&self, band: Band) -> &SosFilter {
        match band {
            Band::Low => &self.low,
            Band::Mid => &self.mid,
            Band::High => &self.high,
        }
    }

    /// The part of `signal` in `band`, scaled by `gain`
    ///
    /// # Errors
    /// * `ChannelMismatch` - If the signal's rate differs from the bank's
    pub fn isolate(&self, signal: &Signal, band: Band, gain: f64) -> Result<Signal> {
        Ok(self.filter(band).apply(signal)?.scaled(gain))
    }

    /// Sum of every band of `signal`, each scaled by its gain
    pub fn equalize(&self, signal: &Signal, gains: &BandGains) -> Result<Signal> {
        let low = self.isolate(signal, Band::Low, gains.low)?;
        let mid = self.isolate(signal, Band::Mid, gains.mid)?;
        let high = self.isolate(signal, Band::High, gains.high)?;
        low.mix(&mid)?.mix(&high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToneError;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn sine(frequency: f64, sample_rate: u32, secs: f64) -> Signal {
        let len = (secs * sample_rate as f64) as usize;
        Signal::from_fn(len, sample_rate, |i| {
            (2.0 * PI * frequency * i as f64 / sample_rate as f64).sin()
        })
        .unwrap()
    }

    #[test]
    fn test_length_preserved() {
        let signal = sine(440.0, 44100, 0.25);
        let config = EqualizerConfig::default();

        for gains in [
            BandGains::unity(),
            BandGains::new(0.0, 0.0, 0.0),
            BandGains::new(3.5, 0.2, 12.0),
        ] {
            let output = equalize(&signal, &gains, &config).unwrap();
            assert_eq!(output.len(), signal.len());
            assert_eq!(output.sample_rate(), signal.sample_rate());
        }
    }

    #[test]
    fn test_equalize_is_sum_of_bands() {
        let signal = sine(1500.0, 22050, 0.1);
        let config = EqualizerConfig::default();
        let gains = BandGains::new(0.5, 2.0, 1.5);

        let summed = equalize(&signal, &gains, &config).unwrap();
        let parts: Vec<Signal> = Band::ALL
            .iter()
            .map(|&band| apply_band(&signal, &config.filter_spec(band), gains.get(band)).unwrap())
            .collect();

        for i in 0..signal.len() {
            let expected = parts[0].samples()[i] + parts[1].samples()[i] + parts[2].samples()[i];
            assert_relative_eq!(summed.samples()[i], expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_gain_mutes_band() {
        let signal = sine(440.0, 44100, 0.1);
        let spec = FilterSpec::band_pass(300.0, 2000.0, 4);
        let muted = apply_band(&signal, &spec, 0.0).unwrap();
        assert!(muted.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_high_band_attenuates_low_tone() {
        let signal = sine(150.0, 44100, 1.0);
        let bank = BandFilterBank::new(&EqualizerConfig::default(), 44100).unwrap();

        // Skip the start-up transient
        let settled = signal.len() / 2..signal.len();
        let low = bank.isolate(&signal, Band::Low, 1.0).unwrap().slice(settled.clone()).unwrap();
        let high = bank.isolate(&signal, Band::High, 1.0).unwrap().slice(settled).unwrap();

        let attenuation_db = 20.0 * (low.rms() / high.rms()).log10();
        assert!(
            attenuation_db >= 40.0,
            "High band should sit 40 dB under the low band, got {:.1} dB",
            attenuation_db
        );
    }

    #[test]
    fn test_crossover_above_nyquist_fails() {
        let signal = sine(100.0, 3000, 0.5);
        let result = equalize(&signal, &BandGains::unity(), &EqualizerConfig::default());
        assert!(matches!(result, Err(ToneError::InvalidFilterSpec { .. })));
    }

    #[test]
    fn test_bank_rejects_other_rates() {
        let bank = BandFilterBank::new(&EqualizerConfig::default(), 44100).unwrap();
        let signal = sine(440.0, 48000, 0.1);
        assert!(matches!(
            bank.equalize(&signal, &BandGains::unity()),
            Err(ToneError::ChannelMismatch { .. })
        ));
    }
}
