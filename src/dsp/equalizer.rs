//! Tone equalizer driver
//!
//! Wires the analyzer, the gain solver and the filter bank together.
//! Two entry points share the filter bank:
//! - [`ToneEqualizer::equalize_bands`] balances band energies
//! - [`ToneEqualizer::drop_bands`] mutes selected bands without analysis

use serde::Serialize;

use crate::config::EqualizerConfig;
use crate::dsp::analyzer::analyze;
use crate::dsp::band::{BandEnergies, BandGains, BandMask};
use crate::dsp::filter_bank::BandFilterBank;
use crate::dsp::solver::solve_gains;
use crate::engine::Signal;
use crate::error::Result;

/// What the analysis stage found and which gains it chose
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EqualizationReport {
    pub sample_rate: u32,
    pub energies: BandEnergies,
    pub gains: BandGains,
}

/// Three-band energy-balancing equalizer
#[derive(Debug, Clone, Copy, Default)]
pub struct ToneEqualizer {
    config: EqualizerConfig,
}

impl ToneEqualizer {
    pub fn new(config: EqualizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EqualizerConfig {
        &self.config
    }

    /// Band energies of `signal` and the gains that would balance them
    ///
    /// # Errors
    /// * `InvalidInput` - If the signal is shorter than two samples
    pub fn report(&self, signal: &Signal) -> Result<EqualizationReport> {
        let energies = analyze(signal, &self.config)?;
        Ok(EqualizationReport {
            sample_rate: signal.sample_rate(),
            energies,
            gains: solve_gains(&energies),
        })
    }

    /// Balance the energy of the three bands of `signal`
    ///
    /// # Errors
    /// * `InvalidInput` - If the signal is shorter than two samples
    /// * `InvalidFilterSpec` - If a crossover is not below Nyquist
    pub fn equalize_bands(&self, signal: &Signal) -> Result<Signal> {
        let report = self.report(signal)?;
        self.apply_gains(signal, &report.gains)
    }

    /// Run the filter bank with caller-chosen gains
    pub fn apply_gains(&self, signal: &Signal, gains: &BandGains) -> Result<Signal> {
        BandFilterBank::new(&self.config, signal.sample_rate())?.equalize(signal, gains)
    }

    /// Mute the bands `mask` does not keep; kept bands pass at unity gain
    ///
    /// The remaining bands are not rebalanced.
    pub fn drop_bands(&self, signal: &Signal, mask: BandMask) -> Result<Signal> {
        self.apply_gains(signal, &BandGains::from_mask(mask))
    }
}

/// Balance band energies with the default configuration
pub fn equalize_bands(signal: &Signal) -> Result<Signal> {
    ToneEqualizer::default().equalize_bands(signal)
}
