//! Equalizer configuration
//!
//! Band crossovers and filter order are plain values handed to each
//! component rather than process-wide constants. Loadable from JSON;
//! missing fields fall back to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dsp::{Band, BandRange, FilterSpec};
use crate::error::{Result, ToneError};

/// Low/mid crossover frequency in Hz
pub const DEFAULT_LOW_MID_CROSSOVER_HZ: f64 = 300.0;

/// Mid/high crossover frequency in Hz
pub const DEFAULT_MID_HIGH_CROSSOVER_HZ: f64 = 2000.0;

/// Butterworth order of every band filter
pub const DEFAULT_FILTER_ORDER: usize = 4;

/// Parameters of the three-band tone equalizer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EqualizerConfig {
    /// Upper edge of the low band / lower edge of the mid band
    pub low_mid_crossover_hz: f64,
    /// Upper edge of the mid band / lower edge of the high band
    pub mid_high_crossover_hz: f64,
    /// Filter order (even, at least 2)
    pub filter_order: usize,
}

impl Default for EqualizerConfig {
    fn default() -> Self {
        Self {
            low_mid_crossover_hz: DEFAULT_LOW_MID_CROSSOVER_HZ,
            mid_high_crossover_hz: DEFAULT_MID_HIGH_CROSSOVER_HZ,
            filter_order: DEFAULT_FILTER_ORDER,
        }
    }
}

impl EqualizerConfig {
    /// Load a configuration from a JSON file
    ///
    /// # Errors
    /// * `Io` - If the file cannot be read
    /// * `Config` - If the JSON is malformed
    /// * `InvalidFilterSpec` - If the values fail [`EqualizerConfig::validate`]
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: EqualizerConfig =
            serde_json::from_str(&text).map_err(|source| ToneError::Config {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check crossovers and order independently of any sample rate
    pub fn validate(&self) -> Result<()> {
        let low = self.low_mid_crossover_hz;
        let high = self.mid_high_crossover_hz;
        if !(low.is_finite() && high.is_finite() && low > 0.0 && low < high) {
            return Err(ToneError::invalid_filter(format!(
                "crossovers must satisfy 0 < {} < {}",
                low, high
            )));
        }
        if self.filter_order == 0 || self.filter_order % 2 != 0 {
            return Err(ToneError::invalid_filter(format!(
                "filter order must be even and positive, got {}",
                self.filter_order
            )));
        }
        Ok(())
    }

    /// Frequency range covered by `band` at `sample_rate`
    pub fn band_range(&self, band: Band, sample_rate: u32) -> BandRange {
        let nyquist = sample_rate as f64 / 2.0;
        match band {
            Band::Low => BandRange::new(0.0, self.low_mid_crossover_hz),
            Band::Mid => BandRange::new(self.low_mid_crossover_hz, self.mid_high_crossover_hz),
            Band::High => BandRange::new(self.mid_high_crossover_hz, nyquist),
        }
    }

    /// Filter isolating `band`
    pub fn filter_spec(&self, band: Band) -> FilterSpec {
        match band {
            Band::Low => FilterSpec::low_pass(self.low_mid_crossover_hz, self.filter_order),
            Band::Mid => FilterSpec::band_pass(
                self.low_mid_crossover_hz,
                self.mid_high_crossover_hz,
                self.filter_order,
            ),
            Band::High => FilterSpec::high_pass(self.mid_high_crossover_hz, self.filter_order),
        }
    }
}
