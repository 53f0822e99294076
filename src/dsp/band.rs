//! Frequency bands and per-band values
//!
//! The equalizer always works on exactly three contiguous bands. Values
//! derived per band (energies, gains) are small `Copy` structs indexed by
//! [`Band`].

use serde::{Deserialize, Serialize};

/// One of the three equalizer bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    /// All bands, lowest first
    pub const ALL: [Band; 3] = [Band::Low, Band::Mid, Band::High];

    pub fn name(&self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Mid => "mid",
            Band::High => "high",
        }
    }
}

/// Half-open frequency interval `[low_hz, high_hz)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandRange {
    pub low_hz: f64,
    pub high_hz: f64,
}

impl BandRange {
    pub fn new(low_hz: f64, high_hz: f64) -> Self {
        Self { low_hz, high_hz }
    }

    /// Whether `freq_hz` falls inside the interval
    pub fn contains(&self, freq_hz: f64) -> bool {
        freq_hz >= self.low_hz && freq_hz < self.high_hz
    }
}

/// Spectral energy found in each band
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BandEnergies {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl BandEnergies {
    pub fn new(low: f64, mid: f64, high: f64) -> Self {
        Self { low, mid, high }
    }

    pub fn get(&self, band: Band) -> f64 {
        match band {
            Band::Low => self.low,
            Band::Mid => self.mid,
            Band::High => self.high,
        }
    }

    pub fn total(&self) -> f64 {
        self.low + self.mid + self.high
    }

    /// Share of the total energy held by `band` (0.0 when the total is zero)
    pub fn fraction(&self, band: Band) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.get(band) / total
        } else {
            0.0
        }
    }
}

/// Linear gain applied to each band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandGains {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl Default for BandGains {
    fn default() -> Self {
        Self::unity()
    }
}

impl BandGains {
    pub fn new(low: f64, mid: f64, high: f64) -> Self {
        Self { low, mid, high }
    }

    /// 1.0 on every band
    pub fn unity() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// 1.0 for kept bands, 0.0 for dropped ones
    pub fn from_mask(mask: BandMask) -> Self {
        let gain = |keep: bool| if keep { 1.0 } else { 0.0 };
        Self::new(gain(mask.low), gain(mask.mid), gain(mask.high))
    }

    pub fn get(&self, band: Band) -> f64 {
        match band {
            Band::Low => self.low,
            Band::Mid => self.mid,
            Band::High => self.high,
        }
    }
}

/// Which bands survive a band-drop pass (`true` = keep)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandMask {
    pub low: bool,
    pub mid: bool,
    pub high: bool,
}

impl Default for BandMask {
    fn default() -> Self {
        Self::keep_all()
    }
}

impl BandMask {
    pub fn keep_all() -> Self {
        Self {
            low: true,
            mid: true,
            high: true,
        }
    }

    /// Keep everything except the bands flagged for dropping
    pub fn dropping(drop_low: bool, drop_mid: bool, drop_high: bool) -> Self {
        Self {
            low: !drop_low,
            mid: !drop_mid,
            high: !drop_high,
        }
    }

    pub fn keeps(&self, band: Band) -> bool {
        match band {
            Band::Low => self.low,
            Band::Mid => self.mid,
            Band::High => self.high,
        }
    }
}
