//! Gain solver
//!
//! Picks one linear gain per band so that every band ends up carrying
//! the mean band energy. Only energy ratios matter, so a uniform scale
//! on the input energies leaves the gains unchanged.

use crate::dsp::band::{BandEnergies, BandGains};

/// Gains that bring each band's energy to the mean of the three
///
/// A band with exactly zero energy keeps a gain of 1.0.
pub fn solve_gains(energies: &BandEnergies) -> BandGains {
    let target = energies.total() / 3.0;
    let gain = |energy: f64| {
        if energy > 0.0 {
            (target / energy).sqrt()
        } else {
            1.0
        }
    };

    BandGains::new(gain(energies.low), gain(energies.mid), gain(energies.high))
}
