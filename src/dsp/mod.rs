//! Signal processing
//!
//! The tone equalizer pipeline runs one way:
//! samples -> band energies -> gains -> filtered and summed signal.
//! Nothing in here logs or keeps state between calls.

mod analyzer;
mod band;
mod effects;
mod equalizer;
mod filter;
mod filter_bank;
mod solver;

pub use analyzer::{analyze, bin_frequency, MIN_ANALYSIS_LEN};
pub use band::{Band, BandEnergies, BandGains, BandMask, BandRange};
pub use effects::{fade_out, hard_clip, wah};
pub use equalizer::{equalize_bands, EqualizationReport, ToneEqualizer};
pub use filter::{Biquad, FilterResponse, FilterSpec, SosFilter};
pub use filter_bank::{apply_band, equalize, BandFilterBank};
pub use solver::solve_gains;
