//! Tonekit - Three-Band Tone Equalizer
//!
//! Tonekit splits a mono signal into low, mid and high bands and either
//! balances their energies or drops selected bands.
//!
//! # Pipeline
//!
//! - Analysis: FFT band energies of the whole signal
//! - Solving: one gain per band that brings every band to the mean energy
//! - Filtering: Butterworth second-order-section bank, bands summed back
//!
//! WAV reading/writing and a few test-signal generators sit around the
//! pipeline for the command-line tool.

pub mod cli;
pub mod config;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod synth;

pub use config::EqualizerConfig;
pub use error::{Result, ToneError};
