//! Sine-based tone generators

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::dsp::hard_clip;
use crate::engine::signal::{frames_for, Signal, DEFAULT_SAMPLE_RATE};
use crate::error::{Result, ToneError};

/// Rate of the volume sweep applied by [`volume_modulated_wave`]
pub const VOLUME_SWEEP_HZ: f64 = 0.5;

/// Pitch ratio used by [`high_pitch_wave`]
pub const HIGH_PITCH_RATIO: f64 = 1.5;

/// Parameters shared by every tone generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneParams {
    /// Frequency in Hz
    pub frequency: f64,
    /// Peak amplitude (1.0 = full scale)
    pub amplitude: f64,
    pub duration_secs: f64,
    pub sample_rate: u32,
}

impl Default for ToneParams {
    fn default() -> Self {
        Self {
            frequency: 440.0,
            amplitude: 0.25,
            duration_secs: 2.0,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl ToneParams {
    pub fn new(frequency: f64, amplitude: f64, duration_secs: f64, sample_rate: u32) -> Self {
        Self {
            frequency,
            amplitude,
            duration_secs,
            sample_rate,
        }
    }

    fn validate(&self) -> Result<()> {
        if !(self.frequency.is_finite() && self.frequency >= 0.0) {
            return Err(ToneError::invalid_parameter(
                "frequency",
                self.frequency,
                "a non-negative frequency in Hz",
            ));
        }
        if !self.amplitude.is_finite() {
            return Err(ToneError::invalid_parameter(
                "amplitude",
                self.amplitude,
                "a finite amplitude",
            ));
        }
        Ok(())
    }
}

/// `amplitude * sin(2*pi*f*t)` with `t = i / sample_rate`
pub fn sine_wave(params: &ToneParams) -> Result<Signal> {
    params.validate()?;
    let len = frames_for(params.duration_secs, params.sample_rate)?;
    let step = 2.0 * PI * params.frequency / params.sample_rate as f64;
    Signal::from_fn(len, params.sample_rate, |i| {
        params.amplitude * (step * i as f64).sin()
    })
}

/// A sine wave hard-clipped at `clip_limit`
pub fn clipped_wave(params: &ToneParams, clip_limit: f64) -> Result<Signal> {
    hard_clip(&sine_wave(params)?, clip_limit)
}

/// A sine wave whose volume sweeps between 0 and 1 at 0.5 Hz
pub fn volume_modulated_wave(params: &ToneParams) -> Result<Signal> {
    let carrier = sine_wave(params)?;
    let sample_rate = params.sample_rate as f64;
    let samples = carrier
        .samples()
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let t = i as f64 / sample_rate;
            s * (0.5 + 0.5 * (2.0 * PI * VOLUME_SWEEP_HZ * t).sin())
        })
        .collect();
    Signal::new(samples, params.sample_rate)
}

/// A sine wave at 1.5x the requested frequency
pub fn high_pitch_wave(params: &ToneParams) -> Result<Signal> {
    sine_wave(&ToneParams {
        frequency: params.frequency * HIGH_PITCH_RATIO,
        ..*params
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sine_length_and_amplitude() {
        let params = ToneParams::new(440.0, 0.5, 1.0, 44100);
        let wave = sine_wave(&params).unwrap();

        assert_eq!(wave.len(), 44100);
        assert_eq!(wave.samples()[0], 0.0);
        assert_relative_eq!(wave.peak(), 0.5, epsilon = 1e-4);
        assert_relative_eq!(wave.rms(), 0.5 / 2.0_f64.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_default_params() {
        let wave = sine_wave(&ToneParams::default()).unwrap();
        assert_eq!(wave.len(), 88200);
        assert_eq!(wave.sample_rate(), DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_clipped_wave_flattens_peaks() {
        let params = ToneParams::new(440.0, 1.0, 0.1, 44100);
        let wave = clipped_wave(&params, 0.25).unwrap();
        assert_relative_eq!(wave.peak(), 0.25);
    }

    #[test]
    fn test_volume_modulation_starts_at_half() {
        let params = ToneParams::new(100.0, 1.0, 1.0, 8000);
        let plain = sine_wave(&params).unwrap();
        let swept = volume_modulated_wave(&params).unwrap();

        // Sweep value is 0.5 at t=0 and peaks at t=0.5 s
        assert_relative_eq!(swept.samples()[20], 0.5 * plain.samples()[20], epsilon = 5e-3);
        assert!(swept.peak() <= plain.peak() + 1e-12);
    }

    #[test]
    fn test_high_pitch_raises_frequency() {
        let params = ToneParams::new(440.0, 1.0, 1.0, 44100);
        let high = high_pitch_wave(&params).unwrap();
        let expected = sine_wave(&ToneParams {
            frequency: 660.0,
            ..params
        })
        .unwrap();
        assert_eq!(high, expected);
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(sine_wave(&ToneParams::new(-1.0, 0.5, 1.0, 44100)).is_err());
        assert!(sine_wave(&ToneParams::new(440.0, f64::NAN, 1.0, 44100)).is_err());
        assert!(sine_wave(&ToneParams::new(440.0, 0.5, -1.0, 44100)).is_err());
        assert!(sine_wave(&ToneParams::new(440.0, 0.5, 1.0, 0)).is_err());
    }
}
