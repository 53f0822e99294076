//! Simple sample-wise effects
//!
//! Hard clipping, the tremolo-style "wah" and a linear fade-out. Each
//! returns a new signal.

use std::f64::consts::PI;

use crate::engine::signal::{frames_for, Signal};
use crate::error::{Result, ToneError};

/// Clamp every sample to `[-limit, limit]`
///
/// # Errors
/// * `InvalidParameter` - If `limit` is not positive and finite
pub fn hard_clip(signal: &Signal, limit: f64) -> Result<Signal> {
    if !(limit.is_finite() && limit > 0.0) {
        return Err(ToneError::invalid_parameter(
            "clip_limit",
            limit,
            "a positive, finite level",
        ));
    }
    Ok(signal.map(|s| s.clamp(-limit, limit)))
}

/// Amplitude-modulate `signal` and blend it with the dry input
///
/// The modulator is `0.5 + 0.5 * sin(2*pi*rate_hz*t)`; `wet_dry` of 0.0
/// returns the input unchanged, 1.0 returns only the modulated signal.
///
/// # Errors
/// * `InvalidParameter` - If `rate_hz` is negative or `wet_dry` is outside [0, 1]
pub fn wah(signal: &Signal, rate_hz: f64, wet_dry: f64) -> Result<Signal> {
    if !(rate_hz.is_finite() && rate_hz >= 0.0) {
        return Err(ToneError::invalid_parameter(
            "rate_hz",
            rate_hz,
            "a non-negative frequency",
        ));
    }
    if !(0.0..=1.0).contains(&wet_dry) {
        return Err(ToneError::invalid_parameter("wet_dry", wet_dry, "0.0 to 1.0"));
    }

    let sample_rate = signal.sample_rate() as f64;
    let samples = signal
        .samples()
        .iter()
        .enumerate()
        .map(|(i, &dry)| {
            let t = i as f64 / sample_rate;
            let modulator = 0.5 + 0.5 * (2.0 * PI * rate_hz * t).sin();
            (1.0 - wet_dry) * dry + wet_dry * dry * modulator
        })
        .collect();
    Signal::new(samples, signal.sample_rate())
}

/// Ramp the last `duration_secs` of `signal` linearly down to silence
///
/// The ramp runs from 1.0 to 0.0 inclusive; a fade longer than the
/// signal covers the whole signal.
pub fn fade_out(signal: &Signal, duration_secs: f64) -> Result<Signal> {
    let fade_len = frames_for(duration_secs, signal.sample_rate())?.min(signal.len());
    let start = signal.len() - fade_len;

    let samples = signal
        .samples()
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            if i < start {
                return s;
            }
            let ramp = if fade_len > 1 {
                1.0 - (i - start) as f64 / (fade_len - 1) as f64
            } else {
                0.0
            };
            s * ramp
        })
        .collect();
    Signal::new(samples, signal.sample_rate())
}
