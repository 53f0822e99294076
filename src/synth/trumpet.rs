//! Brass-like voice: three harmonics, a little noise and an envelope

use std::f64::consts::PI;

use rand::Rng;

use crate::engine::signal::{frames_for, Signal};
use crate::error::{Result, ToneError};

/// Natural notes of the fourth octave and their frequencies in Hz
pub const NOTE_FREQUENCIES: [(&str, f64); 7] = [
    ("C4", 261.63),
    ("D4", 293.66),
    ("E4", 329.63),
    ("F4", 349.23),
    ("G4", 392.00),
    ("A4", 440.00),
    ("B4", 493.88),
];

/// Relative levels of the fundamental, 2nd and 3rd harmonic
const HARMONIC_LEVELS: [f64; 3] = [0.6, 0.3, 0.2];
const NOISE_LEVEL: f64 = 0.05;

const ATTACK_SECS: f64 = 0.05;
const DECAY_SECS: f64 = 0.1;
const SUSTAIN_LEVEL: f64 = 0.8;

/// Resolve a note name (`"A4"`) or a plain frequency (`"440"`) to Hz
///
/// # Errors
/// * `InvalidParameter` - If `note` is neither a known note nor a positive number
pub fn parse_note(note: &str) -> Result<f64> {
    let note = note.trim();
    if let Some(&(_, frequency)) = NOTE_FREQUENCIES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(note))
    {
        return Ok(frequency);
    }

    match note.parse::<f64>() {
        Ok(frequency) if frequency.is_finite() && frequency > 0.0 => Ok(frequency),
        _ => Err(ToneError::invalid_parameter(
            "note",
            note,
            "a note (C4..B4) or a frequency in Hz",
        )),
    }
}

/// Attack/decay/sustain level at sample `i`
fn envelope(i: usize, attack_len: usize, decay_len: usize) -> f64 {
    // Inclusive linear ramp from `from` to `to` over `len` samples
    let ramp = |pos: usize, len: usize, from: f64, to: f64| {
        if len > 1 {
            from + (to - from) * pos as f64 / (len - 1) as f64
        } else {
            from
        }
    };

    if i < attack_len {
        ramp(i, attack_len, 0.0, 1.0)
    } else if i < attack_len + decay_len {
        ramp(i - attack_len, decay_len, 1.0, SUSTAIN_LEVEL)
    } else {
        SUSTAIN_LEVEL
    }
}

/// Standard normal sample via the Box-Muller transform
fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - [0, 1) keeps the log argument away from zero
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Render a trumpet-like note at `frequency` Hz
///
/// Noise is drawn from `rng`; seed it for reproducible output.
pub fn trumpet_wave<R: Rng + ?Sized>(
    frequency: f64,
    duration_secs: f64,
    sample_rate: u32,
    rng: &mut R,
) -> Result<Signal> {
    if !(frequency.is_finite() && frequency > 0.0) {
        return Err(ToneError::invalid_parameter(
            "frequency",
            frequency,
            "a positive frequency in Hz",
        ));
    }

    let len = frames_for(duration_secs, sample_rate)?;
    let attack_len = frames_for(ATTACK_SECS, sample_rate)?;
    let decay_len = frames_for(DECAY_SECS, sample_rate)?;
    let step = 2.0 * PI * frequency / sample_rate as f64;

    Signal::from_fn(len, sample_rate, |i| {
        let phase = step * i as f64;
        let tone: f64 = HARMONIC_LEVELS
            .iter()
            .enumerate()
            .map(|(h, level)| level * ((h + 1) as f64 * phase).sin())
            .sum();
        let noisy = tone + NOISE_LEVEL * gaussian(&mut *rng);
        noisy * envelope(i, attack_len, decay_len)
    })
}
