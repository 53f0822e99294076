//! Four-beat song sequencer
//!
//! Every measure plays a clipped tone, a volume-swept tone, one beat of
//! rest, then a tone a fifth higher. Measures are rendered back to back
//! into one signal instead of being played live.

use serde::{Deserialize, Serialize};

use crate::dsp::fade_out;
use crate::engine::signal::{Signal, DEFAULT_SAMPLE_RATE};
use crate::error::{Result, ToneError};
use crate::synth::tone::{clipped_wave, high_pitch_wave, volume_modulated_wave, ToneParams};

/// Clip level of the first beat, as a fraction of full scale
pub const DEFAULT_CLIP_LIMIT: f64 = 0.25;

/// Parameters of a rendered song
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SongParams {
    /// Base frequency in Hz
    pub frequency: f64,
    /// Peak amplitude of every beat
    pub amplitude: f64,
    /// Length of one beat (0.5 s = 120 BPM)
    pub beat_secs: f64,
    pub measures: usize,
    pub clip_limit: f64,
    /// Fade applied to the tail of the song (0 = none)
    pub fade_out_secs: f64,
    pub sample_rate: u32,
}

impl Default for SongParams {
    fn default() -> Self {
        Self {
            frequency: 440.0,
            amplitude: 1.0,
            beat_secs: 0.5,
            measures: 4,
            clip_limit: DEFAULT_CLIP_LIMIT,
            fade_out_secs: 0.0,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Render one four-beat measure
pub fn render_measure(params: &SongParams) -> Result<Signal> {
    let beat = ToneParams::new(
        params.frequency,
        params.amplitude,
        params.beat_secs,
        params.sample_rate,
    );

    let beats = [
        clipped_wave(&beat, params.clip_limit)?,
        volume_modulated_wave(&beat)?,
        Signal::silence(params.beat_secs, params.sample_rate)?,
        high_pitch_wave(&beat)?,
    ];

    let mut measure = Signal::new(Vec::new(), params.sample_rate)?;
    for beat in &beats {
        measure = measure.concat(beat)?;
    }
    Ok(measure)
}

/// Render `params.measures` measures and apply the optional fade-out
///
/// # Errors
/// * `InvalidParameter` - If `measures` is zero
pub fn render_song(params: &SongParams) -> Result<Signal> {
    if params.measures == 0 {
        return Err(ToneError::invalid_parameter(
            "measures",
            params.measures,
            "at least one measure",
        ));
    }

    let measure = render_measure(params)?;
    let mut song = Signal::new(
        Vec::with_capacity(measure.len() * params.measures),
        params.sample_rate,
    )?;
    for _ in 0..params.measures {
        song = song.concat(&measure)?;
    }

    if params.fade_out_secs > 0.0 {
        song = fade_out(&song, params.fade_out_secs)?;
    }
    Ok(song)
}
