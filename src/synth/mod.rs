//! Test-signal synthesis
//!
//! Tones, a brass-like note and a short four-beat song, all rendered
//! into [`Signal`](crate::engine::Signal)s for the equalizer or for WAV export.

mod song;
mod tone;
mod trumpet;

pub use song::{render_measure, render_song, SongParams, DEFAULT_CLIP_LIMIT};
pub use tone::{
    clipped_wave, high_pitch_wave, sine_wave, volume_modulated_wave, ToneParams, HIGH_PITCH_RATIO,
    VOLUME_SWEEP_HZ,
};
pub use trumpet::{parse_note, trumpet_wave, NOTE_FREQUENCIES};
