//! Audio Engine Module
//!
//! - Mono signal type
//! - WAV decode/encode

pub mod io;
pub mod signal;

pub use io::{decode_wav, dequantize_sample, encode_wav, load_wav, quantize_sample, save_wav};
pub use signal::{frames_for, Signal, DEFAULT_SAMPLE_RATE};
