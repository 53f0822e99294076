//! WAV file I/O for Tonekit
//!
//! Decodes RIFF/WAV streams into a mono [`Signal`] and encodes signals
//! back to 16-bit PCM. Quantization happens only here; everything
//! upstream stays in `f64`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, info};

use crate::engine::signal::Signal;
use crate::error::{Result, ToneError};

/// Full-scale value of a 16-bit sample
const I16_SCALE: f64 = 32767.0;

/// Quantize a normalized sample to 16-bit PCM
///
/// Uses `round(sample * 32767)` and clamps anything outside the i16 range.
pub fn quantize_sample(sample: f64) -> i16 {
    (sample * I16_SCALE)
        .round()
        .clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Map a 16-bit PCM value back to [-1.0, 1.0]
pub fn dequantize_sample(value: i16) -> f64 {
    (value as f64 / I16_SCALE).max(-1.0)
}

/// Decode a WAV stream into a mono signal
///
/// Multi-channel input keeps only its first channel.
///
/// # Errors
/// * `WavFormat` - If the stream is not a readable WAV file
/// * `UnsupportedFormat` - If the sample encoding is not handled
pub fn decode_wav<R: Read>(reader: R) -> Result<Signal> {
    let reader = WavReader::new(reader)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let interleaved = read_samples_as_f64(reader, spec)?;
    if channels > 1 {
        debug!("Reducing {}-channel audio to its first channel", channels);
    }

    let samples = interleaved.into_iter().step_by(channels.max(1)).collect();
    Signal::new(samples, spec.sample_rate)
}

/// Encode a signal as mono 16-bit PCM WAV
pub fn encode_wav<W: Write + Seek>(signal: &Signal, writer: W) -> Result<()> {
    let mut writer = WavWriter::new(writer, pcm16_spec(signal.sample_rate()))?;
    for &sample in signal.samples() {
        writer.write_sample(quantize_sample(sample))?;
    }
    writer.finalize()?;
    Ok(())
}

/// Load a WAV file from disk
///
/// # Errors
/// * `AudioReadError` - If the file cannot be opened or decoded
/// * `UnsupportedFormat` - If the sample encoding is not handled
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<Signal> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ToneError::AudioReadError {
        path: path.display().to_string(),
        source: hound::Error::IoError(e),
    })?;

    let signal = decode_wav(BufReader::new(file)).map_err(|e| match e {
        ToneError::WavFormat(source) => ToneError::AudioReadError {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })?;

    info!(
        "Loaded {} ({} samples @ {} Hz)",
        path.display(),
        signal.len(),
        signal.sample_rate()
    );
    Ok(signal)
}

/// Write a signal to disk as 16-bit PCM WAV
///
/// # Errors
/// * `AudioWriteError` - If the file cannot be created or written
pub fn save_wav<P: AsRef<Path>>(signal: &Signal, path: P) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source: hound::Error| ToneError::AudioWriteError {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(|e| write_error(hound::Error::IoError(e)))?;
    encode_wav(signal, BufWriter::new(file)).map_err(|e| match e {
        ToneError::WavFormat(source) => write_error(source),
        other => other,
    })?;

    info!(
        "Wrote {} ({:.2}s @ {} Hz)",
        path.display(),
        signal.duration_secs(),
        signal.sample_rate()
    );
    Ok(())
}

fn pcm16_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Read every interleaved sample, normalized to roughly [-1.0, 1.0]
fn read_samples_as_f64<R: Read>(mut reader: WavReader<R>, spec: WavSpec) -> Result<Vec<f64>> {
    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(|v| v as f64))
            .collect::<std::result::Result<Vec<f64>, _>>()?,
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(dequantize_sample))
            .collect::<std::result::Result<Vec<f64>, _>>()?,
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| (v as f64 / 127.0).max(-1.0)))
            .collect::<std::result::Result<Vec<f64>, _>>()?,
        (SampleFormat::Int, bits @ (24 | 32)) => {
            // 24-bit is stored as i32 in hound
            let full_scale = ((1_i64 << (bits - 1)) - 1) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| (v as f64 / full_scale).max(-1.0)))
                .collect::<std::result::Result<Vec<f64>, _>>()?
        }
        (format, bits) => {
            return Err(ToneError::UnsupportedFormat {
                details: format!("{}-bit {:?} samples", bits, format),
            })
        }
    };
    Ok(samples)
}
