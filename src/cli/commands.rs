//! CLI Command Implementations
//!
//! Each command reads or renders a signal, runs it through the library
//! and writes a 16-bit WAV file.

use std::path::Path;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::ToneKind;
use crate::config::EqualizerConfig;
use crate::dsp::{wah, BandMask, EqualizationReport, ToneEqualizer};
use crate::engine::{load_wav, save_wav};
use crate::error::Result;
use crate::synth::{self, SongParams, ToneParams};

/// Load `path` if given, otherwise use the defaults.
pub fn load_config(path: Option<&Path>) -> Result<EqualizerConfig> {
    match path {
        Some(path) => {
            info!("Loading equalizer config: {}", path.display());
            EqualizerConfig::from_json_file(path)
        }
        None => Ok(EqualizerConfig::default()),
    }
}

/// Optionally balance the bands of `input`, then drop the bands `mask`
/// does not keep.
pub fn equalize(
    input: &Path,
    output: &Path,
    balance: bool,
    mask: BandMask,
    config: Option<&Path>,
) -> Result<()> {
    let equalizer = ToneEqualizer::new(load_config(config)?);
    let mut signal = load_wav(input)?;

    if balance {
        let report = equalizer.report(&signal)?;
        info!(
            "Band gains: low {:.3}, mid {:.3}, high {:.3}",
            report.gains.low, report.gains.mid, report.gains.high
        );
        signal = equalizer.apply_gains(&signal, &report.gains)?;
    }

    debug!("Band mask: {:?}", mask);
    let result = equalizer.drop_bands(&signal, mask)?;
    save_wav(&result, output)?;

    println!("Equalized: {} -> {}", input.display(), output.display());
    Ok(())
}

/// Band energies and balancing gains of `input`.
pub fn analysis_report(input: &Path, config: Option<&Path>) -> Result<EqualizationReport> {
    let equalizer = ToneEqualizer::new(load_config(config)?);
    let signal = load_wav(input)?;
    equalizer.report(&signal)
}

/// Print the analysis report of `input` as JSON.
pub fn analyze(input: &Path, config: Option<&Path>) -> Result<()> {
    let report = analysis_report(input, config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Apply the wah effect to `input`.
pub fn apply_wah(input: &Path, output: &Path, rate_hz: f64, wet_dry: f64) -> Result<()> {
    info!("Wah at {} Hz, wet/dry {}", rate_hz, wet_dry);

    let signal = load_wav(input)?;
    let result = wah(&signal, rate_hz, wet_dry)?;
    save_wav(&result, output)?;

    println!("Wah applied: {} -> {}", input.display(), output.display());
    Ok(())
}

/// Render a test tone of the given kind.
pub fn tone(output: &Path, kind: ToneKind, params: &ToneParams, clip_limit: f64) -> Result<()> {
    info!("Rendering {:?} tone at {} Hz", kind, params.frequency);

    let signal = match kind {
        ToneKind::Sine => synth::sine_wave(params)?,
        ToneKind::Clipped => synth::clipped_wave(params, clip_limit)?,
        ToneKind::Tremolo => synth::volume_modulated_wave(params)?,
        ToneKind::HighPitch => synth::high_pitch_wave(params)?,
    };
    save_wav(&signal, output)?;

    println!("Tone written: {}", output.display());
    Ok(())
}

/// Render a trumpet note; `seed` makes the breath noise reproducible.
pub fn trumpet(output: &Path, note: &str, duration_secs: f64, seed: Option<u64>) -> Result<()> {
    let frequency = synth::parse_note(note)?;
    info!("Rendering trumpet note {} ({} Hz)", note, frequency);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let signal = synth::trumpet_wave(
        frequency,
        duration_secs,
        crate::engine::DEFAULT_SAMPLE_RATE,
        &mut rng,
    )?;
    save_wav(&signal, output)?;

    println!("Trumpet note written: {}", output.display());
    Ok(())
}

/// Render the demo song.
pub fn song(output: &Path, params: &SongParams) -> Result<()> {
    info!(
        "Rendering {} measures at {} Hz",
        params.measures, params.frequency
    );

    let signal = synth::render_song(params)?;
    save_wav(&signal, output)?;

    println!(
        "Song written: {} ({:.1} s)",
        output.display(),
        signal.duration_secs()
    );
    Ok(())
}
