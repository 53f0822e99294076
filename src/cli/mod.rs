//! CLI Module
//!
//! Command-line interface for the tone equalizer and its signal generators.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tonekit - three-band tone equalizer
#[derive(Parser, Debug)]
#[command(name = "tonekit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Equalize and/or drop frequency bands of a WAV file
    #[command(name = "equalize")]
    Equalize {
        /// Input WAV file
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Balance the energies of the three bands
        #[arg(long)]
        equalize: bool,

        /// Drop the low band
        #[arg(long)]
        drop_low: bool,

        /// Drop the mid band
        #[arg(long)]
        drop_mid: bool,

        /// Drop the high band
        #[arg(long)]
        drop_high: bool,

        /// JSON file with crossover frequencies and filter order
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print band energies and balancing gains as JSON
    #[command(name = "analyze")]
    Analyze {
        /// Input WAV file
        input: PathBuf,

        /// JSON file with crossover frequencies and filter order
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Apply the wah (amplitude modulation) effect
    #[command(name = "wah")]
    Wah {
        /// Input WAV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Modulation rate in Hz
        #[arg(short, long, default_value_t = 1.0)]
        frequency: f64,

        /// Wet/dry mix (0.0 = dry, 1.0 = wet)
        #[arg(short, long, default_value_t = 0.5)]
        wet_dry: f64,
    },

    /// Render a test tone
    #[command(name = "tone")]
    Tone {
        /// Output WAV file
        output: PathBuf,

        #[arg(short, long, value_enum, default_value_t = ToneKind::Sine)]
        kind: ToneKind,

        /// Frequency in Hz
        #[arg(short, long, default_value_t = 440.0)]
        frequency: f64,

        /// Peak amplitude (1.0 = full scale)
        #[arg(short, long, default_value_t = 0.25)]
        amplitude: f64,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 2.0)]
        duration: f64,

        #[arg(long, default_value_t = crate::engine::DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Clip level for `--kind clipped`
        #[arg(long, default_value_t = crate::synth::DEFAULT_CLIP_LIMIT)]
        clip_limit: f64,
    },

    /// Render a trumpet-like note
    #[command(name = "trumpet")]
    Trumpet {
        /// Output WAV file
        output: PathBuf,

        /// Note (C4..B4) or frequency in Hz
        #[arg(short, long, default_value = "A4")]
        note: String,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f64,

        /// Seed for the breath noise (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Render the four-beat demo song
    #[command(name = "song")]
    Song {
        /// Output WAV file
        output: PathBuf,

        #[arg(short, long, default_value_t = 4)]
        measures: usize,

        /// Fade-out length in seconds
        #[arg(long, default_value_t = 0.0)]
        fade_out: f64,
    },
}

/// Waveform rendered by the `tone` command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneKind {
    Sine,
    Clipped,
    /// Volume swept at 0.5 Hz
    Tremolo,
    /// 1.5x the requested frequency
    HighPitch,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_equalize_flags() {
        let cli = Cli::try_parse_from([
            "tonekit", "equalize", "in.wav", "-o", "out.wav", "--equalize", "--drop-mid",
        ])
        .unwrap();

        match cli.command {
            Commands::Equalize {
                input,
                output,
                equalize,
                drop_low,
                drop_mid,
                drop_high,
                config,
            } => {
                assert_eq!(input, PathBuf::from("in.wav"));
                assert_eq!(output, PathBuf::from("out.wav"));
                assert!(equalize && drop_mid);
                assert!(!drop_low && !drop_high);
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_tone_kind() {
        let cli = Cli::try_parse_from(["tonekit", "-v", "tone", "a.wav", "--kind", "high-pitch"])
            .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Tone { kind, frequency, .. } => {
                assert_eq!(kind, ToneKind::HighPitch);
                assert_eq!(frequency, 440.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_wah_requires_input_and_output() {
        assert!(Cli::try_parse_from(["tonekit", "wah", "-o", "out.wav"]).is_err());
    }
}
