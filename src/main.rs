//! Tonekit CLI - Three-Band Tone Equalizer
//!
//! Command-line interface for the tonekit equalizer and signal generators.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use tonekit::cli::{commands, Cli, Commands};
use tonekit::dsp::BandMask;
use tonekit::synth::{SongParams, ToneParams};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    info!("Tonekit v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = handle_command(cli.command) {
        error!("{:#}", err);
        if let Some(tone_err) = err.downcast_ref::<tonekit::ToneError>() {
            error!("[{}] {}", tone_err.error_code(), tone_err.recovery_hint());
        }
        return Err(err);
    }
    Ok(())
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Equalize {
            input,
            output,
            equalize,
            drop_low,
            drop_mid,
            drop_high,
            config,
        } => commands::equalize(
            &input,
            &output,
            equalize,
            BandMask::dropping(drop_low, drop_mid, drop_high),
            config.as_deref(),
        )
        .with_context(|| format!("Failed to equalize {}", input.display())),

        Commands::Analyze { input, config } => commands::analyze(&input, config.as_deref())
            .with_context(|| format!("Failed to analyze {}", input.display())),

        Commands::Wah {
            input,
            output,
            frequency,
            wet_dry,
        } => commands::apply_wah(&input, &output, frequency, wet_dry)
            .context("Failed to apply wah effect"),

        Commands::Tone {
            output,
            kind,
            frequency,
            amplitude,
            duration,
            sample_rate,
            clip_limit,
        } => {
            let params = ToneParams::new(frequency, amplitude, duration, sample_rate);
            commands::tone(&output, kind, &params, clip_limit).context("Failed to render tone")
        }

        Commands::Trumpet {
            output,
            note,
            duration,
            seed,
        } => commands::trumpet(&output, &note, duration, seed)
            .context("Failed to render trumpet note"),

        Commands::Song {
            output,
            measures,
            fade_out,
        } => {
            let params = SongParams {
                measures,
                fade_out_secs: fade_out,
                ..SongParams::default()
            };
            commands::song(&output, &params).context("Failed to render song")
        }
    }
}
