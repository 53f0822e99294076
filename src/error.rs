//! Error handling for Tonekit
//!
//! Every fallible operation returns [`ToneError`]. The DSP stages only
//! fail on the guard conditions (too-short input, unrealizable filter,
//! mismatched sample rates); the rest are I/O and parameter errors
//! raised at the edges.

use thiserror::Error;

/// Result type alias for Tonekit operations
pub type Result<T> = std::result::Result<T, ToneError>;

/// Main error type for Tonekit operations
#[derive(Error, Debug)]
pub enum ToneError {
    // Core DSP guards
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Invalid filter spec: {reason}")]
    InvalidFilterSpec { reason: String },

    #[error("Sample rate mismatch: expected {expected} Hz, got {actual} Hz")]
    ChannelMismatch { expected: u32, actual: u32 },

    #[error("Invalid parameter: {param} = {value} (expected {expected})")]
    InvalidParameter {
        param: String,
        value: String,
        expected: String,
    },

    // Audio I/O
    #[error("Failed to read audio file: {path}")]
    AudioReadError {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Failed to write audio file: {path}")]
    AudioWriteError {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Malformed WAV stream: {0}")]
    WavFormat(#[from] hound::Error),

    #[error("Unsupported audio format: {details}")]
    UnsupportedFormat { details: String },

    // Configuration
    #[error("Invalid configuration in {path}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToneError {
    /// Shorthand for an [`ToneError::InvalidInput`] with a formatted reason
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        ToneError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`ToneError::InvalidFilterSpec`] with a formatted reason
    pub(crate) fn invalid_filter(reason: impl Into<String>) -> Self {
        ToneError::InvalidFilterSpec {
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`ToneError::InvalidParameter`]
    pub(crate) fn invalid_parameter(
        param: &str,
        value: impl ToString,
        expected: &str,
    ) -> Self {
        ToneError::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ToneError::InvalidInput { .. } => "INVALID_INPUT",
            ToneError::InvalidFilterSpec { .. } => "INVALID_FILTER_SPEC",
            ToneError::ChannelMismatch { .. } => "CHANNEL_MISMATCH",
            ToneError::InvalidParameter { .. } => "INVALID_PARAMETER",
            ToneError::AudioReadError { .. } => "AUDIO_READ_ERROR",
            ToneError::AudioWriteError { .. } => "AUDIO_WRITE_ERROR",
            ToneError::WavFormat(_) => "WAV_FORMAT",
            ToneError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            ToneError::Config { .. } => "CONFIG_ERROR",
            ToneError::Serialization(_) => "SERIALIZATION_ERROR",
            ToneError::Io(_) => "IO_ERROR",
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ToneError::InvalidInput { .. } => "Provide at least two samples at a positive sample rate",
            ToneError::InvalidFilterSpec { .. } => {
                "Use a higher sample rate or move the band crossovers below Nyquist"
            }
            ToneError::ChannelMismatch { .. } => "Resample the signals to a common rate first",
            ToneError::InvalidParameter { .. } => "Adjust the parameter to be within valid range",
            ToneError::AudioReadError { .. } | ToneError::WavFormat(_) => {
                "Check that the file exists and is a valid WAV file"
            }
            ToneError::AudioWriteError { .. } => "Check that the output directory is writable",
            ToneError::UnsupportedFormat { .. } => "Convert to 16-bit PCM WAV",
            ToneError::Config { .. } => "Fix the JSON configuration file",
            ToneError::Serialization(_) => "Report this as a bug",
            ToneError::Io(_) => "Check the error details and try again",
        }
    }
}
