//! Mono signal type
//!
//! A [`Signal`] is an immutable run of `f64` samples tagged with its
//! sample rate. Every processing stage takes `&Signal` and hands back a
//! fresh one, so an input is never modified behind the caller's back.

use crate::error::{Result, ToneError};

/// Default sample rate used by the synthesizers (CD rate)
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Mono audio samples with an associated sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl Signal {
    /// Wrap samples at the given sample rate
    ///
    /// # Errors
    /// * `InvalidInput` - If `sample_rate` is zero
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(ToneError::invalid_input("sample rate must be positive"));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Build a signal of `len` samples where sample `i` is `f(i)`
    pub fn from_fn(len: usize, sample_rate: u32, f: impl FnMut(usize) -> f64) -> Result<Self> {
        Self::new((0..len).map(f).collect(), sample_rate)
    }

    /// A run of zeros lasting `duration_secs`
    pub fn silence(duration_secs: f64, sample_rate: u32) -> Result<Self> {
        let len = frames_for(duration_secs, sample_rate)?;
        Self::new(vec![0.0; len], sample_rate)
    }

    /// Get a reference to the samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Consume the signal and return its samples
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Get the sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Half the sample rate
    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Root-mean-square level (0.0 for an empty signal)
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_squares: f64 = self.samples.iter().map(|s| s * s).sum();
        (sum_squares / self.samples.len() as f64).sqrt()
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> f64 {
        self.samples.iter().map(|s| s.abs()).fold(0.0, f64::max)
    }

    /// Copy of this signal with every sample multiplied by `gain`
    pub fn scaled(&self, gain: f64) -> Signal {
        self.map(|s| s * gain)
    }

    /// Copy of this signal with `f` applied to every sample
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Signal {
        Signal {
            samples: self.samples.iter().map(|&s| f(s)).collect(),
            sample_rate: self.sample_rate,
        }
    }

    /// Samples `range` of this signal as a new signal
    pub fn slice(&self, range: std::ops::Range<usize>) -> Result<Signal> {
        let samples = self.samples.get(range.clone()).ok_or_else(|| {
            ToneError::invalid_input(format!(
                "range {:?} out of bounds for {} samples",
                range,
                self.samples.len()
            ))
        })?;
        Ok(Signal {
            samples: samples.to_vec(),
            sample_rate: self.sample_rate,
        })
    }

    /// Sample-by-sample sum of two equally long signals
    ///
    /// # Errors
    /// * `ChannelMismatch` - If the sample rates differ
    /// * `InvalidInput` - If the lengths differ
    pub fn mix(&self, other: &Signal) -> Result<Signal> {
        self.check_rate(other)?;
        if self.len() != other.len() {
            return Err(ToneError::invalid_input(format!(
                "cannot mix signals of {} and {} samples",
                self.len(),
                other.len()
            )));
        }
        Ok(Signal {
            samples: self
                .samples
                .iter()
                .zip(&other.samples)
                .map(|(a, b)| a + b)
                .collect(),
            sample_rate: self.sample_rate,
        })
    }

    /// This signal followed by `other`
    ///
    /// # Errors
    /// * `ChannelMismatch` - If the sample rates differ
    pub fn concat(&self, other: &Signal) -> Result<Signal> {
        self.check_rate(other)?;
        let mut samples = Vec::with_capacity(self.len() + other.len());
        samples.extend_from_slice(&self.samples);
        samples.extend_from_slice(&other.samples);
        Ok(Signal {
            samples,
            sample_rate: self.sample_rate,
        })
    }

    fn check_rate(&self, other: &Signal) -> Result<()> {
        if self.sample_rate != other.sample_rate {
            return Err(ToneError::ChannelMismatch {
                expected: self.sample_rate,
                actual: other.sample_rate,
            });
        }
        Ok(())
    }
}

/// Number of whole samples in `duration_secs` at `sample_rate`
pub fn frames_for(duration_secs: f64, sample_rate: u32) -> Result<usize> {
    if !duration_secs.is_finite() || duration_secs < 0.0 {
        return Err(ToneError::invalid_parameter(
            "duration_secs",
            duration_secs,
            "a finite, non-negative number of seconds",
        ));
    }
    Ok((duration_secs * sample_rate as f64) as usize)
}
