//! Butterworth band filters (second-order sections)
//!
//! Filters are designed from the analog Butterworth prototype, mapped to
//! lowpass/highpass/bandpass in the s-plane, then carried to the z-plane
//! with the bilinear transform. Cutoffs are pre-warped so the -3 dB
//! points land exactly on the requested frequencies. The result is kept
//! as a cascade of biquads, one per conjugate pole pair.

use std::f64::consts::PI;

use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::engine::Signal;
use crate::error::{Result, ToneError};

/// Frequency response shape of a band filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterResponse {
    /// Pass below `cutoff_hz`
    LowPass { cutoff_hz: f64 },
    /// Pass between `low_hz` and `high_hz`
    BandPass { low_hz: f64, high_hz: f64 },
    /// Pass above `cutoff_hz`
    HighPass { cutoff_hz: f64 },
}

/// A Butterworth filter definition, independent of sample rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub response: FilterResponse,
    /// Prototype order; a bandpass ends up with twice as many poles
    pub order: usize,
}

impl FilterSpec {
    pub fn low_pass(cutoff_hz: f64, order: usize) -> Self {
        Self {
            response: FilterResponse::LowPass { cutoff_hz },
            order,
        }
    }

    pub fn band_pass(low_hz: f64, high_hz: f64, order: usize) -> Self {
        Self {
            response: FilterResponse::BandPass { low_hz, high_hz },
            order,
        }
    }

    pub fn high_pass(cutoff_hz: f64, order: usize) -> Self {
        Self {
            response: FilterResponse::HighPass { cutoff_hz },
            order,
        }
    }

    /// Check that the filter is realizable at `sample_rate`
    ///
    /// # Errors
    /// * `InvalidFilterSpec` - If a cutoff is not strictly inside
    ///   (0, Nyquist), bandpass edges are not increasing, or the order is
    ///   odd or zero
    pub fn validate(&self, sample_rate: u32) -> Result<()> {
        if self.order == 0 || self.order % 2 != 0 {
            return Err(ToneError::invalid_filter(format!(
                "order must be even and positive, got {}",
                self.order
            )));
        }

        let nyquist = sample_rate as f64 / 2.0;
        let check = |hz: f64| {
            if hz.is_finite() && hz > 0.0 && hz < nyquist {
                Ok(())
            } else {
                Err(ToneError::invalid_filter(format!(
                    "cutoff {} Hz must lie strictly between 0 and Nyquist ({} Hz)",
                    hz, nyquist
                )))
            }
        };

        match self.response {
            FilterResponse::LowPass { cutoff_hz } | FilterResponse::HighPass { cutoff_hz } => {
                check(cutoff_hz)
            }
            FilterResponse::BandPass { low_hz, high_hz } => {
                check(low_hz)?;
                check(high_hz)?;
                if low_hz >= high_hz {
                    return Err(ToneError::invalid_filter(format!(
                        "bandpass edges must increase, got [{}, {}] Hz",
                        low_hz, high_hz
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Normalized biquad coefficients
/// Transfer function: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl Biquad {
    /// Complex response at normalized angular frequency `omega` (rad/sample)
    fn response(&self, omega: f64) -> Complex64 {
        let z1 = Complex64::from_polar(1.0, -omega);
        let z2 = z1 * z1;
        let num = self.b0 + z1 * self.b1 + z2 * self.b2;
        let den = 1.0 + z1 * self.a1 + z2 * self.a2;
        num / den
    }
}

/// Biquad filter state, Direct Form I
#[derive(Debug, Clone, Copy, Default)]
struct BiquadState {
    x1: f64, // x[n-1]
    x2: f64, // x[n-2]
    y1: f64, // y[n-1]
    y2: f64, // y[n-2]
}

impl BiquadState {
    fn process(&mut self, input: f64, coeffs: &Biquad) -> f64 {
        let output = coeffs.b0 * input + coeffs.b1 * self.x1 + coeffs.b2 * self.x2
            - coeffs.a1 * self.y1
            - coeffs.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }
}

/// A designed filter: cascaded biquads bound to one sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct SosFilter {
    sections: Vec<Biquad>,
    sample_rate: u32,
}

impl SosFilter {
    /// Design a Butterworth filter for `spec` at `sample_rate`
    ///
    /// # Errors
    /// * `InvalidFilterSpec` - See [`FilterSpec::validate`]
    pub fn design(spec: &FilterSpec, sample_rate: u32) -> Result<Self> {
        spec.validate(sample_rate)?;

        let fs = sample_rate as f64;
        let fs2 = 2.0 * fs;
        let warp = |hz: f64| fs2 * (PI * hz / fs).tan();

        let prototype = butterworth_prototype(spec.order);

        // Analog poles, numerator shared by every section, and the
        // digital frequency at which the passband gain is exactly 1
        let (analog_poles, numerator, unity_omega): (Vec<Complex64>, [f64; 3], f64) =
            match spec.response {
                FilterResponse::LowPass { cutoff_hz } => {
                    let wc = warp(cutoff_hz);
                    let poles: Vec<Complex64> = prototype.iter().map(|&p| p * wc).collect();
                    (poles, [1.0, 2.0, 1.0], 0.0)
                }
                FilterResponse::HighPass { cutoff_hz } => {
                    let wc = warp(cutoff_hz);
                    let poles: Vec<Complex64> = prototype.iter().map(|&p| wc / p).collect();
                    (poles, [1.0, -2.0, 1.0], PI)
                }
                FilterResponse::BandPass { low_hz, high_hz } => {
                    let w1 = warp(low_hz);
                    let w2 = warp(high_hz);
                    let bandwidth = w2 - w1;
                    let w0 = (w1 * w2).sqrt();
                    let poles: Vec<Complex64> = prototype
                        .iter()
                        .flat_map(|&p| {
                            let half = p * (bandwidth / 2.0);
                            let offset = (half * half - w0 * w0).sqrt();
                            [half + offset, half - offset]
                        })
                        .collect();
                    (poles, [1.0, 0.0, -1.0], 2.0 * (w0 / fs2).atan())
                }
            };

        // Bilinear transform; keep one pole of each conjugate pair
        let mut upper_poles: Vec<Complex64> = analog_poles
            .iter()
            .map(|&s| (fs2 + s) / (fs2 - s))
            .filter(|z| z.im > 0.0)
            .collect();

        // Poles nearest the unit circle go last
        upper_poles.sort_by(|a, b| a.norm().total_cmp(&b.norm()));

        let sections = upper_poles
            .into_iter()
            .map(|pole| {
                let raw = Biquad {
                    b0: numerator[0],
                    b1: numerator[1],
                    b2: numerator[2],
                    a1: -2.0 * pole.re,
                    a2: pole.norm_sqr(),
                };
                let gain = 1.0 / raw.response(unity_omega).norm();
                Biquad {
                    b0: raw.b0 * gain,
                    b1: raw.b1 * gain,
                    b2: raw.b2 * gain,
                    ..raw
                }
            })
            .collect();

        Ok(Self {
            sections,
            sample_rate,
        })
    }

    /// The cascaded sections, in processing order
    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Sample rate the filter was designed for
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Magnitude response at `freq_hz`
    pub fn magnitude_at(&self, freq_hz: f64) -> f64 {
        let omega = 2.0 * PI * freq_hz / self.sample_rate as f64;
        self.sections
            .iter()
            .map(|section| section.response(omega).norm())
            .product()
    }

    /// Run `input` through the cascade from a zero initial state
    pub fn filter_samples(&self, input: &[f64]) -> Vec<f64> {
        let mut states = vec![BiquadState::default(); self.sections.len()];
        input
            .iter()
            .map(|&x| {
                self.sections
                    .iter()
                    .zip(states.iter_mut())
                    .fold(x, |acc, (coeffs, state)| state.process(acc, coeffs))
            })
            .collect()
    }

    /// Filter a whole signal
    ///
    /// # Errors
    /// * `ChannelMismatch` - If the signal's rate differs from the design rate
    pub fn apply(&self, signal: &Signal) -> Result<Signal> {
        if signal.sample_rate() != self.sample_rate {
            return Err(ToneError::ChannelMismatch {
                expected: self.sample_rate,
                actual: signal.sample_rate(),
            });
        }
        Signal::new(self.filter_samples(signal.samples()), self.sample_rate)
    }
}

/// Poles of the normalized analog Butterworth lowpass of `order`
fn butterworth_prototype(order: usize) -> Vec<Complex64> {
    (0..order)
        .map(|k| {
            let theta = PI * (2 * k + order + 1) as f64 / (2 * order) as f64;
            Complex64::from_polar(1.0, theta)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use test_case::test_case;

    const SQRT_HALF: f64 = std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_prototype_poles_in_left_half_plane() {
        for order in [2, 4, 6, 8] {
            let poles = butterworth_prototype(order);
            assert_eq!(poles.len(), order);
            for pole in poles {
                assert!(pole.re < 0.0);
                assert_relative_eq!(pole.norm(), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_section_counts() {
        let lp = SosFilter::design(&FilterSpec::low_pass(300.0, 4), 44100).unwrap();
        let bp = SosFilter::design(&FilterSpec::band_pass(300.0, 2000.0, 4), 44100).unwrap();
        let hp = SosFilter::design(&FilterSpec::high_pass(2000.0, 4), 44100).unwrap();

        assert_eq!(lp.sections().len(), 2);
        assert_eq!(bp.sections().len(), 4);
        assert_eq!(hp.sections().len(), 2);
    }

    #[test]
    fn test_all_sections_stable() {
        let bp = SosFilter::design(&FilterSpec::band_pass(300.0, 2000.0, 4), 44100).unwrap();
        for section in bp.sections() {
            // Pole radius is sqrt(a2)
            assert!(section.a2 > 0.0 && section.a2 < 1.0);
        }
    }

    #[test]
    fn test_lowpass_response() {
        let lp = SosFilter::design(&FilterSpec::low_pass(300.0, 4), 44100).unwrap();
        assert_abs_diff_eq!(lp.magnitude_at(0.0), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lp.magnitude_at(300.0), SQRT_HALF, epsilon = 1e-9);
        // 4th order: roughly -24 dB per octave past the knee
        assert!(lp.magnitude_at(2400.0) < 1e-3);
    }

    #[test]
    fn test_highpass_response() {
        let hp = SosFilter::design(&FilterSpec::high_pass(2000.0, 4), 44100).unwrap();
        assert_abs_diff_eq!(hp.magnitude_at(22050.0), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hp.magnitude_at(2000.0), SQRT_HALF, epsilon = 1e-9);
        assert!(hp.magnitude_at(150.0) < 1e-4);
    }

    #[test]
    fn test_bandpass_response() {
        let bp = SosFilter::design(&FilterSpec::band_pass(300.0, 2000.0, 4), 44100).unwrap();
        assert_abs_diff_eq!(bp.magnitude_at(300.0), SQRT_HALF, epsilon = 1e-9);
        assert_abs_diff_eq!(bp.magnitude_at(2000.0), SQRT_HALF, epsilon = 1e-9);
        assert_abs_diff_eq!(bp.magnitude_at(1000.0), 1.0, epsilon = 1e-3);
        assert!(bp.magnitude_at(30.0) < 1e-3);
        assert!(bp.magnitude_at(15000.0) < 1e-3);
    }

    #[test]
    fn test_lowpass_passes_dc_step() {
        let lp = SosFilter::design(&FilterSpec::low_pass(300.0, 4), 8000).unwrap();
        let output = lp.filter_samples(&vec![1.0; 4000]);
        assert_abs_diff_eq!(*output.last().unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_impulse_response_decays() {
        let hp = SosFilter::design(&FilterSpec::high_pass(2000.0, 4), 44100).unwrap();
        let mut impulse = vec![0.0; 4096];
        impulse[0] = 1.0;

        let response = hp.filter_samples(&impulse);
        assert!(response[0] > 0.0);
        assert!(response[4000..].iter().all(|s| s.abs() < 1e-9));
    }

    #[test]
    fn test_rate_mismatch_rejected() {
        let lp = SosFilter::design(&FilterSpec::low_pass(300.0, 4), 44100).unwrap();
        let signal = Signal::new(vec![0.0; 16], 48000).unwrap();
        assert!(matches!(
            lp.apply(&signal),
            Err(ToneError::ChannelMismatch { .. })
        ));
    }

    #[test_case(FilterSpec::high_pass(2000.0, 4), 3000 ; "cutoff above nyquist")]
    #[test_case(FilterSpec::low_pass(4000.0, 4), 8000 ; "cutoff at nyquist")]
    #[test_case(FilterSpec::low_pass(0.0, 4), 8000 ; "zero cutoff")]
    #[test_case(FilterSpec::low_pass(f64::NAN, 4), 8000 ; "nan cutoff")]
    #[test_case(FilterSpec::band_pass(2000.0, 300.0, 4), 44100 ; "inverted band edges")]
    #[test_case(FilterSpec::band_pass(300.0, 30000.0, 4), 44100 ; "band edge above nyquist")]
    #[test_case(FilterSpec::low_pass(300.0, 3), 44100 ; "odd order")]
    #[test_case(FilterSpec::low_pass(300.0, 0), 44100 ; "zero order")]
    fn test_invalid_specs_rejected(spec: FilterSpec, sample_rate: u32) {
        assert!(matches!(
            SosFilter::design(&spec, sample_rate),
            Err(ToneError::InvalidFilterSpec { .. })
        ));
    }

    #[test]
    fn test_spec_serializes_with_type_tag() {
        let json = serde_json::to_value(FilterSpec::band_pass(300.0, 2000.0, 4)).unwrap();
        assert_eq!(json["response"]["type"], "band_pass");
        assert_eq!(json["order"], 4);
    }
}
