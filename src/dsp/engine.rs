//! Synthesis engine: renders tonal events and the ambient bed to sample buffers.
//!
//! Every render takes its random generator explicitly. Calls share no state,
//! so a seeded generator reproduces a buffer exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthError};
use crate::params::{SynthParams, check_seconds, check_timing, check_unit, sample_count};

use super::envelope::EnvelopeShape;
use super::mixer::Mixer;
use super::noise::NoiseLayer;
use super::oscillator::{Oscillator, time_axis};
use super::renderer::BitDepth;
use super::voice::{ToneConfig, Voice};

/// Render a footstep-style tonal event.
///
/// Layers are summed, shaped by the envelope, optionally echoed, then clipped
/// to [-1, 1]. The result has exactly `params.sample_count()` samples.
pub fn render_tone<R: Rng + ?Sized>(
    params: &SynthParams,
    config: &ToneConfig,
    rng: &mut R,
) -> Result<Vec<f64>> {
    params.validate()?;
    config.validate()?;
    let n = params.sample_count();
    let times = time_axis(params.duration, n);

    let mut mixer = Mixer::new(n);
    Voice::new(params, config).accumulate(&times, mixer.buffer_mut(), rng)?;
    config.envelope.apply(mixer.buffer_mut(), params.sample_rate);
    if let Some(echo) = &config.echo {
        echo.process_block(mixer.buffer_mut(), params.sample_rate);
    }

    tracing::debug!(
        samples = n,
        frequency = params.frequency,
        noise = config.includes_noise(),
        echo = config.echo.is_some(),
        "rendered tone"
    );
    Ok(mixer.output())
}

/// A fixed low-frequency sine in the ambient bed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbientTone {
    pub frequency: f64,
    pub amplitude: f64,
}

impl AmbientTone {
    pub const fn new(frequency: f64, amplitude: f64) -> Self {
        AmbientTone {
            frequency,
            amplitude,
        }
    }
}

/// Configuration of the background bed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbientConfig {
    /// Length in seconds.
    pub duration: f64,
    /// Standard deviation of the Gaussian noise floor.
    pub noise_std_dev: f64,
    #[serde(default)]
    pub tones: Vec<AmbientTone>,
    /// Fade-in and fade-out length in seconds.
    pub fade_seconds: f64,
    /// Gain applied after clipping.
    pub output_gain: f64,
    pub bit_depth: BitDepth,
}

impl AmbientConfig {
    /// Check the bed's levels and times before any buffer is allocated.
    ///
    /// Tone amplitudes only need to be finite: the sum is clipped before
    /// `output_gain`, which must lie in [0, 1].
    pub fn validate(&self, sample_rate: u32) -> Result<()> {
        check_timing(self.duration, sample_rate)?;
        NoiseLayer::new(self.noise_std_dev).validate()?;
        for tone in &self.tones {
            check_seconds("ambient tone frequency", tone.frequency)?;
            if !tone.amplitude.is_finite() {
                return Err(SynthError::invalid_float("ambient tone amplitude", tone.amplitude));
            }
        }
        self.envelope().validate()?;
        check_unit("output_gain", self.output_gain)
    }

    pub fn envelope(&self) -> EnvelopeShape {
        EnvelopeShape::SymmetricFade {
            fade: self.fade_seconds,
        }
    }
}

/// Render the ambient bed: noise plus low tones, faded in and out, clipped,
/// then scaled by `output_gain`.
pub fn render_ambient<R: Rng + ?Sized>(
    config: &AmbientConfig,
    sample_rate: u32,
    rng: &mut R,
) -> Result<Vec<f64>> {
    config.validate(sample_rate)?;
    let n = sample_count(config.duration, sample_rate);
    let times = time_axis(config.duration, n);

    let mut mixer = Mixer::new(n);
    mixer.master_gain = config.output_gain;
    NoiseLayer::new(config.noise_std_dev).accumulate(rng, mixer.buffer_mut())?;
    for tone in &config.tones {
        Oscillator::new(tone.frequency, tone.amplitude).accumulate(&times, mixer.buffer_mut());
    }
    config.envelope().apply(mixer.buffer_mut(), sample_rate);

    tracing::debug!(samples = n, tones = config.tones.len(), "rendered ambient bed");
    Ok(mixer.output())
}
