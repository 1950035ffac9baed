//! Voice: the layered timbre of one tonal event (base sine, harmonics, noise).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthError};
use crate::params::{SynthParams, check_unit};

use super::delay::Echo;
use super::envelope::EnvelopeShape;
use super::noise::NoiseLayer;
use super::oscillator::Oscillator;
use super::renderer::BitDepth;

/// An integer-multiple partial of the fundamental.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Harmonic {
    /// Frequency multiple of the fundamental (2 = octave).
    pub multiple: u32,
    /// Amplitude as a fraction of the voice volume.
    pub gain: f64,
}

impl Harmonic {
    pub const fn new(multiple: u32, gain: f64) -> Self {
        Harmonic { multiple, gain }
    }

    pub fn validate(&self) -> Result<()> {
        if self.multiple == 0 {
            return Err(SynthError::invalid_int("harmonic multiple", 0));
        }
        check_unit("harmonic gain", self.gain)
    }
}

/// Everything that distinguishes one tonal sound style from another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneConfig {
    #[serde(default)]
    pub harmonics: Vec<Harmonic>,
    /// `None` renders a clean, fully deterministic tone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseLayer>,
    pub envelope: EnvelopeShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub echo: Option<Echo>,
    pub bit_depth: BitDepth,
}

impl ToneConfig {
    pub fn new(envelope: EnvelopeShape, bit_depth: BitDepth) -> Self {
        ToneConfig {
            harmonics: Vec::new(),
            noise: None,
            envelope,
            echo: None,
            bit_depth,
        }
    }

    pub fn with_harmonic(mut self, multiple: u32, gain: f64) -> Self {
        self.harmonics.push(Harmonic::new(multiple, gain));
        self
    }

    pub fn with_noise(mut self, std_dev: f64) -> Self {
        self.noise = Some(NoiseLayer::new(std_dev));
        self
    }

    pub fn with_echo(mut self, delay_seconds: f64, decay: f64) -> Self {
        self.echo = Some(Echo::new(delay_seconds, decay));
        self
    }

    /// Check every layer before any buffer is allocated.
    pub fn validate(&self) -> Result<()> {
        for harmonic in &self.harmonics {
            harmonic.validate()?;
        }
        if let Some(noise) = &self.noise {
            noise.validate()?;
        }
        self.envelope.validate()?;
        if let Some(echo) = &self.echo {
            echo.validate()?;
        }
        Ok(())
    }

    pub fn includes_noise(&self) -> bool {
        self.noise.is_some()
    }
}

/// Sums the oscillator and noise layers of a tonal event onto a buffer.
#[derive(Debug, Clone)]
pub struct Voice<'a> {
    base: Oscillator,
    config: &'a ToneConfig,
}

impl<'a> Voice<'a> {
    pub fn new(params: &SynthParams, config: &'a ToneConfig) -> Self {
        Voice {
            base: Oscillator::new(params.frequency, params.volume),
            config,
        }
    }

    /// Every sine partial of this voice, fundamental first.
    pub fn partials(&self) -> impl Iterator<Item = Oscillator> + '_ {
        std::iter::once(self.base).chain(
            self.config
                .harmonics
                .iter()
                .map(|h| self.base.harmonic(h.multiple, h.gain)),
        )
    }

    /// Add all layers onto `out`, sampled at `times`.
    ///
    /// The generator is only touched when the noise layer is enabled.
    pub fn accumulate<R: Rng + ?Sized>(
        &self,
        times: &[f64],
        out: &mut [f64],
        rng: &mut R,
    ) -> Result<()> {
        for partial in self.partials() {
            partial.accumulate(times, out);
        }
        if let Some(noise) = &self.config.noise {
            noise.accumulate(rng, out)?;
        }
        Ok(())
    }
}
