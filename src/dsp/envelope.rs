//! Whole-buffer gain envelopes: attack/decay/sustain and symmetric fades.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::{check_seconds, check_unit, sample_count};

/// Envelope stages, in playback order.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    /// Attack ramp or fade-in.
    Head,
    /// Decay ramp or the unity middle.
    Body,
    /// Sustain hold or fade-out.
    Tail,
}

/// Shape of the gain curve applied to a rendered sound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EnvelopeShape {
    /// Linear 0→1 over `attack`, linear 1→`sustain` over `decay`, then hold.
    Ads {
        /// Attack time in seconds.
        attack: f64,
        /// Decay time in seconds.
        decay: f64,
        /// Sustain level [0, 1].
        sustain: f64,
    },
    /// Linear 0→1 over `fade`, unity, then linear 1→0 over `fade`.
    SymmetricFade {
        /// Fade time in seconds, applied at both ends.
        fade: f64,
    },
}

/// Sample counts of the three contiguous envelope regions.
///
/// `head + body + tail` always equals the buffer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeRegions {
    pub head: usize,
    pub body: usize,
    pub tail: usize,
}

impl EnvelopeRegions {
    pub fn len(&self) -> usize {
        self.head + self.body + self.tail
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EnvelopeShape {
    /// Times must be finite and non-negative; the sustain level must lie in [0, 1].
    pub fn validate(&self) -> Result<()> {
        match *self {
            EnvelopeShape::Ads {
                attack,
                decay,
                sustain,
            } => {
                check_seconds("attack", attack)?;
                check_seconds("decay", decay)?;
                check_unit("sustain", sustain)
            }
            EnvelopeShape::SymmetricFade { fade } => check_seconds("fade", fade),
        }
    }

    /// Split `n` samples into regions, clipping windows that do not fit.
    pub fn regions(&self, n: usize, sample_rate: u32) -> EnvelopeRegions {
        match *self {
            EnvelopeShape::Ads { attack, decay, .. } => {
                let head = sample_count(attack, sample_rate).min(n);
                let body = sample_count(decay, sample_rate).min(n - head);
                EnvelopeRegions {
                    head,
                    body,
                    tail: n - head - body,
                }
            }
            EnvelopeShape::SymmetricFade { fade } => {
                let edge = sample_count(fade, sample_rate).min(n / 2);
                EnvelopeRegions {
                    head: edge,
                    body: n - 2 * edge,
                    tail: edge,
                }
            }
        }
    }

    /// Gain multipliers for a buffer of `n` samples.
    pub fn render(&self, n: usize, sample_rate: u32) -> Vec<f64> {
        let regions = self.regions(n, sample_rate);
        let mut gains = Vec::with_capacity(n);
        for (stage, len) in [
            (Stage::Head, regions.head),
            (Stage::Body, regions.body),
            (Stage::Tail, regions.tail),
        ] {
            let (from, to) = self.levels(stage);
            ramp(&mut gains, from, to, len);
        }
        gains
    }

    /// Multiply `buffer` by this envelope in place.
    pub fn apply(&self, buffer: &mut [f64], sample_rate: u32) {
        let gains = self.render(buffer.len(), sample_rate);
        for (s, g) in buffer.iter_mut().zip(gains) {
            *s *= g;
        }
    }

    fn levels(&self, stage: Stage) -> (f64, f64) {
        let sustain = |s: f64| s.clamp(0.0, 1.0);
        match (*self, stage) {
            (EnvelopeShape::Ads { .. }, Stage::Head) => (0.0, 1.0),
            (EnvelopeShape::Ads { sustain: s, .. }, Stage::Body) => (1.0, sustain(s)),
            (EnvelopeShape::Ads { sustain: s, .. }, Stage::Tail) => (sustain(s), sustain(s)),
            (EnvelopeShape::SymmetricFade { .. }, Stage::Head) => (0.0, 1.0),
            (EnvelopeShape::SymmetricFade { .. }, Stage::Body) => (1.0, 1.0),
            (EnvelopeShape::SymmetricFade { .. }, Stage::Tail) => (1.0, 0.0),
        }
    }
}

/// Append a linear ramp of `len` points that hits both `from` and `to`.
fn ramp(out: &mut Vec<f64>, from: f64, to: f64, len: usize) {
    match len {
        0 => {}
        1 => out.push(from),
        _ => {
            let last = (len - 1) as f64;
            out.extend((0..len).map(|i| from + (to - from) * (i as f64 / last)));
        }
    }
}
