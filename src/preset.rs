//! Named sound styles.
//!
//! A style bundles the configuration of every sound class the generator
//! produces. Two styles ship built in: `arcade` (clean tones, 8-bit, with a
//! short echo) and `realistic` (noisy tones, 16-bit, dry). Custom styles load
//! from JSON with the same field names.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dsp::engine::{AmbientConfig, AmbientTone};
use crate::dsp::envelope::EnvelopeShape;
use crate::dsp::renderer::BitDepth;
use crate::dsp::voice::ToneConfig;
use crate::error::{Result, SynthError};

// ── Sound kinds ─────────────────────────────────────────────

/// The sound classes a style covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundKind {
    Footstep,
    Running,
    Ambient,
}

impl SoundKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SoundKind::Footstep => "footstep",
            SoundKind::Running => "running",
            SoundKind::Ambient => "ambient",
        }
    }
}

impl fmt::Display for SoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundKind {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "footstep" => Ok(SoundKind::Footstep),
            "running" | "run" => Ok(SoundKind::Running),
            "ambient" => Ok(SoundKind::Ambient),
            other => Err(SynthError::UnknownSound(other.to_string())),
        }
    }
}

// ── Style preset ────────────────────────────────────────────

/// Full configuration of one sound style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePreset {
    /// Identifier (e.g. "arcade").
    pub name: String,
    pub footstep: ToneConfig,
    pub running: ToneConfig,
    pub ambient: AmbientConfig,
}

/// Names accepted by [`StylePreset::by_name`].
pub const BUILTIN_STYLES: [&str; 2] = ["arcade", "realistic"];

impl StylePreset {
    /// Clean 8-bit tones with a single short echo and a very soft bed.
    pub fn arcade() -> Self {
        StylePreset {
            name: "arcade".to_string(),
            footstep: ToneConfig::new(
                EnvelopeShape::Ads {
                    attack: 0.005,
                    decay: 0.1,
                    sustain: 0.3,
                },
                BitDepth::Eight,
            )
            .with_harmonic(2, 0.3)
            .with_echo(0.1, 0.2),
            running: ToneConfig::new(
                EnvelopeShape::Ads {
                    attack: 0.003,
                    decay: 0.08,
                    sustain: 0.2,
                },
                BitDepth::Eight,
            )
            .with_harmonic(2, 0.4)
            .with_harmonic(3, 0.2)
            .with_echo(0.08, 0.15),
            ambient: AmbientConfig {
                duration: 10.0,
                noise_std_dev: 0.02,
                tones: vec![AmbientTone::new(60.0, 0.03), AmbientTone::new(120.0, 0.015)],
                fade_seconds: 0.5,
                output_gain: 0.4,
                bit_depth: BitDepth::Eight,
            },
        }
    }

    /// Noisy 16-bit tones without echo and a louder bed.
    pub fn realistic() -> Self {
        StylePreset {
            name: "realistic".to_string(),
            footstep: ToneConfig::new(
                EnvelopeShape::Ads {
                    attack: 0.005,
                    decay: 0.1,
                    sustain: 0.3,
                },
                BitDepth::Sixteen,
            )
            .with_harmonic(2, 0.3)
            .with_noise(0.1),
            running: ToneConfig::new(EnvelopeShape::SymmetricFade { fade: 0.02 }, BitDepth::Sixteen)
                .with_harmonic(2, 0.4)
                .with_harmonic(3, 0.2)
                .with_noise(0.15),
            ambient: AmbientConfig {
                duration: 10.0,
                noise_std_dev: 0.05,
                tones: vec![AmbientTone::new(60.0, 0.1), AmbientTone::new(120.0, 0.05)],
                fade_seconds: 0.5,
                output_gain: 1.0,
                bit_depth: BitDepth::Sixteen,
            },
        }
    }

    /// Look up a built-in style.
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "arcade" => Ok(Self::arcade()),
            "realistic" => Ok(Self::realistic()),
            other => Err(SynthError::UnknownPreset(other.to_string())),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a style from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The tonal configuration for `kind`, or `None` for the ambient bed.
    pub fn tone(&self, kind: SoundKind) -> Option<&ToneConfig> {
        match kind {
            SoundKind::Footstep => Some(&self.footstep),
            SoundKind::Running => Some(&self.running),
            SoundKind::Ambient => None,
        }
    }

    /// Output bit depth used for `kind`.
    pub fn bit_depth(&self, kind: SoundKind) -> BitDepth {
        match self.tone(kind) {
            Some(tone) => tone.bit_depth,
            None => self.ambient.bit_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_resolve() {
        for name in BUILTIN_STYLES {
            assert_eq!(StylePreset::by_name(name).unwrap().name, name);
        }
        assert!(matches!(
            StylePreset::by_name("lofi"),
            Err(SynthError::UnknownPreset(_))
        ));
    }

    #[test]
    fn styles_disagree_where_expected() {
        let arcade = StylePreset::arcade();
        let realistic = StylePreset::realistic();

        assert!(!arcade.footstep.includes_noise());
        assert!(!arcade.running.includes_noise());
        assert!(arcade.footstep.echo.is_some());
        assert_eq!(arcade.bit_depth(SoundKind::Ambient), BitDepth::Eight);

        assert!(realistic.footstep.includes_noise());
        assert!(realistic.running.echo.is_none());
        assert_eq!(realistic.bit_depth(SoundKind::Footstep), BitDepth::Sixteen);
        assert!(matches!(
            realistic.running.envelope,
            EnvelopeShape::SymmetricFade { .. }
        ));
        assert_eq!(realistic.ambient.output_gain, 1.0);
    }

    #[test]
    fn json_round_trip() {
        let style = StylePreset::realistic();
        let json = style.to_json().unwrap();
        assert!(json.contains("\"noiseStdDev\""));
        assert_eq!(StylePreset::from_json(&json).unwrap(), style);
    }

    #[test]
    fn malformed_json_is_preset_error() {
        let err = StylePreset::from_json(r#"{"name":"x"}"#).unwrap_err();
        assert!(matches!(err, SynthError::Preset(_)));
    }

    #[test]
    fn sound_kind_parsing() {
        assert_eq!("footstep".parse::<SoundKind>().unwrap(), SoundKind::Footstep);
        assert_eq!("run".parse::<SoundKind>().unwrap(), SoundKind::Running);
        assert!("thunder".parse::<SoundKind>().is_err());
        assert_eq!(SoundKind::Ambient.to_string(), "ambient");
    }
}
