pub mod batch;
pub mod dsp;
pub mod error;
pub mod params;
pub mod preset;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

use crate::error::SynthError;
use crate::params::SynthParams;
use crate::preset::{SoundKind, StylePreset};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the stepsound-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// Render one sound of a built-in style to WAV bytes.
///
/// `frequency`, `volume` and `duration` are ignored for the ambient bed,
/// which uses the style's own configuration.
pub fn render_sound(
    kind: SoundKind,
    style: &StylePreset,
    params: &SynthParams,
    seed: u64,
) -> Result<Vec<u8>, SynthError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let samples = match style.tone(kind) {
        Some(tone) => dsp::engine::render_tone(params, tone, &mut rng)?,
        None => dsp::engine::render_ambient(&style.ambient, params.sample_rate, &mut rng)?,
    };
    dsp::renderer::render_wav(&samples, params.sample_rate, style.bit_depth(kind))
}

/// WASM-exposed: render a footstep, running step or ambient bed to a WAV byte array.
#[wasm_bindgen]
pub fn render_sound_wav(
    kind: &str,
    style: &str,
    duration: f64,
    frequency: f64,
    volume: f64,
    sample_rate: u32,
    seed: u64,
) -> Result<Vec<u8>, JsValue> {
    let kind: SoundKind = kind.parse().map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let style = StylePreset::by_name(style).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let params = SynthParams::new(duration, frequency, volume).with_sample_rate(sample_rate);
    render_sound(kind, &style, &params, seed).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: a built-in style as a JS object.
#[wasm_bindgen]
pub fn style_preset(style: &str) -> Result<JsValue, JsValue> {
    let style = StylePreset::by_name(style).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    serde_wasm_bindgen::to_value(&style).map_err(|e| JsValue::from_str(&format!("{e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footstep_wav_end_to_end() {
        let style = StylePreset::realistic();
        let params = SynthParams::new(0.3, 200.0, 0.3);
        let wav = render_sound(SoundKind::Footstep, &style, &params, 42).unwrap();

        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_size, 26460);
        assert_eq!(wav.len(), 44 + 26460);
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 44100);
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
        assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);
    }

    #[test]
    fn same_seed_same_bytes() {
        let style = StylePreset::realistic();
        let params = SynthParams::new(0.2, 220.0, 0.4);
        let a = render_sound(SoundKind::Running, &style, &params, 7).unwrap();
        let b = render_sound(SoundKind::Running, &style, &params, 7).unwrap();
        let c = render_sound(SoundKind::Running, &style, &params, 8).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn ambient_ignores_tone_params() {
        let style = StylePreset::arcade();
        let params = SynthParams::new(0.1, 1.0, 0.0);
        let wav = render_sound(SoundKind::Ambient, &style, &params, 1).unwrap();
        assert_eq!(wav.len(), 44 + 441_000);
    }

    #[test]
    fn huge_sample_rate_is_an_error() {
        let params = SynthParams::new(1e-9, 200.0, 0.3).with_sample_rate(3_000_000_000);
        let err = render_sound(SoundKind::Footstep, &StylePreset::realistic(), &params, 1)
            .unwrap_err();
        assert!(matches!(err, SynthError::InvalidParameter { name: "sample_rate", .. }));
    }

    fn tampered(edit: impl FnOnce(&mut serde_json::Value)) -> StylePreset {
        let mut json = serde_json::to_value(StylePreset::realistic()).unwrap();
        edit(&mut json);
        StylePreset::from_json(&json.to_string()).unwrap()
    }

    #[test]
    fn out_of_range_preset_values_are_rejected() {
        let params = SynthParams::new(0.2, 200.0, 0.3);
        let cases: [(SoundKind, StylePreset); 4] = [
            (SoundKind::Ambient, tampered(|j| j["ambient"]["outputGain"] = 3.0.into())),
            (SoundKind::Footstep, tampered(|j| j["footstep"]["envelope"]["sustain"] = 4.0.into())),
            (
                SoundKind::Running,
                tampered(|j| {
                    j["running"]["echo"] = serde_json::json!({"delaySeconds": 0.05, "decay": 2.0})
                }),
            ),
            (SoundKind::Running, tampered(|j| j["running"]["harmonics"][0]["gain"] = 5.0.into())),
        ];
        for (kind, style) in cases {
            let err = render_sound(kind, &style, &params, 3).unwrap_err();
            assert!(matches!(err, SynthError::InvalidParameter { .. }), "{kind}: {err}");
        }
    }

    #[test]
    fn version_matches_manifest() {
        assert_eq!(core_version(), env!("CARGO_PKG_VERSION"));
    }
}
