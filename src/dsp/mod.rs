//! DSP: Pure Rust synthesis of one-shot sound effects.
//!
//! Sounds are rendered offline into whole `f64` buffers: layers are summed,
//! shaped, echoed and clipped, then quantized to PCM by the renderer.

pub mod delay;
pub mod engine;
pub mod envelope;
pub mod mixer;
pub mod noise;
pub mod oscillator;
pub mod renderer;
pub mod voice;
