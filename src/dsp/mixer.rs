//! Mixer: sums layers into one buffer, then hard-clips and applies output gain.

/// A summing bus for a single rendered sound.
#[derive(Debug, Clone)]
pub struct Mixer {
    /// Gain applied after clipping.
    pub master_gain: f64,
    buffer: Vec<f64>,
}

impl Mixer {
    /// A silent bus of `num_samples`.
    pub fn new(num_samples: usize) -> Self {
        Mixer {
            master_gain: 1.0,
            buffer: vec![0.0; num_samples],
        }
    }

    /// Mutable access for layers and in-place effects.
    pub fn buffer_mut(&mut self) -> &mut [f64] {
        &mut self.buffer
    }

    /// Consume the bus: clip every sample to [-1, 1], then scale by `master_gain`.
    pub fn output(self) -> Vec<f64> {
        let gain = self.master_gain;
        self.buffer
            .into_iter()
            .map(|s| hard_clip(s) * gain)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Hard clipper: plain min/max to [-1, 1].
#[inline]
pub fn hard_clip(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}
