//! Sine oscillators evaluated over an explicit time axis.

use std::f64::consts::PI;

/// `n` evenly spaced instants covering `[0, duration)`.
pub fn time_axis(duration: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let step = duration / n as f64;
    (0..n).map(|i| i as f64 * step).collect()
}

/// A fixed-frequency sine with a constant amplitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub frequency: f64,
    pub amplitude: f64,
}

impl Oscillator {
    pub fn new(frequency: f64, amplitude: f64) -> Self {
        Oscillator {
            frequency,
            amplitude,
        }
    }

    /// The integer-multiple partial of this oscillator, scaled by `gain`.
    pub fn harmonic(&self, multiple: u32, gain: f64) -> Self {
        Oscillator {
            frequency: self.frequency * multiple as f64,
            amplitude: self.amplitude * gain,
        }
    }

    #[inline]
    pub fn sample_at(&self, t: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.frequency * t).sin()
    }

    /// Add this oscillator's output onto `out`, one sample per point of `times`.
    pub fn accumulate(&self, times: &[f64], out: &mut [f64]) {
        for (o, &t) in out.iter_mut().zip(times) {
            *o += self.sample_at(t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_axis_spacing() {
        let t = time_axis(0.5, 4);
        assert_eq!(t, vec![0.0, 0.125, 0.25, 0.375]);
        assert!(time_axis(1.0, 0).is_empty());
    }

    #[test]
    fn sine_zero_at_start() {
        let osc = Oscillator::new(440.0, 0.7);
        assert!(osc.sample_at(0.0).abs() < 1e-12);
    }

    #[test]
    fn peak_equals_amplitude() {
        let osc = Oscillator::new(1.0, 0.4);
        assert!((osc.sample_at(0.25) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn harmonic_scales_both() {
        let base = Oscillator::new(200.0, 0.5);
        let h = base.harmonic(3, 0.2);
        assert!((h.frequency - 600.0).abs() < 1e-12);
        assert!((h.amplitude - 0.1).abs() < 1e-12);
    }

    #[test]
    fn accumulate_sums_onto_buffer() {
        let times = time_axis(1.0, 4);
        let mut out = vec![1.0; 4];
        Oscillator::new(1.0, 1.0).accumulate(&times, &mut out);
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!((out[1] - 2.0).abs() < 1e-12);
        assert!((out[3] - 0.0).abs() < 1e-12);
    }
}
