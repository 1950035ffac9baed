//! Echo effect: a single feedforward delay tap.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::{check_seconds, check_unit, sample_count};

/// One delayed, attenuated copy of the signal added back onto itself.
///
/// Unlike a feedback delay line the echo does not repeat: each output sample
/// only sees the *dry* sample `delay` earlier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Echo {
    /// Delay time in seconds.
    pub delay_seconds: f64,
    /// Gain of the delayed copy.
    pub decay: f64,
}

impl Echo {
    pub fn new(delay_seconds: f64, decay: f64) -> Self {
        Echo {
            delay_seconds,
            decay,
        }
    }

    /// The delay must be a valid time and the tap gain must lie in [0, 1].
    pub fn validate(&self) -> Result<()> {
        check_seconds("echo delaySeconds", self.delay_seconds)?;
        check_unit("echo decay", self.decay)
    }

    /// Delay length in samples at `sample_rate`.
    pub fn delay_samples(&self, sample_rate: u32) -> usize {
        sample_count(self.delay_seconds, sample_rate)
    }

    /// Apply the echo in place. Buffers no longer than the delay are untouched.
    pub fn process_block(&self, buffer: &mut [f64], sample_rate: u32) {
        let delay = self.delay_samples(sample_rate);
        if buffer.len() <= delay {
            return;
        }
        // Walk backwards so buffer[i - delay] is still the dry value.
        for i in (delay..buffer.len()).rev() {
            buffer[i] += buffer[i - delay] * self.decay;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_echoes_once() {
        let echo = Echo::new(0.01, 0.5);
        let mut buf = vec![0.0; 40];
        buf[0] = 1.0;
        // 1000 Hz: 10 samples
        echo.process_block(&mut buf, 1000);

        assert_eq!(buf[0], 1.0);
        assert_eq!(buf[10], 0.5);
        assert_eq!(buf[20], 0.0, "echo must not feed back");
        assert_eq!(buf.iter().filter(|&&x| x != 0.0).count(), 2);
    }

    #[test]
    fn matches_tap_formula() {
        let echo = Echo::new(0.003, 0.2);
        let dry: Vec<f64> = (0..50).map(|i| ((i * 7) % 11) as f64 / 11.0 - 0.5).collect();
        let mut wet = dry.clone();
        echo.process_block(&mut wet, 1000);

        for i in 0..dry.len() {
            let expected = if i >= 3 { dry[i] + 0.2 * dry[i - 3] } else { dry[i] };
            assert!((wet[i] - expected).abs() < 1e-12, "sample {i}");
        }
    }

    #[test]
    fn validate_bounds() {
        assert!(Echo::new(0.1, 0.2).validate().is_ok());
        assert!(Echo::new(0.1, 2.0).validate().is_err());
        assert!(Echo::new(-0.1, 0.2).validate().is_err());
        assert!(Echo::new(f64::NAN, 0.2).validate().is_err());
    }

    #[test]
    fn short_buffer_untouched() {
        let echo = Echo::new(0.1, 0.2);
        let mut buf = vec![0.25; 4410];
        echo.process_block(&mut buf, 44100);
        assert!(buf.iter().all(|&x| x == 0.25));
    }
}
