//! Synthesis parameters shared by every sound class.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthError};

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Highest accepted sample rate; keeps the 16-bit WAV byte rate within `u32`.
pub const MAX_SAMPLE_RATE: u32 = u32::MAX / 2;

/// Input to a single tonal synthesis call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthParams {
    /// Length of the sound in seconds.
    pub duration: f64,
    /// Samples per second.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Fundamental frequency in Hz.
    pub frequency: f64,
    /// Linear gain [0, 1].
    pub volume: f64,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

impl SynthParams {
    pub fn new(duration: f64, frequency: f64, volume: f64) -> Self {
        SynthParams {
            duration,
            sample_rate: DEFAULT_SAMPLE_RATE,
            frequency,
            volume,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Reject anything that cannot produce a meaningful buffer.
    pub fn validate(&self) -> Result<()> {
        check_timing(self.duration, self.sample_rate)?;
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(SynthError::invalid_float("frequency", self.frequency));
        }
        check_unit("volume", self.volume)
    }

    /// `round(duration * sample_rate)`.
    pub fn sample_count(&self) -> usize {
        sample_count(self.duration, self.sample_rate)
    }
}

/// Validate a duration/sample-rate pair.
pub fn check_timing(duration: f64, sample_rate: u32) -> Result<()> {
    if !(duration.is_finite() && duration > 0.0) {
        return Err(SynthError::invalid_float("duration", duration));
    }
    if sample_rate == 0 || sample_rate > MAX_SAMPLE_RATE {
        return Err(SynthError::invalid_int("sample_rate", sample_rate as u64));
    }
    Ok(())
}

/// A time in seconds: finite and not negative.
pub(crate) fn check_seconds(name: &'static str, seconds: f64) -> Result<()> {
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(())
    } else {
        Err(SynthError::invalid_float(name, seconds))
    }
}

/// A gain or level inside [0, 1].
pub(crate) fn check_unit(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SynthError::invalid_float(name, value))
    }
}

/// Number of samples covering `seconds` at `sample_rate`, rounded to nearest.
pub fn sample_count(seconds: f64, sample_rate: u32) -> usize {
    (seconds * sample_rate as f64).round().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_rounds() {
        assert_eq!(SynthParams::new(0.3, 200.0, 0.3).sample_count(), 13230);
        assert_eq!(SynthParams::new(0.35, 200.0, 0.3).sample_count(), 15435);
        assert_eq!(sample_count(0.0000113, 44100), 0);
        assert_eq!(sample_count(0.0000114, 44100), 1);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(SynthParams::new(0.0, 200.0, 0.3).validate().is_err());
        assert!(SynthParams::new(-1.0, 200.0, 0.3).validate().is_err());
        assert!(SynthParams::new(f64::NAN, 200.0, 0.3).validate().is_err());
        assert!(SynthParams::new(0.2, 0.0, 0.3).validate().is_err());
        assert!(SynthParams::new(0.2, 200.0, 1.5).validate().is_err());
        assert!(
            SynthParams::new(0.2, 200.0, 0.3)
                .with_sample_rate(0)
                .validate()
                .is_err()
        );
        assert!(SynthParams::new(0.2, 200.0, 0.3).validate().is_ok());
    }

    #[test]
    fn sample_rate_upper_bound() {
        assert!(check_timing(0.1, MAX_SAMPLE_RATE).is_ok());
        let err = check_timing(1e-9, 3_000_000_000).unwrap_err();
        assert!(matches!(err, SynthError::InvalidParameter { name: "sample_rate", .. }));
    }

    #[test]
    fn unit_and_seconds_checks() {
        assert!(check_unit("gain", 0.0).is_ok());
        assert!(check_unit("gain", 1.0).is_ok());
        assert!(check_unit("gain", 1.0001).is_err());
        assert!(check_unit("gain", f64::NAN).is_err());
        assert!(check_seconds("fade", 0.0).is_ok());
        assert!(check_seconds("fade", -0.1).is_err());
        assert!(check_seconds("fade", f64::INFINITY).is_err());
    }

    #[test]
    fn sample_rate_defaults_in_json() {
        let p: SynthParams =
            serde_json::from_str(r#"{"duration":0.2,"frequency":120,"volume":0.5}"#).unwrap();
        assert_eq!(p.sample_rate, DEFAULT_SAMPLE_RATE);
    }
}
