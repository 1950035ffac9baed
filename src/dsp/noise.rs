//! Gaussian noise layer.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthError};

/// Zero-mean white noise with a normal amplitude distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseLayer {
    /// Standard deviation of each sample.
    pub std_dev: f64,
}

impl NoiseLayer {
    pub fn new(std_dev: f64) -> Self {
        NoiseLayer { std_dev }
    }

    pub fn validate(&self) -> Result<()> {
        if self.std_dev.is_finite() && self.std_dev >= 0.0 {
            Ok(())
        } else {
            Err(SynthError::invalid_float("noise std_dev", self.std_dev))
        }
    }

    /// Add `out.len()` independent draws onto `out`.
    pub fn accumulate<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [f64]) -> Result<()> {
        let normal = Normal::new(0.0, self.std_dev)
            .map_err(|_| SynthError::invalid_float("noise std_dev", self.std_dev))?;
        for s in out.iter_mut() {
            *s += normal.sample(rng);
        }
        Ok(())
    }
}
