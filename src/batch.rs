//! Batch generation of the standard sound set into a directory.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::dsp::engine::{render_ambient, render_tone};
use crate::dsp::renderer::{quantize, write_wav};
use crate::error::{Result, SynthError};
use crate::params::{DEFAULT_SAMPLE_RATE, SynthParams};
use crate::preset::{SoundKind, StylePreset};

/// Number of footstep variations in the standard set.
pub const FOOTSTEP_VARIANTS: usize = 4;
/// Number of running variations in the standard set.
pub const RUNNING_VARIANTS: usize = 3;

/// One file to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub kind: SoundKind,
    /// Tonal parameters; `None` for the ambient bed.
    pub params: Option<SynthParams>,
    /// File name relative to the output directory.
    pub file_name: String,
}

/// A style plus the list of files to render with it.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub style: StylePreset,
    pub sample_rate: u32,
    pub jobs: Vec<Job>,
}

impl BatchPlan {
    /// Four footsteps, three running steps and one ambient bed, each
    /// variation slightly higher, longer and louder than the last.
    pub fn standard(style: StylePreset) -> Self {
        Self::standard_at(style, DEFAULT_SAMPLE_RATE)
    }

    pub fn standard_at(style: StylePreset, sample_rate: u32) -> Self {
        let mut jobs = Vec::with_capacity(FOOTSTEP_VARIANTS + RUNNING_VARIANTS + 1);

        for i in 0..FOOTSTEP_VARIANTS {
            let step = i as f64;
            let params = SynthParams::new(0.3 + step * 0.05, 180.0 + step * 20.0, 0.3 + step * 0.05)
                .with_sample_rate(sample_rate);
            jobs.push(Job {
                kind: SoundKind::Footstep,
                params: Some(params),
                file_name: format!("footstep_{}.wav", i + 1),
            });
        }

        for i in 0..RUNNING_VARIANTS {
            let step = i as f64;
            let params = SynthParams::new(0.2 + step * 0.03, 220.0 + step * 30.0, 0.4 + step * 0.05)
                .with_sample_rate(sample_rate);
            jobs.push(Job {
                kind: SoundKind::Running,
                params: Some(params),
                file_name: format!("running_{}.wav", i + 1),
            });
        }

        jobs.push(Job {
            kind: SoundKind::Ambient,
            params: None,
            file_name: "ambient.wav".to_string(),
        });

        BatchPlan {
            style,
            sample_rate,
            jobs,
        }
    }

    /// Render one job to a clipped float buffer.
    pub fn render<R: Rng + ?Sized>(&self, job: &Job, rng: &mut R) -> Result<Vec<f64>> {
        match (self.style.tone(job.kind), job.params) {
            (Some(tone), Some(params)) => render_tone(&params, tone, rng),
            (None, _) => render_ambient(&self.style.ambient, self.sample_rate, rng),
            (Some(_), None) => Err(SynthError::UnknownSound(format!(
                "{} job '{}' has no parameters",
                job.kind, job.file_name
            ))),
        }
    }

    /// Render one job and write it under `out_dir`.
    pub fn write_job<R: Rng + ?Sized>(
        &self,
        job: &Job,
        out_dir: &Path,
        rng: &mut R,
    ) -> Result<PathBuf> {
        let samples = self.render(job, rng)?;
        let sample_rate = job.params.map_or(self.sample_rate, |p| p.sample_rate);
        let pcm = quantize(&samples, self.style.bit_depth(job.kind));
        let path = out_dir.join(&job.file_name);
        write_wav(&path, &pcm, sample_rate)?;
        Ok(path)
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, SynthError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Render every job in `plan` into `out_dir`, one at a time.
///
/// The directory is created if needed; failing to create it aborts the run.
/// A job that fails is logged and recorded, and the remaining jobs still run.
pub fn generate<R: Rng + ?Sized>(
    plan: &BatchPlan,
    out_dir: &Path,
    rng: &mut R,
) -> Result<BatchReport> {
    std::fs::create_dir_all(out_dir)?;
    tracing::info!(
        style = %plan.style.name,
        dir = %out_dir.display(),
        jobs = plan.jobs.len(),
        "generating sounds"
    );

    let mut report = BatchReport::default();
    for job in &plan.jobs {
        match plan.write_job(job, out_dir, rng) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "generated");
                report.written.push(path);
            }
            Err(e) => {
                tracing::warn!(file = %job.file_name, error = %e, "failed to generate");
                report.failed.push((job.file_name.clone(), e));
            }
        }
    }
    Ok(report)
}
