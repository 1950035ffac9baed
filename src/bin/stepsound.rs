//! stepsound: writes the standard footstep, running and ambient set as WAV files.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use stepsound_core::batch::{BatchPlan, generate};
use stepsound_core::params::DEFAULT_SAMPLE_RATE;
use stepsound_core::preset::StylePreset;

#[derive(Debug, Parser)]
#[command(name = "stepsound", version, about = "Generate footstep and ambient sound effects")]
struct Args {
    /// Directory the WAV files are written to.
    #[arg(short, long, default_value = "sounds")]
    out_dir: PathBuf,

    /// Built-in style: arcade or realistic.
    #[arg(short, long, default_value = "arcade", conflicts_with = "preset")]
    style: String,

    /// JSON style file, used instead of a built-in style.
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Seed for the noise layers. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let style = match &args.preset {
        Some(path) => StylePreset::load(path)
            .with_context(|| format!("loading style from {}", path.display()))?,
        None => StylePreset::by_name(&args.style)?,
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let plan = BatchPlan::standard_at(style, args.sample_rate);
    let report = generate(&plan, &args.out_dir, &mut rng)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    println!("Generated {} files in {}", report.written.len(), args.out_dir.display());
    for path in &report.written {
        println!("- {}", path.display());
    }

    if !report.is_success() {
        for (file, err) in &report.failed {
            eprintln!("failed: {file}: {err}");
        }
        bail!("{} of {} files failed", report.failed.len(), plan.jobs.len());
    }
    Ok(())
}
