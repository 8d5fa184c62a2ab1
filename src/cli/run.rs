//! Run command implementation.

use super::output::{format_header, format_progress, format_results};
use super::{CliError, OutputFormat};
use bitga::ga::{Domain, EvolutionConfig, Landscape, Progress, evolve, load_config, save_outcome};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Options for the `run` command. Flags override values from `--config`.
#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    /// JSON configuration file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lower interval bound (default: -10)
    #[arg(long, allow_hyphen_values = true)]
    lo: Option<f64>,

    /// Upper interval bound (default: 10)
    #[arg(long, allow_hyphen_values = true)]
    hi: Option<f64>,

    /// Decoding precision (default: 0.005)
    #[arg(long)]
    precision: Option<f64>,

    /// Population size (default: 100)
    #[arg(short, long)]
    population: Option<usize>,

    /// Per-bit mutation rate (default: 0.05)
    #[arg(short, long)]
    mutation_rate: Option<f64>,

    /// Generation budget (default: 500)
    #[arg(short, long)]
    generations: Option<usize>,

    /// Stop after N generations without improvement
    #[arg(long)]
    patience: Option<usize>,

    /// Report progress every N generations (default: 50)
    #[arg(long)]
    report_every: Option<usize>,

    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Save the outcome as JSON
    #[arg(long)]
    save: Option<PathBuf>,

    /// Show a progress bar instead of periodic snapshots
    #[arg(long)]
    progress: bool,

    /// Suppress progress snapshots
    #[arg(short, long)]
    quiet: bool,
}

impl RunArgs {
    /// Resolve the configuration: file first, then flag overrides.
    fn resolve_config(&self) -> Result<EvolutionConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => load_config(path).map_err(|e| {
                CliError::new(format!("Failed to read config {}: {e}", path.display()))
            })?,
            None => EvolutionConfig::default(),
        };

        if let Some(lo) = self.lo {
            config.lo = lo;
        }
        if let Some(hi) = self.hi {
            config.hi = hi;
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(population) = self.population {
            config.population_size = population;
        }
        if let Some(rate) = self.mutation_rate {
            config.mutation_rate = rate;
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if self.patience.is_some() {
            config.patience = self.patience;
        }
        if let Some(interval) = self.report_every {
            config.report_interval = interval;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the outcome cannot be
/// written.
pub(crate) fn execute(args: &RunArgs) -> Result<(), CliError> {
    let mut config = args.resolve_config()?;
    let text = args.format == OutputFormat::Text;

    if text {
        let domain = Domain::new(config.lo, config.hi, config.precision)?;
        print!("{}", format_header(&domain, config.seed));
    }

    // Progress bar
    let pb = if args.progress {
        let pb = ProgressBar::new(config.generations as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} generations {msg}")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        // The bar wants every generation
        config.report_interval = 1;
        Some(pb)
    } else {
        None
    };

    let show_snapshots = text && !args.quiet && pb.is_none();
    let outcome = evolve(&config, Landscape, |progress: &Progress| {
        if let Some(pb) = &pb {
            pb.set_position(progress.generation as u64);
            pb.set_message(format!("best={:.6}", progress.best_fitness));
        } else if show_snapshots {
            print!("{}", format_progress(progress));
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_with_message(format!("best={:.6}", outcome.best.fitness));
    }

    if let Some(path) = &args.save {
        save_outcome(&outcome, path).map_err(|e| {
            CliError::new(format!("Failed to save outcome to {}: {e}", path.display()))
        })?;
        if text {
            println!("Outcome saved to: {}", path.display());
        }
    }

    match args.format {
        OutputFormat::Text => print!("{}", format_results(&outcome)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    Ok(())
}
