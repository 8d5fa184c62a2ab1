//! The generational controller.
//!
//! Each generation evaluates the population, updates the best-ever record,
//! selects parents by roulette wheel, breeds them with crossover and mutation,
//! and replaces the population wholesale. The run stops when the generation
//! budget is spent or when the best-ever fitness has not improved for
//! `patience` consecutive generations.

use crate::error::{GaError, GaResult};
use crate::ga::chromosome::Chromosome;
use crate::ga::crossover::crossover;
use crate::ga::encoding::Domain;
use crate::ga::mutation::{MutationRate, mutate};
use crate::ga::objective::{Landscape, Objective};
use crate::ga::persistence::float_repr;
use crate::ga::population::{Population, best_of};
use crate::ga::selection::{FitnessStats, select_parents};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Configuration for a run.
///
/// Defaults reproduce the classic setup: `[-10, 10]²` at precision 0.005,
/// 100 individuals, mutation rate 0.05, 500 generations, a report every 50
/// generations, no stagnation stop and a random seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Lower bound of both variables.
    pub lo: f64,
    /// Upper bound of both variables.
    pub hi: f64,
    /// Largest acceptable decoding step.
    pub precision: f64,
    /// Number of chromosomes per generation.
    pub population_size: usize,
    /// Per-bit flip probability.
    pub mutation_rate: f64,
    /// Maximum number of generations.
    pub generations: usize,
    /// Stop after this many consecutive generations without improvement.
    pub patience: Option<usize>,
    /// Emit progress every N generations (0 reports only the final one).
    pub report_interval: usize,
    /// RNG seed. A random seed is drawn and recorded when absent.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            lo: -10.0,
            hi: 10.0,
            precision: 0.005,
            population_size: 100,
            mutation_rate: 0.05,
            generations: 500,
            patience: None,
            report_interval: 50,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// Returns the [`GaError`] matching the first invalid parameter.
    pub fn validate(&self) -> GaResult<()> {
        Domain::new(self.lo, self.hi, self.precision)?;
        MutationRate::new(self.mutation_rate)?;
        if self.population_size < 2 {
            return Err(GaError::InvalidPopulationSize(self.population_size));
        }
        if self.generations == 0 {
            return Err(GaError::InvalidGenerationBudget);
        }
        if self.patience == Some(0) {
            return Err(GaError::InvalidPatience);
        }
        Ok(())
    }
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    /// More generations remain.
    Running,
    /// Patience ran out without improvement.
    Stagnated,
    /// The generation budget was consumed.
    Exhausted,
}

impl State {
    /// Whether the run has ended.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stagnated => write!(f, "stagnated"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Snapshot handed to a [`ProgressSink`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Generations completed so far (1-based).
    pub generation: usize,
    /// Best fitness seen in the run.
    #[serde(with = "float_repr")]
    pub best_fitness: f64,
    /// Decoded `x` of the best-ever individual.
    pub x: f64,
    /// Decoded `y` of the best-ever individual.
    pub y: f64,
}

/// Receiver of periodic progress snapshots.
///
/// Implemented for any `FnMut(&Progress)`.
pub trait ProgressSink {
    /// Called at the configured cadence and on the final generation.
    fn report(&mut self, progress: &Progress);
}

impl<F> ProgressSink for F
where
    F: FnMut(&Progress),
{
    fn report(&mut self, progress: &Progress) {
        self(progress);
    }
}

/// The best individual of a run, decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestIndividual {
    /// Raw bits.
    pub chromosome: Chromosome,
    /// Decoded first variable.
    pub x: f64,
    /// Decoded second variable.
    pub y: f64,
    /// Objective value at `(x, y)`.
    #[serde(with = "float_repr")]
    pub fitness: f64,
}

/// Per-generation statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number (1-based).
    pub generation: usize,
    /// Best fitness in this generation.
    #[serde(with = "float_repr")]
    pub best_fitness: f64,
    /// Mean fitness.
    #[serde(with = "float_repr")]
    pub mean_fitness: f64,
    /// Worst fitness.
    #[serde(with = "float_repr")]
    pub worst_fitness: f64,
    /// Fitness standard deviation.
    #[serde(with = "float_repr")]
    pub fitness_std: f64,
    /// Best fitness seen up to and including this generation.
    #[serde(with = "float_repr")]
    pub best_ever_fitness: f64,
}

/// Result of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Best-ever individual.
    pub best: BestIndividual,
    /// Terminal state that ended the run.
    pub state: State,
    /// Generations executed.
    pub generations_run: usize,
    /// Generation in which the best-ever individual first appeared.
    pub best_generation: usize,
    /// Seed that reproduces this run.
    pub seed: u64,
    /// Bits used per variable.
    pub bits_per_variable: usize,
    /// Statistics for every generation executed.
    pub history: Vec<GenerationStats>,
    /// Wall-clock time in seconds.
    pub elapsed_seconds: f64,
}

#[derive(Debug, Clone)]
struct BestRecord {
    chromosome: Chromosome,
    fitness: f64,
    generation: usize,
}

/// A run in progress.
///
/// Drive it one generation at a time with [`Evolution::step`], or to
/// completion with [`Evolution::run`].
pub struct Evolution<O> {
    config: EvolutionConfig,
    domain: Domain,
    rate: MutationRate,
    objective: O,
    seed: u64,
    rng: SmallRng,
    population: Population,
    generation: usize,
    best: Option<BestRecord>,
    stagnation: usize,
    state: State,
    history: Vec<GenerationStats>,
}

impl<O> fmt::Debug for Evolution<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evolution")
            .field("config", &self.config)
            .field("domain", &self.domain)
            .field("seed", &self.seed)
            .field("generation", &self.generation)
            .field("stagnation", &self.stagnation)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<O: Objective> Evolution<O> {
    /// Validate the configuration and create generation 0.
    ///
    /// # Errors
    ///
    /// Returns the [`GaError`] for the first invalid configuration value.
    pub fn new(config: EvolutionConfig, objective: O) -> GaResult<Self> {
        config.validate()?;
        let domain = Domain::new(config.lo, config.hi, config.precision)?;
        let rate = MutationRate::new(config.mutation_rate)?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());

        let mut rng = SmallRng::seed_from_u64(seed);
        let population =
            Population::initialize(config.population_size, domain.chromosome_length(), &mut rng)?;

        tracing::info!(
            bits_per_variable = domain.bits_per_variable(),
            chromosome_length = domain.chromosome_length(),
            population = config.population_size,
            seed,
            "starting evolution"
        );

        Ok(Self {
            config,
            domain,
            rate,
            objective,
            seed,
            rng,
            population,
            generation: 0,
            best: None,
            stagnation: 0,
            state: State::Running,
            history: Vec::with_capacity(config.generations.min(4096)),
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// Generations completed.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Encoding domain.
    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Seed driving this run.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current population.
    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Consecutive generations without improvement.
    #[must_use]
    pub fn stagnation(&self) -> usize {
        self.stagnation
    }

    /// Best-ever individual, once a generation has been evaluated.
    #[must_use]
    pub fn best(&self) -> Option<BestIndividual> {
        self.best.as_ref().map(|record| {
            let (x, y) = self.domain.decode_pair(record.chromosome.bits());
            BestIndividual {
                chromosome: record.chromosome.clone(),
                x,
                y,
                fitness: record.fitness,
            }
        })
    }

    /// Progress snapshot for the best-ever individual.
    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        self.best().map(|best| Progress {
            generation: self.generation,
            best_fitness: best.fitness,
            x: best.x,
            y: best.y,
        })
    }

    /// Run one generation. Does nothing once a terminal state is reached.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::SelectionUnderflow`] if the objective scores the
    /// whole population at zero and uniform sampling cannot supply enough
    /// parents, or a crossover error if the population holds chromosomes of
    /// different lengths. A failed step leaves the best-ever record, the
    /// stagnation counter, the history and the population untouched.
    pub fn step(&mut self) -> GaResult<State> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }

        let individuals = self.population.evaluate(&self.domain, &self.objective);
        let generation = self.generation + 1;

        let generation_best =
            best_of(&individuals).ok_or_else(|| GaError::InvalidPopulationSize(individuals.len()))?;
        let improved = self.best.as_ref().is_none_or(|best| {
            generation_best.fitness > best.fitness
                || (best.fitness.is_nan() && !generation_best.fitness.is_nan())
        });

        let size = self.config.population_size;
        let parents = select_parents(&individuals, size, &mut self.rng)?;
        let mut offspring = self.breed(&parents)?;
        offspring.truncate(size);

        if improved {
            tracing::debug!(
                generation,
                fitness = generation_best.fitness,
                "best-ever improved"
            );
            self.best = Some(BestRecord {
                chromosome: generation_best.chromosome.clone(),
                fitness: generation_best.fitness,
                generation,
            });
            self.stagnation = 0;
        } else {
            self.stagnation += 1;
        }

        let fitness: Vec<f64> = individuals.iter().map(|i| i.fitness).collect();
        let stats = FitnessStats::from_fitness(&fitness);
        let best_ever_fitness = self.best.as_ref().map_or(f64::NEG_INFINITY, |b| b.fitness);
        tracing::trace!(
            generation,
            best = stats.best_fitness,
            mean = stats.mean_fitness,
            std = stats.fitness_std,
            best_ever = best_ever_fitness,
            "generation evaluated"
        );
        self.history.push(GenerationStats {
            generation,
            best_fitness: stats.best_fitness,
            mean_fitness: stats.mean_fitness,
            worst_fitness: stats.worst_fitness,
            fitness_std: stats.fitness_std,
            best_ever_fitness,
        });

        self.population = Population::from(offspring);
        self.generation = generation;

        if self
            .config
            .patience
            .is_some_and(|patience| self.stagnation >= patience)
        {
            self.state = State::Stagnated;
        } else if self.generation >= self.config.generations {
            self.state = State::Exhausted;
        }

        Ok(self.state)
    }

    /// Pair consecutive parents into crossed and mutated children. A lone
    /// trailing parent is mutated and carried forward on its own.
    fn breed(&mut self, parents: &[Chromosome]) -> GaResult<Vec<Chromosome>> {
        let mut offspring = Vec::with_capacity(parents.len());

        for pair in parents.chunks(2) {
            match pair {
                [parent1, parent2] => {
                    let (child1, child2) = crossover(parent1, parent2, &mut self.rng)?;
                    offspring.push(mutate(&child1, self.rate, &mut self.rng));
                    offspring.push(mutate(&child2, self.rate, &mut self.rng));
                }
                [lone] => offspring.push(mutate(lone, self.rate, &mut self.rng)),
                _ => {}
            }
        }

        Ok(offspring)
    }

    /// Whether the generation just completed should be reported.
    fn report_due(&self) -> bool {
        let interval = self.config.report_interval;
        self.state.is_terminal() || (interval > 0 && self.generation.is_multiple_of(interval))
    }

    /// Step until a terminal state, reporting progress along the way.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Evolution::step`].
    pub fn run<S: ProgressSink>(mut self, mut sink: S) -> GaResult<Outcome> {
        let start = Instant::now();

        while !self.state.is_terminal() {
            self.step()?;
            if let Some(progress) = self.progress().filter(|_| self.report_due()) {
                sink.report(&progress);
            }
        }

        let best = self.best().ok_or(GaError::InvalidGenerationBudget)?;
        let best_generation = self.best.as_ref().map_or(0, |b| b.generation);

        tracing::info!(
            state = %self.state,
            generations = self.generation,
            best_fitness = best.fitness,
            best_generation,
            "evolution finished"
        );

        Ok(Outcome {
            best,
            state: self.state,
            generations_run: self.generation,
            best_generation,
            seed: self.seed,
            bits_per_variable: self.domain.bits_per_variable(),
            history: self.history,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }
}

/// Run a complete optimization.
///
/// # Errors
///
/// Returns a [`GaError`] if the configuration is invalid or selection
/// underflows.
pub fn evolve<O, S>(config: &EvolutionConfig, objective: O, sink: S) -> GaResult<Outcome>
where
    O: Objective,
    S: ProgressSink,
{
    Evolution::new(*config, objective)?.run(sink)
}

/// Run the default landscape without progress reporting.
///
/// # Errors
///
/// Returns a [`GaError`] if the configuration is invalid.
pub fn run_default(config: &EvolutionConfig) -> GaResult<Outcome> {
    evolve(config, Landscape, |_: &Progress| {})
}
