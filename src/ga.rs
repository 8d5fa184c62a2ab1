//! Binary-encoded genetic algorithm.
//!
//! Candidate solutions are fixed-length bit strings. The first half of a
//! chromosome encodes `x` and the second half `y`, each decoded onto the same
//! interval `[lo, hi]` with a bit width chosen to meet the requested precision.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Generational Controller         │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │  Population │ Objective (fitness)   │
//! ├─────────────────────────────────────┤
//! │  Chromosome → (x, y) codec          │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use bitga::ga::{EvolutionConfig, run_default};
//!
//! let config = EvolutionConfig {
//!     seed: Some(7),
//!     ..EvolutionConfig::default()
//! };
//! let outcome = run_default(&config)?;
//! println!("f({:.4}, {:.4}) = {:.6}", outcome.best.x, outcome.best.y, outcome.best.fitness);
//! # Ok::<(), bitga::GaError>(())
//! ```

mod chromosome;
mod crossover;
mod encoding;
mod evolution;
mod mutation;
mod objective;
mod persistence;
mod population;
mod selection;

pub use chromosome::Chromosome;
pub use crossover::{crossover, crossover_at};
pub use encoding::{Domain, MAX_BITS_PER_VARIABLE, bits_per_variable, decode};
pub use evolution::{
    BestIndividual, Evolution, EvolutionConfig, GenerationStats, Outcome, Progress, ProgressSink,
    State, evolve, run_default,
};
pub use mutation::{MutationRate, mutate};
pub use objective::{FITNESS_FLOOR, Landscape, Objective, landscape};
pub use persistence::{load_config, load_outcome, save_config, save_outcome};
pub use population::{Individual, Population, best_of};
pub use selection::{FitnessStats, RouletteWheel, select_parents};
