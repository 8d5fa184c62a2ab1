// Allow unwrap and lossy casts in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::cast_precision_loss))]
//! Bitga: a binary-encoded genetic algorithm for two-variable maximization.
//!
//! This crate searches `[lo, hi]²` for the maximum of a real objective using:
//! - Fixed-width binary chromosomes decoded to the requested precision
//! - Roulette-wheel (fitness-proportional) parent selection
//! - Single-point crossover and per-bit mutation
//! - Stagnation-based early termination
//!
//! Runs are deterministic under a fixed seed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        CLI (bitga binary)           │
//! ├─────────────────────────────────────┤
//! │    Generational Controller          │
//! ├─────────────────────────────────────┤
//! │    GA operators and codec           │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod ga;

pub use error::{GaError, GaResult};

// Re-export the run entry points at crate root for convenience
pub use ga::{
    EvolutionConfig, Landscape, Objective, Outcome, Progress, ProgressSink, evolve, run_default,
};
