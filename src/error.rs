//! Error types for the genetic algorithm.

/// Errors raised when a caller hands the GA inputs it cannot work with.
///
/// Every variant is detected at the boundary of the operation that would
/// violate it. None of them are transient, so there is no retry policy.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GaError {
    /// Interval bounds or precision cannot produce a usable encoding.
    #[error("invalid domain [{lo}, {hi}] with precision {precision}: {reason}")]
    InvalidDomain {
        /// Lower interval bound.
        lo: f64,
        /// Upper interval bound.
        hi: f64,
        /// Requested decoding precision.
        precision: f64,
        /// What is wrong with the combination.
        reason: &'static str,
    },
    /// Population must hold at least two chromosomes.
    #[error("population size must be at least 2, got {0}")]
    InvalidPopulationSize(usize),
    /// Mutation rate outside `[0, 1]`.
    #[error("mutation rate must be within [0, 1], got {0}")]
    InvalidRate(f64),
    /// Generation budget of zero leaves nothing to evolve.
    #[error("generation budget must be at least 1")]
    InvalidGenerationBudget,
    /// Stagnation patience of zero would stop before the first generation.
    #[error("stagnation patience must be at least 1")]
    InvalidPatience,
    /// More parents requested than there are individuals to sample without
    /// replacement.
    #[error("cannot sample {requested} parents without replacement from {available} individuals")]
    SelectionUnderflow {
        /// Number of parents requested.
        requested: usize,
        /// Number of individuals available.
        available: usize,
    },
    /// Crossover needs at least one bit on each side of the cut.
    #[error("chromosome of length {0} is too short for crossover")]
    ChromosomeTooShort(usize),
    /// A fixed crossover cut must leave at least one bit on each side.
    #[error("crossover point {point} is outside [1, {len}) for chromosomes of length {len}")]
    InvalidCrossoverPoint {
        /// Requested cut index.
        point: usize,
        /// Length of the parents.
        len: usize,
    },
    /// Crossover parents must have the same length.
    #[error("chromosome lengths differ: {left} vs {right}")]
    ChromosomeLengthMismatch {
        /// Length of the first parent.
        left: usize,
        /// Length of the second parent.
        right: usize,
    },
    /// A bit string contained something other than `0` or `1`.
    #[error("malformed chromosome: unexpected character {0:?}")]
    MalformedChromosome(char),
}

/// Result type for GA operations.
pub type GaResult<T> = Result<T, GaError>;
