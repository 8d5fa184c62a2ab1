//! Independent per-bit mutation.

use crate::error::{GaError, GaResult};
use crate::ga::chromosome::Chromosome;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-bit flip probability, guaranteed to lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MutationRate(f64);

impl MutationRate {
    /// Validate a flip probability.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidRate`] if `rate` is outside `[0, 1]` or NaN.
    pub fn new(rate: f64) -> GaResult<Self> {
        if (0.0..=1.0).contains(&rate) {
            Ok(Self(rate))
        } else {
            Err(GaError::InvalidRate(rate))
        }
    }

    /// The probability as a float.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for MutationRate {
    fn default() -> Self {
        Self(0.05)
    }
}

impl TryFrom<f64> for MutationRate {
    type Error = GaError;

    fn try_from(rate: f64) -> GaResult<Self> {
        Self::new(rate)
    }
}

impl From<MutationRate> for f64 {
    fn from(rate: MutationRate) -> Self {
        rate.0
    }
}

/// Return a copy of `chromosome` with each bit flipped independently with
/// probability `rate`.
#[must_use]
pub fn mutate<R: Rng>(chromosome: &Chromosome, rate: MutationRate, rng: &mut R) -> Chromosome {
    let mut bits = chromosome.bits().to_vec();
    for bit in &mut bits {
        if rng.random_bool(rate.get()) {
            *bit = !*bit;
        }
    }
    bits.into()
}
