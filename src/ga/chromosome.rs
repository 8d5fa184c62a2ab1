//! Fixed-length bit string chromosomes.

use crate::error::{GaError, GaResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A candidate solution: an ordered sequence of bits.
///
/// Serializes as a string of `0` and `1` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Chromosome {
    bits: Vec<bool>,
}

impl Chromosome {
    /// Generate a chromosome with every bit drawn uniformly from {0, 1}.
    #[must_use]
    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..length).map(|_| rng.random_bool(0.5)).collect(),
        }
    }

    /// Number of bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the chromosome has no bits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The raw bits, most significant first within each variable.
    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Bitwise complement.
    #[must_use]
    pub fn complement(&self) -> Self {
        Self {
            bits: self.bits.iter().map(|bit| !bit).collect(),
        }
    }
}

impl From<Vec<bool>> for Chromosome {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromStr for Chromosome {
    type Err = GaError;

    fn from_str(s: &str) -> GaResult<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(GaError::MalformedChromosome(other)),
            })
            .collect::<GaResult<Vec<bool>>>()
            .map(Self::from)
    }
}

impl TryFrom<String> for Chromosome {
    type Error = GaError;

    fn try_from(s: String) -> GaResult<Self> {
        s.parse()
    }
}

impl From<Chromosome> for String {
    fn from(chromosome: Chromosome) -> Self {
        chromosome.to_string()
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_random_length() {
        let mut rng = SmallRng::seed_from_u64(42);
        let chromosome = Chromosome::random(24, &mut rng);
        assert_eq!(chromosome.len(), 24);
        assert!(!chromosome.is_empty());
    }

    #[test]
    fn test_random_is_seeded() {
        let a = Chromosome::random(64, &mut SmallRng::seed_from_u64(7));
        let b = Chromosome::random(64, &mut SmallRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_and_parse() {
        let chromosome: Chromosome = "0110".parse().unwrap();
        assert_eq!(chromosome.bits(), &[false, true, true, false]);
        assert_eq!(chromosome.to_string(), "0110");
        assert_eq!(chromosome.complement().to_string(), "1001");
    }

    #[test]
    fn test_parse_rejects_other_chars() {
        let err = "01x1".parse::<Chromosome>().unwrap_err();
        assert_eq!(err, GaError::MalformedChromosome('x'));
    }

    #[test]
    fn test_serde_as_string() {
        let chromosome: Chromosome = "1010".parse().unwrap();
        let json = serde_json::to_string(&chromosome).unwrap();
        assert_eq!(json, "\"1010\"");
        let back: Chromosome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chromosome);
    }
}
