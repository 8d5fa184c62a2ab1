//! Population initialization and fitness evaluation.

use crate::error::{GaError, GaResult};
use crate::ga::chromosome::Chromosome;
use crate::ga::encoding::Domain;
use crate::ga::objective::Objective;
use rand::Rng;

/// A chromosome paired with its fitness for the current generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// The encoded candidate.
    pub chromosome: Chromosome,
    /// Objective value at the decoded point.
    pub fitness: f64,
}

/// One generation's chromosomes, in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
}

impl Population {
    /// Create `size` random chromosomes of `length` bits.
    ///
    /// # Errors
    ///
    /// Returns [`GaError::InvalidPopulationSize`] if `size < 2`.
    pub fn initialize<R: Rng>(size: usize, length: usize, rng: &mut R) -> GaResult<Self> {
        if size < 2 {
            return Err(GaError::InvalidPopulationSize(size));
        }
        Ok(Self {
            chromosomes: (0..size).map(|_| Chromosome::random(length, rng)).collect(),
        })
    }

    /// Number of chromosomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Whether the population is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// The chromosomes in order.
    #[must_use]
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Decode and score every chromosome, preserving order.
    #[must_use]
    pub fn evaluate<O: Objective + ?Sized>(&self, domain: &Domain, objective: &O) -> Vec<Individual> {
        self.chromosomes
            .iter()
            .map(|chromosome| {
                let (x, y) = domain.decode_pair(chromosome.bits());
                Individual {
                    chromosome: chromosome.clone(),
                    fitness: objective.evaluate(x, y),
                }
            })
            .collect()
    }
}

impl From<Vec<Chromosome>> for Population {
    fn from(chromosomes: Vec<Chromosome>) -> Self {
        Self { chromosomes }
    }
}

/// The fittest individual, keeping the earliest on ties.
///
/// NaN fitness never wins. Returns `None` for an empty slice.
#[must_use]
pub fn best_of(individuals: &[Individual]) -> Option<&Individual> {
    let mut best: Option<&Individual> = None;
    for candidate in individuals {
        let improves = match best {
            None => true,
            Some(current) => current.fitness.is_nan() || candidate.fitness > current.fitness,
        };
        if improves {
            best = Some(candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;
    use crate::ga::objective::landscape;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn individual(bits: &str, fitness: f64) -> Individual {
        Individual {
            chromosome: bits.parse().unwrap(),
            fitness,
        }
    }

    #[test]
    fn test_initialize() {
        let mut rng = SmallRng::seed_from_u64(42);
        let population = Population::initialize(10, 24, &mut rng).unwrap();
        assert_eq!(population.len(), 10);
        assert!(population.chromosomes().iter().all(|c| c.len() == 24));
    }

    #[test]
    fn test_initialize_rejects_tiny_population() {
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(
            Population::initialize(1, 24, &mut rng),
            Err(GaError::InvalidPopulationSize(1))
        );
    }

    #[test]
    fn test_evaluate_preserves_order() {
        let domain = Domain::new(-10.0, 10.0, 0.005).unwrap();
        let zeros = Chromosome::from(vec![false; 24]);
        let ones = Chromosome::from(vec![true; 24]);
        let population = Population::from(vec![zeros.clone(), ones.clone(), zeros.clone()]);

        let scored = population.evaluate(&domain, &landscape);
        assert_eq!(scored.len(), 3);
        assert_eq!(scored[0].chromosome, zeros);
        assert_eq!(scored[1].chromosome, ones);
        assert_eq!(scored[0].fitness, landscape(-10.0, -10.0));
        assert_eq!(scored[1].fitness, landscape(10.0, 10.0));
        assert_eq!(scored[0].fitness, scored[2].fitness);
    }

    #[test]
    fn test_best_of_first_seen_tie() {
        let individuals = vec![
            individual("00", 1.0),
            individual("01", 3.0),
            individual("10", 3.0),
            individual("11", 2.0),
        ];
        let best = best_of(&individuals).unwrap();
        assert_eq!(best.chromosome.to_string(), "01");
    }

    #[test]
    fn test_best_of_skips_nan() {
        let individuals = vec![individual("00", f64::NAN), individual("01", 0.5)];
        assert_eq!(best_of(&individuals).unwrap().chromosome.to_string(), "01");
        assert!(best_of(&[]).is_none());
    }
}
