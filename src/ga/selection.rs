//! Roulette-wheel parent selection.
//!
//! Each individual owns a slice of the wheel proportional to its fitness.
//! Parents are drawn with replacement by spinning the wheel once per parent.

// Statistics divide by population counts
#![allow(clippy::cast_precision_loss)]

use crate::error::{GaError, GaResult};
use crate::ga::chromosome::Chromosome;
use crate::ga::population::Individual;
use rand::Rng;
use rand::seq::index;

/// Cumulative fitness distribution over a population.
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    /// Upper bound of each individual's slice on `[0, 1]`.
    bounds: Vec<f64>,
}

impl RouletteWheel {
    /// Build a wheel from fitness values.
    ///
    /// Returns `None` when no individual has a positive share, since no
    /// proportional distribution exists then.
    #[must_use]
    pub fn new(fitness: &[f64]) -> Option<Self> {
        let weights = weights(fitness);
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let mut cumulative = 0.0;
        let mut bounds: Vec<f64> = weights
            .iter()
            .map(|w| {
                cumulative += w / total;
                cumulative
            })
            .collect();

        // Rounding can leave the last bound just under 1.0. Pinning from the
        // last weighted slice keeps zero-weight tails unreachable.
        if let Some(last) = weights.iter().rposition(|&w| w > 0.0) {
            bounds[last..].fill(1.0);
        }

        Some(Self { bounds })
    }

    /// Number of slices on the wheel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Whether the wheel has no slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Spin once and return the index of the selected individual.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> usize {
        let sample = rng.random::<f64>().clamp(0.0, 1.0);
        self.bounds
            .iter()
            .position(|&bound| sample <= bound)
            .unwrap_or(self.bounds.len().saturating_sub(1))
    }
}

/// Selection weights on a common scale.
///
/// Fitness is divided by the largest finite value so the total cannot
/// overflow. Infinite fitness takes the whole wheel. NaN and non-positive
/// fitness get no share.
fn weights(fitness: &[f64]) -> Vec<f64> {
    if fitness.iter().any(|&f| f.is_infinite() && f > 0.0) {
        return fitness
            .iter()
            .map(|&f| if f.is_infinite() && f > 0.0 { 1.0 } else { 0.0 })
            .collect();
    }

    let max = fitness
        .iter()
        .copied()
        .filter(|f| f.is_finite())
        .fold(0.0, f64::max);
    fitness
        .iter()
        .map(|&f| if max > 0.0 && f > 0.0 { f / max } else { 0.0 })
        .collect()
}

/// Select `count` parents with probability proportional to fitness.
///
/// If no individual has a positive share (possible with a pluggable
/// objective), falls back to drawing `count` distinct individuals uniformly.
///
/// # Errors
///
/// Returns [`GaError::SelectionUnderflow`] if the fallback is taken and
/// `count` exceeds the number of individuals.
pub fn select_parents<R: Rng>(
    individuals: &[Individual],
    count: usize,
    rng: &mut R,
) -> GaResult<Vec<Chromosome>> {
    let fitness: Vec<f64> = individuals.iter().map(|i| i.fitness).collect();

    if let Some(wheel) = RouletteWheel::new(&fitness) {
        return Ok((0..count)
            .map(|_| individuals[wheel.spin(rng)].chromosome.clone())
            .collect());
    }

    tracing::warn!(
        individuals = individuals.len(),
        count,
        "total fitness is not positive, sampling parents uniformly"
    );

    if count > individuals.len() {
        return Err(GaError::SelectionUnderflow {
            requested: count,
            available: individuals.len(),
        });
    }

    Ok(index::sample(rng, individuals.len(), count)
        .into_iter()
        .map(|i| individuals[i].chromosome.clone())
        .collect())
}

/// Summary statistics over one generation's fitness values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessStats {
    /// Mean fitness of the population.
    pub mean_fitness: f64,
    /// Best fitness in the population.
    pub best_fitness: f64,
    /// Worst fitness in the population.
    pub worst_fitness: f64,
    /// Standard deviation of fitness.
    pub fitness_std: f64,
}

impl FitnessStats {
    /// Calculate statistics from fitness values.
    #[must_use]
    pub fn from_fitness(fitness: &[f64]) -> Self {
        if fitness.is_empty() {
            return Self {
                mean_fitness: 0.0,
                best_fitness: 0.0,
                worst_fitness: 0.0,
                fitness_std: 0.0,
            };
        }

        let sum: f64 = fitness.iter().sum();
        let mean = sum / fitness.len() as f64;

        let best = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = fitness.iter().copied().fold(f64::INFINITY, f64::min);

        let variance: f64 = fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>()
            / fitness.len() as f64;

        Self {
            mean_fitness: mean,
            best_fitness: best,
            worst_fitness: worst,
            fitness_std: variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn population(fitness: &[f64]) -> Vec<Individual> {
        fitness
            .iter()
            .enumerate()
            .map(|(i, &fitness)| Individual {
                chromosome: Chromosome::from(
                    (0..8).map(|bit| (i >> (7 - bit)) & 1 == 1).collect::<Vec<_>>(),
                ),
                fitness,
            })
            .collect()
    }

    #[test]
    fn test_wheel_last_bound_is_one() {
        let wheel = RouletteWheel::new(&[0.1; 10]).unwrap();
        assert_eq!(wheel.len(), 10);
        assert_eq!(wheel.bounds[9], 1.0);
        assert!(wheel.bounds.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_wheel_rejects_zero_total() {
        assert!(RouletteWheel::new(&[0.0, 0.0]).is_none());
        assert!(RouletteWheel::new(&[]).is_none());
        assert!(RouletteWheel::new(&[f64::NAN, -1.0]).is_none());
    }

    #[test]
    fn test_wheel_ignores_nan_and_negative() {
        let wheel = RouletteWheel::new(&[f64::NAN, 1.0, -3.0]).unwrap();
        assert_eq!(wheel.bounds, vec![0.0, 1.0, 1.0]);

        let mut rng = SmallRng::seed_from_u64(8);
        for _ in 0..1_000 {
            assert_eq!(wheel.spin(&mut rng), 1);
        }
    }

    #[test]
    fn test_huge_fitness_stays_proportional() {
        let mut rng = SmallRng::seed_from_u64(17);
        let individuals = population(&[1e308, 1e308, 1.0]);

        let parents = select_parents(&individuals, 4, &mut rng).unwrap();
        assert_eq!(parents.len(), 4);

        let individuals = population(&[1e308, 1e308, 1.0, 1.0]);
        let parents = select_parents(&individuals, 4_000, &mut rng).unwrap();
        let light = parents
            .iter()
            .filter(|p| **p == individuals[2].chromosome || **p == individuals[3].chromosome)
            .count();
        assert_eq!(light, 0);

        let heavy = parents
            .iter()
            .filter(|p| **p == individuals[0].chromosome)
            .count();
        let share = heavy as f64 / parents.len() as f64;
        assert!((share - 0.5).abs() < 0.05, "share was {share}");
    }

    #[test]
    fn test_infinite_fitness_takes_the_wheel() {
        let mut rng = SmallRng::seed_from_u64(4);
        let individuals = population(&[1.0, f64::INFINITY, 5.0]);
        let parents = select_parents(&individuals, 500, &mut rng).unwrap();
        assert!(parents.iter().all(|p| *p == individuals[1].chromosome));
    }

    #[test]
    fn test_spin_always_in_range() {
        let mut rng = SmallRng::seed_from_u64(3);
        let wheel = RouletteWheel::new(&[1e-4, 3.0, 1e-4]).unwrap();
        for _ in 0..10_000 {
            assert!(wheel.spin(&mut rng) < 3);
        }
    }

    #[test]
    fn test_uniform_fitness_is_roughly_uniform() {
        let mut rng = SmallRng::seed_from_u64(42);
        let n = 10;
        let draws = 100_000;
        let wheel = RouletteWheel::new(&vec![1.0; n]).unwrap();

        let mut counts = vec![0usize; n];
        for _ in 0..draws {
            counts[wheel.spin(&mut rng)] += 1;
        }

        let expected = (draws / n) as f64;
        for count in counts {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(deviation < 0.05, "count {count} too far from {expected}");
        }
    }

    #[test]
    fn test_selection_is_proportional() {
        let mut rng = SmallRng::seed_from_u64(123);
        let individuals = population(&[1.0, 3.0]);
        let parents = select_parents(&individuals, 20_000, &mut rng).unwrap();

        let heavy = parents
            .iter()
            .filter(|p| **p == individuals[1].chromosome)
            .count();
        let share = heavy as f64 / parents.len() as f64;
        assert!((share - 0.75).abs() < 0.02, "share was {share}");
    }

    #[test]
    fn test_zero_fitness_falls_back_to_distinct_sample() {
        let mut rng = SmallRng::seed_from_u64(9);
        let individuals = population(&[0.0; 6]);
        let parents = select_parents(&individuals, 6, &mut rng).unwrap();

        assert_eq!(parents.len(), 6);
        let mut seen: Vec<String> = parents.iter().map(ToString::to_string).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_zero_fitness_underflow() {
        let mut rng = SmallRng::seed_from_u64(9);
        let individuals = population(&[0.0; 3]);
        assert_eq!(
            select_parents(&individuals, 4, &mut rng),
            Err(GaError::SelectionUnderflow {
                requested: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_fitness_stats() {
        let stats = FitnessStats::from_fitness(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert!((stats.mean_fitness - 3.0).abs() < 0.001);
        assert!((stats.best_fitness - 5.0).abs() < 0.001);
        assert!((stats.worst_fitness - 1.0).abs() < 0.001);
        assert!((stats.fitness_std - 2f64.sqrt()).abs() < 0.001);
    }
}
