#![no_main]

use arbitrary::Arbitrary;
use bitga::ga::{Chromosome, Individual, select_parents};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Structured input for selection fuzzing.
#[derive(Arbitrary, Debug)]
struct SelectionInput {
    /// Fitness values, including zero, negative and non-finite ones.
    fitness: Vec<f64>,
    /// Number of parents to draw (capped).
    count: u8,
    /// RNG seed.
    seed: u64,
}

fuzz_target!(|input: SelectionInput| {
    let individuals: Vec<Individual> = input
        .fitness
        .iter()
        .take(256)
        .enumerate()
        .map(|(i, &fitness)| Individual {
            chromosome: Chromosome::from(vec![i % 2 == 0; 4]),
            fitness,
        })
        .collect();

    let count = usize::from(input.count);
    let mut rng = SmallRng::seed_from_u64(input.seed);

    // Selection must return exactly `count` parents or a clean error, never panic
    match select_parents(&individuals, count, &mut rng) {
        Ok(parents) => assert_eq!(parents.len(), count),
        Err(_) => assert!(count > individuals.len()),
    }
});
