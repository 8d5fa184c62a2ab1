//! Single-point crossover.
//!
//! Both children take the prefix of one parent up to the cut and the suffix
//! of the other after it.

use crate::error::{GaError, GaResult};
use crate::ga::chromosome::Chromosome;
use rand::Rng;

/// Cross two parents at a uniformly chosen point in `[1, len - 1]`.
///
/// # Errors
///
/// Returns [`GaError::ChromosomeLengthMismatch`] if the parents differ in
/// length, or [`GaError::ChromosomeTooShort`] if they are shorter than 2 bits.
pub fn crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> GaResult<(Chromosome, Chromosome)> {
    check_parents(parent1, parent2)?;
    let point = rng.random_range(1..parent1.len());
    crossover_at(parent1, parent2, point)
}

/// Cross two parents at a fixed point.
///
/// `child1 = parent1[..point] + parent2[point..]` and `child2` is the
/// complementary recombination.
///
/// # Errors
///
/// Same as [`crossover`], and additionally [`GaError::InvalidCrossoverPoint`]
/// if `point` is outside `[1, len - 1]`.
pub fn crossover_at(
    parent1: &Chromosome,
    parent2: &Chromosome,
    point: usize,
) -> GaResult<(Chromosome, Chromosome)> {
    check_parents(parent1, parent2)?;
    if point == 0 || point >= parent1.len() {
        return Err(GaError::InvalidCrossoverPoint {
            point,
            len: parent1.len(),
        });
    }

    let (head1, tail1) = parent1.bits().split_at(point);
    let (head2, tail2) = parent2.bits().split_at(point);

    let child1: Vec<bool> = head1.iter().chain(tail2).copied().collect();
    let child2: Vec<bool> = head2.iter().chain(tail1).copied().collect();

    Ok((child1.into(), child2.into()))
}

fn check_parents(parent1: &Chromosome, parent2: &Chromosome) -> GaResult<()> {
    if parent1.len() != parent2.len() {
        return Err(GaError::ChromosomeLengthMismatch {
            left: parent1.len(),
            right: parent2.len(),
        });
    }
    if parent1.len() < 2 {
        return Err(GaError::ChromosomeTooShort(parent1.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn chromosome(bits: &str) -> Chromosome {
        bits.parse().unwrap()
    }

    #[test]
    fn test_crossover_at_point() {
        let p1 = chromosome("000000");
        let p2 = chromosome("111111");
        let (c1, c2) = crossover_at(&p1, &p2, 2).unwrap();
        assert_eq!(c1.to_string(), "001111");
        assert_eq!(c2.to_string(), "110000");
    }

    #[test]
    fn test_crossover_preserves_length() {
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = Chromosome::random(24, &mut rng);
        let p2 = Chromosome::random(24, &mut rng);

        for _ in 0..100 {
            let (c1, c2) = crossover(&p1, &p2, &mut rng).unwrap();
            assert_eq!(c1.len(), 24);
            assert_eq!(c2.len(), 24);
        }
    }

    #[test]
    fn test_crossover_never_copies_parent_whole() {
        // With a cut in [1, len - 1], each child has bits from both parents.
        let mut rng = SmallRng::seed_from_u64(5);
        let p1 = chromosome("0000");
        let p2 = chromosome("1111");
        for _ in 0..100 {
            let (c1, c2) = crossover(&p1, &p2, &mut rng).unwrap();
            assert_ne!(c1, p1);
            assert_ne!(c1, p2);
            assert_eq!(c2, c1.complement());
        }
    }

    #[test]
    fn test_two_bit_parents() {
        let mut rng = SmallRng::seed_from_u64(1);
        let (c1, c2) = crossover(&chromosome("01"), &chromosome("10"), &mut rng).unwrap();
        assert_eq!(c1.to_string(), "00");
        assert_eq!(c2.to_string(), "11");
    }

    #[test]
    fn test_crossover_errors() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(
            crossover(&chromosome("1"), &chromosome("0"), &mut rng),
            Err(GaError::ChromosomeTooShort(1))
        );
        assert_eq!(
            crossover(&chromosome("101"), &chromosome("10"), &mut rng),
            Err(GaError::ChromosomeLengthMismatch { left: 3, right: 2 })
        );
        assert_eq!(
            crossover_at(&chromosome("101"), &chromosome("010"), 3),
            Err(GaError::InvalidCrossoverPoint { point: 3, len: 3 })
        );
        assert_eq!(
            crossover_at(&chromosome("101"), &chromosome("010"), 0),
            Err(GaError::InvalidCrossoverPoint { point: 0, len: 3 })
        );
    }
}
