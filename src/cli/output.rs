//! Output formatting utilities for CLI.

use bitga::ga::{Domain, Outcome, Progress};
use std::fmt::Write;

/// Encoding summary printed before a run starts.
pub(super) fn format_header(domain: &Domain, seed: Option<u64>) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Number of bits per variable: {}", domain.bits_per_variable());
    let _ = writeln!(output, "Chromosome length: {}", domain.chromosome_length());
    if let Some(seed) = seed {
        let _ = writeln!(output, "Seed: {seed}");
    }
    output.push('\n');

    output
}

/// A periodic progress snapshot.
pub(super) fn format_progress(progress: &Progress) -> String {
    format!(
        "Generation {}:\n  Best fitness so far: {:.6}\n  Corresponding (x, y): ({:.4}, {:.4})\n\n",
        progress.generation, progress.best_fitness, progress.x, progress.y
    )
}

/// Final results block.
pub(super) fn format_results(outcome: &Outcome) -> String {
    let mut output = String::new();

    output.push_str("\n--- Genetic Algorithm Results ---\n");
    output.push_str("Global Maximum found:\n");
    let _ = writeln!(output, "  x = {:.4}", outcome.best.x);
    let _ = writeln!(output, "  y = {:.4}", outcome.best.y);
    let _ = writeln!(output, "  f(x,y) = {:.6}", outcome.best.fitness);
    let _ = writeln!(output, "  Chromosome: {}", outcome.best.chromosome);
    let _ = writeln!(
        output,
        "  Stopped: {} after {} generations (best found in generation {})",
        outcome.state, outcome.generations_run, outcome.best_generation
    );
    let _ = writeln!(output, "  Seed: {}", outcome.seed);
    let _ = writeln!(output, "  Elapsed time: {:.2}s", outcome.elapsed_seconds);

    output
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use bitga::ga::{EvolutionConfig, run_default};

    #[test]
    fn test_format_header() {
        let domain = Domain::new(-10.0, 10.0, 0.005).unwrap();
        let header = format_header(&domain, None);
        assert!(header.contains("Number of bits per variable: 12"));
        assert!(header.contains("Chromosome length: 24"));
        assert!(!header.contains("Seed"));
    }

    #[test]
    fn test_format_progress() {
        let text = format_progress(&Progress {
            generation: 50,
            best_fitness: 22_027.465_894_7,
            x: -10.0,
            y: 0.002_442,
        });
        assert!(text.starts_with("Generation 50:"));
        assert!(text.contains("Best fitness so far: 22027.465895"));
        assert!(text.contains("(-10.0000, 0.0024)"));
    }

    #[test]
    fn test_format_results() {
        let outcome = run_default(&EvolutionConfig {
            population_size: 10,
            generations: 3,
            seed: Some(11),
            ..EvolutionConfig::default()
        })
        .unwrap();
        let text = format_results(&outcome);
        assert!(text.contains("--- Genetic Algorithm Results ---"));
        assert!(text.contains(&format!("Chromosome: {}", outcome.best.chromosome)));
        assert!(text.contains("Stopped: exhausted after 3 generations"));
        assert!(text.contains("Seed: 11"));
    }
}
