//! Config command implementation.

use super::CliError;
use bitga::ga::{EvolutionConfig, save_config};
use std::path::Path;

/// Execute the config command: print the default configuration, or write it
/// to `output`.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub(crate) fn execute(output: Option<&Path>) -> Result<(), CliError> {
    let config = EvolutionConfig::default();

    match output {
        Some(path) => {
            save_config(&config, path).map_err(|e| {
                CliError::new(format!("Failed to write {}: {e}", path.display()))
            })?;
            println!("Default configuration written to: {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }

    Ok(())
}
