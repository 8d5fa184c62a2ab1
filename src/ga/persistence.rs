//! Saving and loading run configurations and outcomes.
//!
//! Both are stored as pretty-printed JSON so they can be edited by hand and
//! diffed between runs.

use crate::ga::evolution::{EvolutionConfig, Outcome};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::Path;

/// Save a configuration.
///
/// # Errors
///
/// Returns an error if serialization or file I/O fails.
pub fn save_config(config: &EvolutionConfig, path: &Path) -> io::Result<()> {
    write_json(config, path)
}

/// Load a configuration. Missing fields take their default values.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid config.
pub fn load_config(path: &Path) -> io::Result<EvolutionConfig> {
    read_json(path)
}

/// Save the outcome of a run.
///
/// # Errors
///
/// Returns an error if serialization or file I/O fails.
pub fn save_outcome(outcome: &Outcome, path: &Path) -> io::Result<()> {
    write_json(outcome, path)
}

/// Load a previously saved outcome.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid outcome.
pub fn load_outcome(path: &Path) -> io::Result<Outcome> {
    read_json(path)
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> io::Result<T> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Serde adapter for `f64` fields that can be non-finite.
///
/// JSON has no infinity or NaN and `serde_json` writes them as `null`, which
/// then fails to load. Finite values stay plain numbers; the others are
/// written as `"inf"`, `"-inf"` or `"NaN"`.
pub(crate) mod float_repr {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub(crate) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => text
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid float {text:?}"))),
        }
    }
}
