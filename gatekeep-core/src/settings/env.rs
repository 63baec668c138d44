//! Environment variable access for settings resolution.
//!
//! Validation code never reads the process environment directly; it takes an
//! [`EnvLookup`] so tests can substitute a deterministic [`MapEnv`].

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

/// Source of environment variable values.
pub trait EnvLookup: Send + Sync {
    /// Value of the variable, or `None` if it is unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads from the host process environment.
///
/// Variables holding non-UTF-8 data are reported as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory environment, mainly for tests.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvLookup for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MapEnv {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Load `.env` from the current directory (or a parent) into the process environment.
///
/// Already-set variables are never overwritten. A missing file is not an error.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "Failed to load .env file"),
    }
}

/// Load a specific env file into the process environment.
///
/// Unlike [`load_dotenv`], a missing file is reported as an error.
pub fn load_dotenv_from(path: &Path) -> Result<(), super::SettingsError> {
    dotenvy::from_path(path)
        .map_err(|e| super::SettingsError::Load(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), "Loaded env file");
    Ok(())
}
