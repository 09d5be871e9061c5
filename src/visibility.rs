//! Visibility configuration: which known services actually get gathered
//!
//! The config is a shown/hidden partition over service keys. Selection is
//! opt-in: a service is gathered only when it is both present in the
//! directory and explicitly marked shown. A key absent from both
//! partitions is excluded, and a config key with no directory entry is
//! inert rather than an error.

use crate::errors::{Result, StatusError};
use crate::sources::StatusSource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Shown/hidden partition over service keys
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisibilityConfig {
    pub shown: Vec<String>,
    pub hidden: Vec<String>,
}

impl VisibilityConfig {
    /// Build a config from an explicit shown/hidden partition of services
    pub fn generate(
        shown: &[Box<dyn StatusSource>],
        hidden: &[Box<dyn StatusSource>],
    ) -> Self {
        Self {
            shown: shown.iter().map(|s| s.key().to_string()).collect(),
            hidden: hidden.iter().map(|s| s.key().to_string()).collect(),
        }
    }

    /// Build a config treating the whole directory as shown
    pub fn generate_all(directory: &[Box<dyn StatusSource>]) -> Self {
        Self::generate(directory, &[])
    }

    /// Reject configs where a key appears in both partitions.
    /// Run at load time, before any gathering starts.
    pub fn validate(&self) -> Result<()> {
        let ambiguous: Vec<&str> = self
            .shown
            .iter()
            .filter(|key| self.hidden.contains(*key))
            .map(String::as_str)
            .collect();

        if ambiguous.is_empty() {
            Ok(())
        } else {
            Err(StatusError::AmbiguousVisibility(ambiguous.join(", ")))
        }
    }

    pub fn is_shown(&self, key: &str) -> bool {
        self.shown.iter().any(|k| k == key)
    }

    /// Filter a directory down to the services that should be gathered.
    ///
    /// Result order follows directory order. Hidden keys and keys unknown
    /// to the config are excluded alike.
    pub fn select_for_gathering<'a>(
        &self,
        directory: &'a [Box<dyn StatusSource>],
    ) -> Vec<&'a dyn StatusSource> {
        directory
            .iter()
            .filter(|source| self.is_shown(source.key()))
            .map(|source| source.as_ref())
            .collect()
    }

    /// Config keys with no matching directory entry. Inert for selection;
    /// the CLI surfaces them as a warning so stale entries get noticed.
    pub fn unknown_keys(&self, directory: &[Box<dyn StatusSource>]) -> Vec<String> {
        self.shown
            .iter()
            .chain(self.hidden.iter())
            .filter(|key| !directory.iter().any(|s| s.key() == key.as_str()))
            .cloned()
            .collect()
    }
}

/// Load and validate a visibility config from a JSON file
pub fn load_config(path: impl AsRef<Path>) -> Result<VisibilityConfig> {
    let path = path.as_ref();
    debug!("Loading visibility config from {}", path.display());

    let contents = fs::read_to_string(path)?;
    let config: VisibilityConfig = serde_json::from_str(&contents)?;
    config.validate()?;

    Ok(config)
}

/// Save a visibility config as pretty-printed JSON
pub fn save_config(config: &VisibilityConfig, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    debug!("Saving visibility config to {}", path.display());

    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)?;

    Ok(())
}
