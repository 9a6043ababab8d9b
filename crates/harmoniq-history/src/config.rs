use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Edit history settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of commands kept in the chain. Unbounded when unset.
    pub max_depth: Option<NonZeroUsize>,
    /// Report successful operations to the message sink, not only failures.
    pub log_successes: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            log_successes: true,
        }
    }
}

impl HistoryConfig {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = NonZeroUsize::new(depth);
        self
    }

    pub fn with_log_successes(mut self, enabled: bool) -> Self {
        self.log_successes = enabled;
        self
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read history config {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("{} is not a valid history config", path.display()))
    }

    /// Loads `history.json` from the user configuration directory, falling
    /// back to defaults when it is missing or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(?err, "failed to load history settings");
                Self::default()
            }
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push("HarmoniqStudio");
    base.push("history.json");
    Some(base)
}
