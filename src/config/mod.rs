//! Host configuration.
//!
//! Provides the settings applied when a script host is created:
//! - Runtime limits forwarded to the engine
//! - Preloading of the bundled `Point`/`Line` classes
//! - Default caching policy for wrapper arrays
//! - JSON loading

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised while loading a [`HostConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Maximum loop iterations per evaluation, `None` leaves the engine default.
    pub loop_iteration_limit: Option<u64>,
    /// Maximum call depth, `None` leaves the engine default.
    pub recursion_limit: Option<usize>,
    /// Evaluate the bundled `Point` and `Line` classes on startup.
    pub preload_sample_classes: bool,
    /// Default identity-cache setting for wrapper arrays.
    pub cache_wrappers: bool,
    /// Extra script files evaluated after the preload, in order.
    pub scripts: Vec<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            loop_iteration_limit: None,
            recursion_limit: None,
            preload_sample_classes: true,
            cache_wrappers: true,
            scripts: Vec::new(),
        }
    }
}

impl HostConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn with_loop_iteration_limit(mut self, limit: u64) -> Self {
        self.loop_iteration_limit = Some(limit);
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    pub fn with_sample_classes(mut self, preload: bool) -> Self {
        self.preload_sample_classes = preload;
        self
    }

    pub fn with_cache_wrappers(mut self, cache: bool) -> Self {
        self.cache_wrappers = cache;
        self
    }

    pub fn with_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.scripts.push(path.into());
        self
    }
}
