//! Run configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for a normalization run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct NormalizeConfig {
    /// Root directory to process.
    pub root: PathBuf,

    /// Directory prefixes excluded from normalization.
    ///
    /// Matching is path-segment-aware: excluding `src/lib` does not
    /// exclude `src/libfoo`.
    #[builder(default)]
    #[serde(default)]
    pub exclude: Vec<PathBuf>,

    /// Directories to run the reversal heuristic in instead of
    /// forward normalization.
    #[builder(default)]
    #[serde(default)]
    pub revert: Vec<PathBuf>,

    /// Target file extensions, compared case-insensitively.
    #[builder(default = "default_extensions()")]
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["cpp".to_string(), "hpp".to_string()]
}

impl NormalizeConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if let Some(ref extensions) = self.extensions {
            if extensions.is_empty() {
                return Err("Extension set cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl NormalizeConfig {
    /// Create a new config builder.
    pub fn builder() -> NormalizeConfigBuilder {
        NormalizeConfigBuilder::default()
    }

    /// Create a simple config for processing a root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude: Vec::new(),
            revert: Vec::new(),
            extensions: default_extensions(),
        }
    }

    /// Check whether a file extension belongs to the target set.
    pub fn matches_extension(&self, extension: &str) -> bool {
        let lowered = extension.to_lowercase();
        self.extensions.iter().any(|e| e.to_lowercase() == lowered)
    }
}
