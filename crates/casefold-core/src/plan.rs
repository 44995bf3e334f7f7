//! Rename plan types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A planned rename of one file to its canonical name.
///
/// Invariant: `source != destination`. Plans where the name is already
/// canonical are never created, which is what makes repeated runs
/// no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    /// Current path of the file.
    pub source: PathBuf,
    /// Path the file should end up at, in the same directory.
    pub destination: PathBuf,
}

impl RenamePlan {
    /// Create a plan, or `None` when source and destination already match.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Option<Self> {
        let source = source.into();
        let destination = destination.into();
        if source == destination {
            return None;
        }
        Some(Self {
            source,
            destination,
        })
    }
}
