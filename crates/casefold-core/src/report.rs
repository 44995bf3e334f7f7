//! Run outcome accumulation and rendering.

use std::fmt::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Accumulated outcomes of one normalization run.
///
/// An explicit value threaded through the stages and merged at the top
/// level; append-only for the duration of a run, rendered once, then
/// dropped. Nothing here touches the filesystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// (old path, new path) pairs for forward renames.
    pub renamed: Vec<(PathBuf, PathBuf)>,
    /// (path, reason) pairs for files that could not be processed.
    pub skipped: Vec<(PathBuf, String)>,
    /// (old path, new path) pairs for heuristic reversals.
    pub reverted: Vec<(PathBuf, PathBuf)>,
}

impl RunReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed rename.
    pub fn record_renamed(&mut self, old: impl Into<PathBuf>, new: impl Into<PathBuf>) {
        self.renamed.push((old.into(), new.into()));
    }

    /// Record a file that was skipped, with the reason.
    pub fn record_skipped(&mut self, path: impl Into<PathBuf>, reason: impl Into<String>) {
        self.skipped.push((path.into(), reason.into()));
    }

    /// Record a completed reversal.
    pub fn record_reverted(&mut self, old: impl Into<PathBuf>, new: impl Into<PathBuf>) {
        self.reverted.push((old.into(), new.into()));
    }

    /// Fold another report into this one, preserving order.
    pub fn merge(&mut self, other: RunReport) {
        self.renamed.extend(other.renamed);
        self.skipped.extend(other.skipped);
        self.reverted.extend(other.reverted);
    }

    /// Whether nothing at all happened.
    pub fn is_empty(&self) -> bool {
        self.renamed.is_empty() && self.skipped.is_empty() && self.reverted.is_empty()
    }

    /// Render the end-of-run summary block.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Summary:\n");
        let _ = writeln!(out, "- Total files renamed: {}", self.renamed.len());
        let _ = writeln!(out, "- Total files skipped: {}", self.skipped.len());
        let _ = writeln!(out, "- Total files reverted: {}", self.reverted.len());

        if !self.renamed.is_empty() {
            out.push_str("\nRenamed files:\n");
            for (old, new) in &self.renamed {
                let _ = writeln!(out, "  {} -> {}", old.display(), new.display());
            }
        }

        if !self.skipped.is_empty() {
            out.push_str("\nSkipped files:\n");
            for (path, reason) in &self.skipped {
                let _ = writeln!(out, "  {} - Reason: {}", path.display(), reason);
            }
        }

        if !self.reverted.is_empty() {
            out.push_str("\nReverted files:\n");
            for (old, new) in &self.reverted {
                let _ = writeln!(out, "  {} -> {}", old.display(), new.display());
            }
        }

        out
    }
}
