//! Directory traversal and rename planning for casefold.
//!
//! This crate walks a directory tree and turns in-scope files into
//! [`RenamePlan`]s for the forward pass, or lists already-canonical
//! entries as candidates for the reversal pass.
//!
//! # Example
//!
//! ```rust,no_run
//! use casefold_core::NormalizeConfig;
//! use casefold_walk::Walker;
//!
//! let config = NormalizeConfig::new("/path/to/tree");
//! let walker = Walker::new(config);
//! for plan in walker.plan().unwrap() {
//!     println!("{} -> {}", plan.source.display(), plan.destination.display());
//! }
//! ```

mod walker;

pub use walker::Walker;

// Re-export core types for convenience
pub use casefold_core::{Entry, ExclusionSet, NormalizeConfig, NormalizeError, RenamePlan};
