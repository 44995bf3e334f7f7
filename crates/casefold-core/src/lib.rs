//! Core types and traits for casefold.
//!
//! This crate provides the fundamental data structures used throughout
//! the casefold workspace: run configuration, path classification,
//! rename plans, and the run report.

mod config;
mod entry;
mod error;
mod plan;
mod report;

pub use config::{NormalizeConfig, NormalizeConfigBuilder};
pub use entry::{Entry, ExclusionSet};
pub use error::NormalizeError;
pub use plan::RenamePlan;
pub use report::RunReport;
