//! Rename engine for casefold.
//!
//! This crate implements the two mutating operations of the tool:
//!
//! - **Forward rename** ([`apply_plan`]): moves a file to its canonical
//!   lowercase name through a uniquely-named intermediate, so the rename
//!   works even when the filesystem treats `Foo.hpp` and `foo.hpp` as
//!   the same directory entry. Destination collisions are resolved by
//!   content comparison and never lose data.
//! - **Reversal** ([`revert_entry`]): best-effort reconstruction of a
//!   plausible pre-normalization capitalization from an ordered list of
//!   guesses, never overwriting an existing file.

mod conflict;
mod rename;
mod revert;

pub use conflict::{alt_path, compare_contents, ContentMatch};
pub use rename::{apply_plan, RenameOutcome};
pub use revert::{candidate_names, revert_entry, RevertOutcome};
