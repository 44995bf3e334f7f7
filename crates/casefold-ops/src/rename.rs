//! Collision-safe rename primitive.
//!
//! On a case-insensitive filesystem, renaming `Foo.hpp` directly to
//! `foo.hpp` can be a no-op or fail outright because the two names hit
//! the same directory entry. Every rename here is therefore routed
//! through a uniquely-named intermediate, which guarantees the old
//! entry is actually removed before the new one is created.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use casefold_core::{NormalizeError, RenamePlan};

use crate::conflict::{alt_path, compare_contents, ContentMatch};

/// Finalized lifecycle of one rename plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The file now lives at the destination.
    Applied {
        destination: PathBuf,
        /// A byte-identical file already held the destination name and
        /// was discarded.
        duplicate_discarded: bool,
    },
    /// The rename succeeded but a diverging file also claimed the
    /// destination; both were kept.
    Conflicted {
        destination: PathBuf,
        /// Where the pre-existing diverging content ended up.
        kept_as: PathBuf,
    },
    /// The rename failed; the source was restored where possible.
    Failed { reason: String },
}

/// Build a unique sibling name with the given prefix, keeping the
/// original extension.
fn token_path(original: &Path, prefix: &str) -> PathBuf {
    let parent = original.parent().unwrap_or(Path::new(""));
    let token = Uuid::new_v4().simple();
    let name = match original.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", prefix, token, ext),
        None => format!("{}_{}", prefix, token),
    };
    parent.join(name)
}

/// Unique intermediate name for breaking the case-aliasing hazard.
pub(crate) fn intermediate_path(source: &Path) -> PathBuf {
    token_path(source, "temp")
}

/// Unique backup name for an entry displaced from the destination.
fn backup_path(destination: &Path) -> PathBuf {
    token_path(destination, "backup")
}

/// Apply one rename plan.
///
/// Filesystem mutations only: renames, plus at most one delete of a
/// backup that was verified byte-identical to the destination. Any
/// error triggers a best-effort restore of the source from the
/// intermediate, and surfaces as [`RenameOutcome::Failed`] with the
/// reason classified through [`NormalizeError::io`]; a failed restore
/// never masks the original failure.
pub fn apply_plan(plan: &RenamePlan) -> RenameOutcome {
    let intermediate = intermediate_path(&plan.source);

    // Step 1: move the source out of the way under a unique name.
    if let Err(err) = fs::rename(&plan.source, &intermediate) {
        return RenameOutcome::Failed {
            reason: NormalizeError::io(&plan.source, err).to_string(),
        };
    }

    match finish(plan, &intermediate) {
        Ok(outcome) => outcome,
        Err(err) => {
            if intermediate.exists() {
                if let Err(restore_err) = fs::rename(&intermediate, &plan.source) {
                    tracing::warn!(
                        source = %plan.source.display(),
                        intermediate = %intermediate.display(),
                        error = %restore_err,
                        "could not restore source after failed rename"
                    );
                }
            }
            RenameOutcome::Failed {
                reason: NormalizeError::io(&plan.destination, err).to_string(),
            }
        }
    }
}

/// Steps 2-4: displace any existing destination, land the intermediate,
/// then resolve the displaced file by content.
fn finish(plan: &RenamePlan, intermediate: &Path) -> io::Result<RenameOutcome> {
    // With the source parked under the intermediate name, an existing
    // destination entry is a real second file, not a case alias.
    let backup = if plan.destination.exists() {
        let backup = backup_path(&plan.destination);
        fs::rename(&plan.destination, &backup)?;
        Some(backup)
    } else {
        None
    };

    fs::rename(intermediate, &plan.destination)?;

    let Some(backup) = backup else {
        return Ok(RenameOutcome::Applied {
            destination: plan.destination.clone(),
            duplicate_discarded: false,
        });
    };

    match compare_contents(&backup, &plan.destination)? {
        ContentMatch::Identical => {
            fs::remove_file(&backup)?;
            Ok(RenameOutcome::Applied {
                destination: plan.destination.clone(),
                duplicate_discarded: true,
            })
        }
        ContentMatch::Different => {
            let kept_as = alt_path(&plan.destination);
            fs::rename(&backup, &kept_as)?;
            Ok(RenameOutcome::Conflicted {
                destination: plan.destination.clone(),
                kept_as,
            })
        }
    }
}
