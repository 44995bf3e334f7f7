//! Best-effort reversal of a lowercase normalization.
//!
//! No manifest of original names exists, so reversal guesses. The
//! candidate sequence is ordered most-confident first: a case-differing
//! sibling on disk beats any synthesized pattern, and the pattern grid
//! is fixed and deterministic. A wrong guess (PascalCase where the
//! original was camelCase) is possible; this is speculative by design
//! and a miss is a skip, never an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use casefold_core::Entry;

use crate::rename::intermediate_path;

/// Outcome of one reversal attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertOutcome {
    /// The file was renamed to a plausible original capitalization.
    Reverted {
        destination: PathBuf,
        /// True when the name came from the pattern grid rather than a
        /// sibling found on disk.
        best_guess: bool,
    },
    /// Every candidate existed or failed; the file was left untouched.
    NoCandidate,
}

/// Capitalize the first character, leaving the rest unchanged.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join underscore segments, capitalizing each one.
fn pascal_case(s: &str) -> String {
    s.split('_').map(capitalize).collect()
}

/// Join underscore segments, capitalizing all but the first.
fn camel_case(s: &str) -> String {
    s.split('_')
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_string()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

/// Generate the ordered capitalization guesses for an already-canonical
/// entry, most confident first, without duplicates.
///
/// Stem transforms (capitalize-first, all-uppercase, camelCase,
/// PascalCase) are paired with the uppercase and title-case extension
/// variants; the all-uppercase and capitalized stems are also tried
/// with the extension left as-is. The current name never appears in the
/// output.
pub fn candidate_names(entry: &Entry) -> Vec<String> {
    let stem = entry.stem.as_str();
    let ext = entry.extension.as_str();

    let stem_transforms: [fn(&str) -> String; 4] = [
        capitalize,
        |s| s.to_uppercase(),
        camel_case,
        pascal_case,
    ];
    let ext_variants = [ext.to_uppercase(), capitalize(ext)];

    let mut names = Vec::new();
    for transform in stem_transforms {
        let candidate_stem = transform(stem);
        if candidate_stem == stem {
            continue;
        }
        for variant in &ext_variants {
            names.push(format!("{}.{}", candidate_stem, variant));
        }
    }
    names.push(format!("{}.{}", stem.to_uppercase(), ext));
    names.push(format!("{}.{}", capitalize(stem), ext));

    // Keep the first occurrence so the sequence stays in confidence
    // order and is restartable.
    let mut deduped = Vec::new();
    for name in names {
        if name != entry.file_name && !deduped.contains(&name) {
            deduped.push(name);
        }
    }
    deduped
}

/// Find a same-directory file whose name matches case-insensitively
/// but differs in case from the canonical form.
fn find_case_sibling(entry: &Entry) -> Option<PathBuf> {
    let dir = entry.dir();
    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "cannot list directory for sibling lookup");
            return None;
        }
    };

    for sibling in read_dir.flatten() {
        let Some(name) = sibling.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name != entry.file_name && name.to_lowercase() == entry.file_name {
            return Some(dir.join(name));
        }
    }
    None
}

/// Move the entry to `candidate` through an intermediate name, refusing
/// to overwrite.
///
/// Existence is checked after the source is parked under the
/// intermediate name: at that point a surviving `candidate` entry is a
/// real distinct file, not a case alias of the source, and the move is
/// rolled back. An up-front `exists()` test cannot make that
/// distinction on a case-insensitive filesystem.
fn try_candidate(entry: &Entry, candidate: &Path) -> io::Result<bool> {
    let intermediate = intermediate_path(&entry.path);
    fs::rename(&entry.path, &intermediate)?;

    if candidate.exists() {
        fs::rename(&intermediate, &entry.path)?;
        return Ok(false);
    }

    match fs::rename(&intermediate, candidate) {
        Ok(()) => Ok(true),
        Err(err) => {
            if let Err(restore_err) = fs::rename(&intermediate, &entry.path) {
                tracing::warn!(
                    source = %entry.path.display(),
                    intermediate = %intermediate.display(),
                    error = %restore_err,
                    "could not restore source after failed reversal"
                );
            }
            Err(err)
        }
    }
}

/// Attempt to revert one already-canonical entry.
///
/// Candidates are tried in confidence order; a candidate that exists or
/// whose rename fails falls through to the next. Exhaustion leaves the
/// file untouched.
pub fn revert_entry(entry: &Entry) -> RevertOutcome {
    if let Some(sibling) = find_case_sibling(entry) {
        match try_candidate(entry, &sibling) {
            Ok(true) => {
                return RevertOutcome::Reverted {
                    destination: sibling,
                    best_guess: false,
                };
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(
                    path = %entry.path.display(),
                    candidate = %sibling.display(),
                    error = %err,
                    "sibling reversal failed"
                );
            }
        }
    }

    for name in candidate_names(entry) {
        let candidate = entry.dir().join(&name);
        match try_candidate(entry, &candidate) {
            Ok(true) => {
                return RevertOutcome::Reverted {
                    destination: candidate,
                    best_guess: true,
                };
            }
            Ok(false) => continue,
            Err(err) => {
                tracing::warn!(
                    path = %entry.path.display(),
                    candidate = %candidate.display(),
                    error = %err,
                    "reversal candidate failed"
                );
            }
        }
    }

    RevertOutcome::NoCandidate
}
