//! Destination-conflict resolution by content comparison.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of comparing two files claiming the same destination name.
///
/// Transient: exists only for the duration of one rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMatch {
    /// Same bytes; one copy can be discarded.
    Identical,
    /// Different bytes; both must be kept.
    Different,
}

/// Compare two files, byte length first, then full contents.
///
/// The length check is the cheap short-circuit; the full read only
/// happens when the lengths agree.
pub fn compare_contents(a: &Path, b: &Path) -> io::Result<ContentMatch> {
    let len_a = fs::metadata(a)?.len();
    let len_b = fs::metadata(b)?.len();
    if len_a != len_b {
        return Ok(ContentMatch::Different);
    }

    if fs::read(a)? == fs::read(b)? {
        Ok(ContentMatch::Identical)
    } else {
        Ok(ContentMatch::Different)
    }
}

/// Derive the alternate name used to keep a diverging duplicate.
///
/// For `dir/foo.hpp` this is `dir/foo_alt.hpp`; without an extension,
/// `dir/foo_alt`.
pub fn alt_path(destination: &Path) -> PathBuf {
    let parent = destination.parent().unwrap_or(Path::new(""));
    let stem = destination
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    let name = match destination.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_alt.{}", stem, ext),
        None => format!("{}_alt", stem),
    };

    parent.join(name)
}
