//! Filesystem entry classification.

use std::path::{Path, PathBuf};

/// A filesystem entry with its derived name attributes.
///
/// Ephemeral: recomputed on each walk, never persisted. Entries whose
/// file name is not valid UTF-8 are not representable and stay out of
/// scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// File name including extension.
    pub file_name: String,
    /// File name without the final extension.
    pub stem: String,
    /// Final extension without the dot, empty when absent.
    pub extension: String,
}

impl Entry {
    /// Build an entry from a path.
    ///
    /// Returns `None` when the file name is missing or not valid UTF-8.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_str()?.to_string();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        Some(Self {
            path,
            file_name,
            stem,
            extension,
        })
    }

    /// The directory containing this entry.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }

    /// The canonical (lowercase) rendering of the file name.
    pub fn canonical_name(&self) -> String {
        self.file_name.to_lowercase()
    }

    /// Whether the file name is already in canonical form.
    ///
    /// Case-sensitive comparison of the full name, so `foo.hpp` is
    /// canonical and `Foo.hpp` is not.
    pub fn is_canonical(&self) -> bool {
        self.file_name == self.canonical_name()
    }
}

/// An immutable set of directory-path prefixes excluded from a run.
///
/// Matching is segment-aware: each prefix must match a whole leading
/// run of path components, so excluding `src/lib` does not exclude
/// `src/libfoo`.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    prefixes: Vec<PathBuf>,
}

impl ExclusionSet {
    /// Build an exclusion set from directory prefixes.
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// The configured prefixes.
    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    /// Check whether a directory falls under any excluded prefix.
    ///
    /// `Path::starts_with` compares whole components, which gives the
    /// segment-aware semantics.
    pub fn is_excluded(&self, dir: &Path) -> bool {
        self.prefixes.iter().any(|prefix| dir.starts_with(prefix))
    }
}
