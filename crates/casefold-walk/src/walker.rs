//! Serial directory walker producing rename plans.

use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};

use casefold_core::{Entry, ExclusionSet, NormalizeConfig, NormalizeError, RenamePlan};

/// Walks a directory tree and yields candidate renames.
///
/// Traversal is serial and synchronous; entries come back in whatever
/// order the filesystem returns them, so no ordering is guaranteed
/// across platforms.
pub struct Walker {
    config: NormalizeConfig,
    exclusions: ExclusionSet,
}

impl Walker {
    /// Create a walker for the given configuration.
    ///
    /// Revert directories never take part in the forward pass — it
    /// would immediately re-lowercase what was just reverted — so they
    /// join the exclusion set here.
    pub fn new(config: NormalizeConfig) -> Self {
        let prefixes = config.exclude.iter().chain(config.revert.iter()).cloned();
        let exclusions = ExclusionSet::new(prefixes);
        Self { config, exclusions }
    }

    /// Lazily yield a rename plan for every in-scope file whose name is
    /// not yet canonical.
    ///
    /// One pass per call; the returned iterator is finite and not
    /// restartable. Re-invoke to rescan. Fails up front when the root
    /// is not a directory; unreadable entries during the walk are
    /// logged and skipped, never fatal.
    pub fn plan(&self) -> Result<impl Iterator<Item = RenamePlan> + '_, NormalizeError> {
        let root = self.config.root.clone();
        if !root.is_dir() {
            return Err(NormalizeError::NotADirectory { path: root });
        }

        let iter = walk(root).filter_map(move |entry| {
            if !self.in_scope(&entry) || self.exclusions.is_excluded(entry.dir()) {
                return None;
            }
            if entry.is_canonical() {
                return None;
            }
            let destination = entry.dir().join(entry.canonical_name());
            RenamePlan::new(entry.path.clone(), destination)
        });
        Ok(iter)
    }

    /// Collect the reversal candidates under one directory: in-scope
    /// files whose name is already entirely lowercase.
    ///
    /// Exclusions do not apply here; the caller asked for this
    /// directory explicitly. The list is collected before any mutation
    /// so the reversal pass never observes its own renames.
    pub fn revert_candidates(&self, dir: &Path) -> Vec<Entry> {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "revert target is not a directory");
            return Vec::new();
        }

        walk(dir.to_path_buf())
            .filter(|entry| self.in_scope(entry) && entry.is_canonical())
            .collect()
    }

    fn in_scope(&self, entry: &Entry) -> bool {
        !entry.extension.is_empty() && self.config.matches_extension(&entry.extension)
    }
}

/// Serial walk over the regular files under `root`.
fn walk(root: PathBuf) -> impl Iterator<Item = Entry> {
    WalkDir::new(root)
        .parallelism(Parallelism::Serial)
        .skip_hidden(false)
        .follow_links(false)
        .into_iter()
        .filter_map(|result| {
            let dir_entry = match result {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable entry");
                    return None;
                }
            };
            if !dir_entry.file_type().is_file() {
                return None;
            }
            // Non-UTF-8 names fall out here and stay untouched.
            Entry::from_path(dir_entry.path())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"contents").unwrap();
    }

    #[test]
    fn test_plan_emits_only_non_canonical_in_scope_files() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("Mixed.hpp"));
        touch(&root.join("lower.hpp"));
        touch(&root.join("UPPER.txt"));

        let walker = Walker::new(NormalizeConfig::new(root));
        let plans: Vec<_> = walker.plan().unwrap().collect();

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].source, root.join("Mixed.hpp"));
        assert_eq!(plans[0].destination, root.join("mixed.hpp"));
    }

    #[test]
    fn test_plan_recurses_into_subdirectories() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        touch(&root.join("a/b/Deep.cpp"));

        let walker = Walker::new(NormalizeConfig::new(root));
        let plans: Vec<_> = walker.plan().unwrap().collect();

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].destination, root.join("a/b/deep.cpp"));
    }

    #[test]
    fn test_plan_rejects_missing_root() {
        let tmp = TempDir::new().unwrap();
        let walker = Walker::new(NormalizeConfig::new(tmp.path().join("nope")));
        assert!(matches!(
            walker.plan().err(),
            Some(NormalizeError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_excluded_directories_produce_no_plans() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::create_dir_all(root.join("libfoo")).unwrap();
        touch(&root.join("lib/Skipped.hpp"));
        touch(&root.join("libfoo/Kept.hpp"));

        let config = NormalizeConfig::builder()
            .root(root)
            .exclude(vec![root.join("lib")])
            .build()
            .unwrap();
        let walker = Walker::new(config);
        let plans: Vec<_> = walker.plan().unwrap().collect();

        // Segment-aware: lib/ is excluded, libfoo/ is not.
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].source, root.join("libfoo/Kept.hpp"));
    }

    #[test]
    fn test_revert_directories_are_skipped_by_the_forward_pass() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("restored")).unwrap();
        touch(&root.join("restored/Recovered.hpp"));
        touch(&root.join("Elsewhere.hpp"));

        let config = NormalizeConfig::builder()
            .root(root)
            .revert(vec![root.join("restored")])
            .build()
            .unwrap();
        let walker = Walker::new(config);
        let plans: Vec<_> = walker.plan().unwrap().collect();

        // Forward planning must not reach into the revert directory,
        // or it would re-lowercase whatever reversal just produced.
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].source, root.join("Elsewhere.hpp"));
    }

    #[test]
    fn test_revert_candidates_are_canonical_in_scope_files() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("already.hpp"));
        touch(&root.join("NotYet.hpp"));
        touch(&root.join("other.txt"));

        let walker = Walker::new(NormalizeConfig::new(root));
        let candidates = walker.revert_candidates(root);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].file_name, "already.hpp");
    }

    #[test]
    fn test_revert_candidates_of_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let walker = Walker::new(NormalizeConfig::new(tmp.path()));
        assert!(walker.revert_candidates(&tmp.path().join("gone")).is_empty());
    }
}
