//! Output manifest for a single conversion
//!
//! The converter does not report what it wrote, so every `.http` file under
//! the output directory is fingerprinted before and after the run. Files that
//! appear or whose fingerprint changes are the conversion's outputs.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::{DirEntry, WalkDir};

use crate::shared::FileMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    modified: SystemTime,
    len: u64,
}

/// Fingerprints of the generated files under one directory
#[derive(Debug, Clone, Default)]
pub struct OutputSnapshot {
    files: BTreeMap<PathBuf, Fingerprint>,
}

impl OutputSnapshot {
    /// Fingerprint every file under `dir` accepted by `matcher`.
    /// A missing directory yields an empty snapshot.
    pub fn capture(dir: &Path, matcher: &FileMatcher) -> Result<Self> {
        let mut files = BTreeMap::new();
        if !dir.exists() {
            return Ok(Self { files });
        }

        let walker = WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_git_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry under {}: {e}", dir.display());
                    continue;
                }
            };
            if !entry.file_type().is_file() || !matcher.is_match(entry.file_name()) {
                continue;
            }

            let metadata = entry
                .metadata()
                .with_context(|| format!("Failed to read metadata of {}", entry.path().display()))?;
            let modified = metadata
                .modified()
                .with_context(|| format!("No modification time for {}", entry.path().display()))?;

            files.insert(
                entry.into_path(),
                Fingerprint {
                    modified,
                    len: metadata.len(),
                },
            );
        }

        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files that are new, or changed, compared to `before`, in path order
    pub fn changed_since(&self, before: &OutputSnapshot) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|(path, fingerprint)| before.files.get(*path) != Some(*fingerprint))
            .map(|(path, _)| path.clone())
            .collect()
    }
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == ".git"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let matcher = FileMatcher::http_files().unwrap();

        let snapshot = OutputSnapshot::capture(&dir.path().join("absent"), &matcher).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_only_matching_files_are_tracked() {
        let dir = TempDir::new().unwrap();
        let matcher = FileMatcher::http_files().unwrap();
        fs::write(dir.path().join("orders.http"), "GET /orders").unwrap();
        fs::write(dir.path().join("orders.yaml"), "openapi: 3.0.0").unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/stale.http"), "GET /").unwrap();

        let snapshot = OutputSnapshot::capture(dir.path(), &matcher).unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_changed_since_reports_new_and_rewritten_files() {
        let dir = TempDir::new().unwrap();
        let matcher = FileMatcher::http_files().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("old.http"), "GET /old").unwrap();
        fs::write(dir.path().join("nested/pets.http"), "GET /pets").unwrap();

        let before = OutputSnapshot::capture(dir.path(), &matcher).unwrap();

        fs::write(dir.path().join("orders.http"), "GET /orders").unwrap();
        fs::write(dir.path().join("nested/pets.http"), "GET /pets\nGET /pets/1").unwrap();

        let after = OutputSnapshot::capture(dir.path(), &matcher).unwrap();
        let changed = after.changed_since(&before);

        assert_eq!(
            changed,
            vec![
                dir.path().join("nested/pets.http"),
                dir.path().join("orders.http"),
            ]
        );
    }

    #[test]
    fn test_unchanged_tree_reports_nothing() {
        let dir = TempDir::new().unwrap();
        let matcher = FileMatcher::http_files().unwrap();
        fs::write(dir.path().join("old.http"), "GET /old").unwrap();

        let before = OutputSnapshot::capture(dir.path(), &matcher).unwrap();
        let after = OutputSnapshot::capture(dir.path(), &matcher).unwrap();

        assert!(after.changed_since(&before).is_empty());
    }
}
