//! Selection of the specification files a hook run has to convert

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::git::StagedChange;
use crate::shared::FileMatcher;

/// Staged specification files with new content (added, copied, modified or
/// renamed), in the order git listed them
pub fn staged_spec_files(changes: &[StagedChange], matcher: &FileMatcher) -> Vec<PathBuf> {
    select(
        changes
            .iter()
            .filter(|change| change.status.has_new_content())
            .map(|change| change.path.as_path()),
        matcher,
    )
}

/// Specification files among the paths changed between two refs
pub fn changed_spec_files(paths: &[PathBuf], matcher: &FileMatcher) -> Vec<PathBuf> {
    select(paths.iter().map(PathBuf::as_path), matcher)
}

fn select<'a, I>(paths: I, matcher: &FileMatcher) -> Vec<PathBuf>
where
    I: Iterator<Item = &'a Path>,
{
    let mut seen = HashSet::new();
    paths
        .filter(|path| matcher.is_match(path))
        .filter(|path| seen.insert(path.to_path_buf()))
        .map(Path::to_path_buf)
        .collect()
}
