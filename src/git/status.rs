//! Parsing of `git diff -z` listings
//!
//! Paths are taken from git's raw bytes. Git does not require file names to
//! be UTF-8, so the listing is never decoded as a whole.

use anyhow::{Result, bail};
use std::path::PathBuf;

/// Index status letter reported by `git diff --name-status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Copied,
    Modified,
    Renamed,
    Deleted,
    TypeChanged,
    Unmerged,
    Unknown,
}

impl ChangeStatus {
    fn from_token(token: &[u8]) -> Self {
        match token.first() {
            Some(b'A') => Self::Added,
            Some(b'C') => Self::Copied,
            Some(b'M') => Self::Modified,
            Some(b'R') => Self::Renamed,
            Some(b'D') => Self::Deleted,
            Some(b'T') => Self::TypeChanged,
            Some(b'U') => Self::Unmerged,
            _ => Self::Unknown,
        }
    }

    /// Whether the file exists with new content after the change
    /// (the `--diff-filter=ACMR` set)
    pub fn has_new_content(self) -> bool {
        matches!(
            self,
            Self::Added | Self::Copied | Self::Modified | Self::Renamed
        )
    }

    fn has_source_path(self) -> bool {
        matches!(self, Self::Copied | Self::Renamed)
    }
}

/// One entry of the staged change listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedChange {
    pub status: ChangeStatus,
    /// Destination path for renames and copies
    pub path: PathBuf,
}

/// Parse the output of `git diff --name-status -z`
///
/// Entries are `<status>\0<path>\0`, or `<status>\0<from>\0<to>\0` for
/// renames and copies.
pub fn parse_name_status(output: &[u8]) -> Result<Vec<StagedChange>> {
    let mut fields = split_fields(output);
    let mut changes = Vec::new();

    while let Some(token) = fields.next() {
        let status = ChangeStatus::from_token(token);
        let token = String::from_utf8_lossy(token);

        if status.has_source_path() && fields.next().is_none() {
            bail!("Truncated diff listing: missing source path after '{token}'");
        }
        let Some(path) = fields.next() else {
            bail!("Truncated diff listing: missing path after '{token}'");
        };

        if let Some(path) = path_from_bytes(path) {
            changes.push(StagedChange { status, path });
        }
    }

    Ok(changes)
}

/// Parse the output of `git diff --name-only -z`
pub fn parse_name_only(output: &[u8]) -> Vec<PathBuf> {
    split_fields(output).filter_map(path_from_bytes).collect()
}

fn split_fields(output: &[u8]) -> impl Iterator<Item = &[u8]> {
    output.split(|byte| *byte == 0).filter(|field| !field.is_empty())
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> Option<PathBuf> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Some(PathBuf::from(OsStr::from_bytes(bytes)))
}

/// Paths that are not UTF-8 cannot be represented here; they are skipped
#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> Option<PathBuf> {
    match std::str::from_utf8(bytes) {
        Ok(path) => Some(PathBuf::from(path)),
        Err(_) => {
            tracing::warn!(
                "Skipping path that is not valid UTF-8: {}",
                String::from_utf8_lossy(bytes)
            );
            None
        }
    }
}
