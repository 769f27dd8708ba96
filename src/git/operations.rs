use anyhow::{Context, Result, bail};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::status::{parse_name_only, parse_name_status};
use super::{ChangeSource, GitRepo, StagedChange};

/// Object id git passes for "no previous commit" (e.g. right after a clone)
pub const NULL_REF: &str = "0000000000000000000000000000000000000000";

/// Hash of the empty tree, used as the diff base for a null ref
pub const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

impl GitRepo {
    /// Run `git` in the working tree root and return its raw stdout
    fn git<I, S>(&self, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();
        let command_line = args
            .iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");

        tracing::debug!("Running git {command_line}");
        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.root)
            .output()
            .with_context(|| format!("Failed to execute git {command_line}"))?;

        if !output.status.success() {
            bail!(
                "git {command_line} failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(output.stdout)
    }
}

impl ChangeSource for GitRepo {
    fn root(&self) -> &Path {
        &self.root
    }

    fn staged_changes(&self) -> Result<Vec<StagedChange>> {
        let stdout = self.git(["diff", "--cached", "--name-status", "-z", "-M", "--no-color"])?;
        parse_name_status(&stdout)
    }

    fn changed_paths(&self, previous: &str, new: &str) -> Result<Vec<PathBuf>> {
        let previous = if is_null_ref(previous) { EMPTY_TREE } else { previous };
        let stdout = self.git(["diff", "--name-only", "-z", "--no-color", previous, new])?;
        Ok(parse_name_only(&stdout))
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.git([OsStr::new("add"), OsStr::new("--"), path.as_os_str()])
            .with_context(|| format!("Failed to stage {}", path.display()))?;
        Ok(())
    }
}

fn is_null_ref(reference: &str) -> bool {
    !reference.is_empty() && reference.chars().all(|c| c == '0')
}
