//! Git integration
//!
//! Repository discovery and layout come from `git2`. Operations that must see
//! the same index git itself is using during a hook (`GIT_INDEX_FILE` is set
//! for `git commit -a` and path commits) shell out to the `git` binary.

pub mod operations;
pub mod status;

use anyhow::{Context, Result};
use git2::Repository;
use std::path::{Path, PathBuf};

pub use status::{ChangeStatus, StagedChange};

/// Read and stage operations the hooks need from a repository
pub trait ChangeSource {
    /// Working tree root; every path below is relative to it
    fn root(&self) -> &Path;

    /// Changes recorded in the index relative to `HEAD`, in git's order
    fn staged_changes(&self) -> Result<Vec<StagedChange>>;

    /// Paths that differ between two commits, in git's order
    fn changed_paths(&self, previous: &str, new: &str) -> Result<Vec<PathBuf>>;

    /// Add a working tree file to the index
    fn stage(&self, path: &Path) -> Result<()>;
}

pub struct GitRepo {
    pub repo: Repository,
    root: PathBuf,
}

impl GitRepo {
    /// Discover the repository containing `path`
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path.as_ref()).context("Not in a Git repository")?;
        let root = repo
            .workdir()
            .context("Repository has no working directory")?
            .to_path_buf();

        Ok(Self { repo, root })
    }

    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Directory git runs hooks from, honouring `core.hooksPath`
    pub fn hooks_dir(&self) -> PathBuf {
        let configured = self
            .repo
            .config()
            .and_then(|config| config.get_path("core.hooksPath"))
            .ok();

        match configured {
            Some(path) if path.is_absolute() => path,
            Some(path) => self.root.join(path),
            None => self.git_dir().join("hooks"),
        }
    }
}
