//! Hook file installation
//!
//! Hook files are rendered from a single shell template that hands control
//! to this binary (`swagger-to-http-hooks run <hook> "$@"`). Every file we
//! write carries [`MARKER`], which is how later installs and `uninstall` tell
//! our hooks apart from hand-written ones.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::git::GitRepo;

const HOOK_TEMPLATE: &str = include_str!("templates/hook.sh");

/// Line identifying hook files written by this tool
pub const MARKER: &str = "# Installed by swagger-to-http-hooks";

/// Hooks this tool manages
pub const HOOK_NAMES: &[&str] = &["pre-commit", "post-checkout"];

/// Sourced by Husky v8 hooks; absent from v9 installs
const HUSKY_LOADER: &str = ". \"$(dirname -- \"$0\")/_/husky.sh\"\n";

/// Directory the hook files go into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookTarget {
    /// `.husky/` managed by the Husky hook runner
    Husky { dir: PathBuf, legacy_loader: bool },
    /// git's own hooks directory
    Git { dir: PathBuf },
}

impl HookTarget {
    /// Husky is considered installed when both `.husky/` and
    /// `node_modules/husky` exist at the repository root
    pub fn detect_husky(root: &Path) -> Option<Self> {
        let dir = root.join(".husky");
        if !dir.is_dir() || !root.join("node_modules").join("husky").is_dir() {
            return None;
        }

        let legacy_loader = dir.join("_").join("husky.sh").is_file();
        Some(Self::Husky { dir, legacy_loader })
    }

    pub fn git(repo: &GitRepo) -> Self {
        Self::Git {
            dir: repo.hooks_dir(),
        }
    }

    pub fn dir(&self) -> &Path {
        match self {
            Self::Husky { dir, .. } | Self::Git { dir } => dir,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Husky { .. } => "Husky",
            Self::Git { .. } => "git hooks",
        }
    }

    /// Render the hook file for `hook`
    pub fn render(&self, hook: &str, binary: &str) -> String {
        let loader = match self {
            Self::Husky {
                legacy_loader: true,
                ..
            } => HUSKY_LOADER,
            _ => "",
        };

        HOOK_TEMPLATE
            .replace("{{loader}}", loader)
            .replace("{{binary}}", binary)
            .replace("{{hook}}", hook)
    }
}

/// What happened to one hook file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    /// A hook not written by this tool exists and `force` was not given
    KeptExisting,
}

/// Write `content` as hook `hook` in `dir` with mode 0755
pub fn write_hook(dir: &Path, hook: &str, content: &str, force: bool) -> Result<WriteOutcome> {
    let path = dir.join(hook);

    let outcome = if path.exists() {
        if !force && !is_managed(&path)? {
            return Ok(WriteOutcome::KeptExisting);
        }
        WriteOutcome::Updated
    } else {
        WriteOutcome::Created
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create hooks directory {}", dir.display()))?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write hook file {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&path)
            .with_context(|| format!("Failed to get metadata of {}", path.display()))?
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms)
            .with_context(|| format!("Failed to make {} executable", path.display()))?;
    }

    tracing::debug!("{:?} {}", outcome, path.display());
    Ok(outcome)
}

/// Remove hook `hook` from `dir` if this tool wrote it.
/// Returns whether a file was removed.
pub fn remove_hook(dir: &Path, hook: &str) -> Result<bool> {
    let path = dir.join(hook);
    if !path.is_file() || !is_managed(&path)? {
        return Ok(false);
    }

    fs::remove_file(&path)
        .with_context(|| format!("Failed to remove hook file {}", path.display()))?;
    Ok(true)
}

/// Whether the hook file at `path` was written by this tool
pub fn is_managed(path: &Path) -> Result<bool> {
    let content = fs::read(path)
        .with_context(|| format!("Failed to read hook file {}", path.display()))?;
    Ok(String::from_utf8_lossy(&content).contains(MARKER))
}

/// Guidance printed when no hook runner is available
pub fn manual_instructions(root: &Path) -> Vec<String> {
    let mut steps = Vec::new();

    if !root.join("package.json").is_file() {
        steps.push("Initialize package.json first: npm init -y".to_string());
    }
    steps.push("Install Husky: npm install husky --save-dev".to_string());
    steps.push("Enable it: npx husky init".to_string());
    steps.push(format!(
        "Run '{} install' again, or use '{} install --git-hooks' to write into .git/hooks",
        crate::PKG_NAME,
        crate::PKG_NAME
    ));

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_target(dir: &TempDir) -> HookTarget {
        HookTarget::Git {
            dir: dir.path().join("hooks"),
        }
    }

    #[test]
    fn test_render_delegates_to_binary() {
        let dir = TempDir::new().unwrap();
        let content = git_target(&dir).render("post-checkout", "swagger-to-http-hooks");

        assert!(content.starts_with("#!/bin/sh\n"));
        assert!(content.contains(MARKER));
        assert!(content.contains("exec swagger-to-http-hooks run post-checkout \"$@\""));
        assert!(!content.contains("husky.sh"));
        assert!(!content.contains("{{"));
    }

    #[test]
    fn test_render_husky_legacy_loader() {
        let target = HookTarget::Husky {
            dir: PathBuf::from(".husky"),
            legacy_loader: true,
        };
        let content = target.render("pre-commit", "swagger-to-http-hooks");

        assert!(content.contains("_/husky.sh"));
        assert!(content.contains("run pre-commit"));
    }

    #[test]
    fn test_detect_husky_requires_both_directories() {
        let root = TempDir::new().unwrap();
        assert!(HookTarget::detect_husky(root.path()).is_none());

        fs::create_dir_all(root.path().join(".husky")).unwrap();
        assert!(HookTarget::detect_husky(root.path()).is_none());

        fs::create_dir_all(root.path().join("node_modules/husky")).unwrap();
        assert_eq!(
            HookTarget::detect_husky(root.path()),
            Some(HookTarget::Husky {
                dir: root.path().join(".husky"),
                legacy_loader: false,
            })
        );
    }

    #[test]
    fn test_write_hook_is_executable_and_refreshable() {
        let dir = TempDir::new().unwrap();
        let target = git_target(&dir);
        let content = target.render("pre-commit", "swagger-to-http-hooks");

        let outcome = write_hook(target.dir(), "pre-commit", &content, false).unwrap();
        assert_eq!(outcome, WriteOutcome::Created);

        let outcome = write_hook(target.dir(), "pre-commit", &content, false).unwrap();
        assert_eq!(outcome, WriteOutcome::Updated);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(target.dir().join("pre-commit"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_foreign_hook_needs_force() {
        let dir = TempDir::new().unwrap();
        let hooks = dir.path().join("hooks");
        fs::create_dir_all(&hooks).unwrap();
        fs::write(hooks.join("pre-commit"), "#!/bin/sh\nnpm test\n").unwrap();

        let outcome = write_hook(&hooks, "pre-commit", "new", false).unwrap();
        assert_eq!(outcome, WriteOutcome::KeptExisting);
        assert_eq!(
            fs::read_to_string(hooks.join("pre-commit")).unwrap(),
            "#!/bin/sh\nnpm test\n"
        );

        let outcome = write_hook(&hooks, "pre-commit", "new", true).unwrap();
        assert_eq!(outcome, WriteOutcome::Updated);
        assert_eq!(fs::read_to_string(hooks.join("pre-commit")).unwrap(), "new");
    }

    #[test]
    fn test_remove_only_managed_hooks() {
        let dir = TempDir::new().unwrap();
        let target = git_target(&dir);
        let content = target.render("pre-commit", "swagger-to-http-hooks");
        write_hook(target.dir(), "pre-commit", &content, false).unwrap();
        fs::write(target.dir().join("post-checkout"), "#!/bin/sh\necho mine\n").unwrap();

        assert!(remove_hook(target.dir(), "pre-commit").unwrap());
        assert!(!remove_hook(target.dir(), "post-checkout").unwrap());
        assert!(!remove_hook(target.dir(), "commit-msg").unwrap());

        assert!(!target.dir().join("pre-commit").exists());
        assert!(target.dir().join("post-checkout").exists());
    }

    #[test]
    fn test_manual_instructions_mention_npm_init_without_package_json() {
        let root = TempDir::new().unwrap();
        let steps = manual_instructions(root.path());
        assert!(steps[0].contains("npm init -y"));

        fs::write(root.path().join("package.json"), "{}").unwrap();
        let steps = manual_instructions(root.path());
        assert!(steps.iter().all(|step| !step.contains("npm init")));
    }
}
