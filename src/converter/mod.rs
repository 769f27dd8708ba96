//! Spec-to-HTTP converter invocation
//!
//! The converter is an external program called as
//! `<converter> -i <spec> -o <output_dir> -w`. Exit code 0 means success for
//! that one file.

mod manifest;

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub use manifest::OutputSnapshot;

use crate::config::EnvSnapshot;
use crate::shared::FileMatcher;

/// Where to get the converter when it is missing from `PATH`
pub const INSTALL_HINT: &str =
    "go install github.com/edgardnogueira/swagger-to-http-file/cmd/swagger-to-http-file@latest";

/// Result of converting one specification file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversion {
    /// Why the converter failed, `None` on success
    pub failure: Option<String>,

    /// Generated files written or rewritten by this run
    pub written: Vec<PathBuf>,
}

/// Turns one specification file into `.http` files
pub trait Converter {
    /// Name used in messages
    fn name(&self) -> &str;

    /// Convert `spec` (relative to the repository root) into `output_dir`,
    /// overwriting existing generated files.
    ///
    /// `Err` means the conversion could not be attempted at all.
    fn convert(&self, spec: &Path, output_dir: &Path) -> Result<Conversion>;
}

/// Converter run as a child process
#[derive(Debug, Clone)]
pub struct ExternalConverter {
    name: String,
    program: PathBuf,
    working_dir: PathBuf,
    outputs: FileMatcher,
}

impl ExternalConverter {
    /// Resolve `name` against the snapshot's `PATH`.
    /// Returns `None` when the program cannot be found.
    pub fn locate(name: &str, working_dir: &Path, env: &EnvSnapshot) -> Result<Option<Self>> {
        let program = match which::which_in(name, env.get("PATH"), working_dir) {
            Ok(program) => program,
            Err(e) => {
                tracing::debug!("Converter '{name}' not resolvable: {e}");
                return Ok(None);
            }
        };
        tracing::debug!("Using converter {}", program.display());

        Ok(Some(Self {
            name: name.to_string(),
            program,
            working_dir: working_dir.to_path_buf(),
            outputs: FileMatcher::http_files()?,
        }))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Converter for ExternalConverter {
    fn name(&self) -> &str {
        &self.name
    }

    fn convert(&self, spec: &Path, output_dir: &Path) -> Result<Conversion> {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;

        let before = OutputSnapshot::capture(output_dir, &self.outputs)?;

        let output = Command::new(&self.program)
            .args([OsStr::new("-i"), spec.as_os_str()])
            .args([OsStr::new("-o"), output_dir.as_os_str()])
            .arg("-w")
            .current_dir(&self.working_dir)
            .output()
            .with_context(|| format!("Failed to execute {}", self.program.display()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!("{} output: {}", self.name, stdout.trim());
        }

        let after = OutputSnapshot::capture(output_dir, &self.outputs)?;
        let written = after.changed_since(&before);

        let failure = if output.status.success() {
            None
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let status = match output.status.code() {
                Some(code) => format!("exit code {code}"),
                None => "terminated by signal".to_string(),
            };
            Some(if stderr.trim().is_empty() {
                status
            } else {
                format!("{status}: {}", stderr.trim())
            })
        };

        Ok(Conversion { failure, written })
    }
}
