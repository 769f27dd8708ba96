//! Git hook implementations
//!
//! Both hooks share one pipeline:
//!
//! 1. Stop if `skip_hooks` is set
//! 2. Stop with a warning if the converter is not on `PATH`
//! 3. Compute the changed specification files (snapshot taken before any
//!    conversion runs)
//! 4. Convert each file in order; a failure does not stop the others
//! 5. pre-commit only: stage the `.http` files each conversion wrote

pub mod changes;
pub mod post_checkout;
pub mod pre_commit;

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::cli::Output;
use crate::config::HookConfig;
use crate::converter::{Converter, INSTALL_HINT};
use crate::git::ChangeSource;

/// A single hook run as received from git
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookInvocation {
    PreCommit,
    PostCheckout {
        previous_ref: String,
        new_ref: String,
        /// `true` for a branch switch, `false` for a file checkout
        branch_checkout: bool,
    },
}

impl HookInvocation {
    /// Build an invocation from the hook name and git's positional arguments
    pub fn parse(hook: &str, args: &[String]) -> Result<Self> {
        match hook {
            "pre-commit" => Ok(Self::PreCommit),
            "post-checkout" => {
                let [previous_ref, new_ref, flag] = args else {
                    bail!(
                        "post-checkout expects <previous-ref> <new-ref> <branch-flag>, got {} argument(s)",
                        args.len()
                    );
                };
                let branch_checkout = match flag.as_str() {
                    "1" => true,
                    "0" => false,
                    other => bail!("Invalid post-checkout branch flag '{other}' (expected 0 or 1)"),
                };

                Ok(Self::PostCheckout {
                    previous_ref: previous_ref.clone(),
                    new_ref: new_ref.clone(),
                    branch_checkout,
                })
            }
            unknown => bail!("Unknown hook: {unknown} (supported: pre-commit, post-checkout)"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PreCommit => "pre-commit",
            Self::PostCheckout { .. } => "post-checkout",
        }
    }
}

/// Everything a hook run needs, resolved before it starts
pub struct HookContext<'a> {
    pub config: &'a HookConfig,
    pub repo: &'a dyn ChangeSource,
    /// `None` when the converter could not be found
    pub converter: Option<&'a dyn Converter>,
    pub output: &'a Output,
}

/// What a hook run did
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HookReport {
    /// Processing was disabled (skip switch or file checkout)
    pub skipped: bool,
    /// Specification files converted successfully
    pub converted: Vec<PathBuf>,
    /// Specification files or artifacts that failed, with the reason
    pub failed: Vec<(PathBuf, String)>,
    /// Generated files added to the index, relative to the repository root
    pub staged: Vec<PathBuf>,
}

impl HookReport {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Run the hook described by `invocation`
pub fn execute(invocation: &HookInvocation, context: &HookContext<'_>) -> Result<HookReport> {
    match invocation {
        HookInvocation::PreCommit => pre_commit::execute(context),
        HookInvocation::PostCheckout {
            previous_ref,
            new_ref,
            branch_checkout,
        } => post_checkout::execute(context, previous_ref, new_ref, *branch_checkout),
    }
}

fn warn_converter_missing(context: &HookContext<'_>) {
    context.output.warning(&format!(
        "{} not found in PATH. Skipping HTTP file generation.",
        context.config.converter
    ));
    context.output.indent(&format!("To install: {INSTALL_HINT}"));
}

/// Convert `files` one after another, optionally staging what each run wrote
fn convert_all(
    context: &HookContext<'_>,
    converter: &dyn Converter,
    files: &[PathBuf],
    stage_outputs: bool,
) -> HookReport {
    let output = context.output;
    let mut report = HookReport::default();

    for file in files {
        output.step(&format!("Converting {}...", file.display()));

        let conversion = match converter.convert(file, &context.config.output_dir) {
            Ok(conversion) => conversion,
            Err(e) => {
                output.error(&format!("Failed to convert {}: {e:#}", file.display()));
                report.failed.push((file.clone(), format!("{e:#}")));
                continue;
            }
        };

        if let Some(reason) = conversion.failure {
            output.error(&format!(
                "{} failed for {}: {reason}",
                converter.name(),
                file.display()
            ));
            report.failed.push((file.clone(), reason));
            continue;
        }

        tracing::info!(
            "Converted {} ({} file(s) written)",
            file.display(),
            conversion.written.len()
        );
        report.converted.push(file.clone());

        if stage_outputs {
            stage_written(context, &conversion.written, &mut report);
        }
    }

    report
}

fn stage_written(context: &HookContext<'_>, written: &[PathBuf], report: &mut HookReport) {
    let root = context.repo.root();

    for path in written {
        let Some(relative) = relative_to(root, path) else {
            context.output.warning(&format!(
                "Not staging {}: outside the working tree",
                path.display()
            ));
            continue;
        };

        match context.repo.stage(&relative) {
            Ok(()) => {
                context.output.success(&format!(
                    "Adding generated file to commit: {}",
                    relative.display()
                ));
                report.staged.push(relative);
            }
            Err(e) => {
                context.output.error(&format!("{e:#}"));
                report.failed.push((relative, format!("{e:#}")));
            }
        }
    }
}

/// `path` relative to the working tree root, following symlinks on either
/// side; `None` when it lies outside the tree
fn relative_to(root: &Path, path: &Path) -> Option<PathBuf> {
    if path.is_relative() {
        return Some(path.to_path_buf());
    }
    if let Ok(relative) = path.strip_prefix(root) {
        return Some(relative.to_path_buf());
    }

    let root = root.canonicalize().ok()?;
    let path = path.canonicalize().ok()?;
    path.strip_prefix(&root).ok().map(Path::to_path_buf)
}
