use anyhow::{Result, bail};
use clap::Args;
use std::path::Path;

use crate::cli::Output;
use crate::config::{EnvSnapshot, HookConfig};
use crate::converter::{Converter, ExternalConverter};
use crate::git::{ChangeSource, GitRepo};
use crate::hooks::{self, HookContext, HookInvocation, HookReport};

#[derive(Args, Clone)]
pub struct RunArgs {
    /// Hook name to run (pre-commit or post-checkout)
    pub hook: String,

    /// Arguments git passed to the hook
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Run a hook. Only a pre-commit with `fail_on_error` and failed conversions
/// exits non-zero; every other problem is reported and git proceeds.
pub async fn execute(args: RunArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let invocation = HookInvocation::parse(&args.hook, &args.args)?;
    let env = EnvSnapshot::capture();

    let (config, report) = match run_hook(&invocation, config_path, &env, output) {
        Ok(result) => result,
        Err(e) => {
            output.error(&format!("{} hook failed: {e:#}", invocation.name()));
            output.indent("Continuing without HTTP file generation");
            return Ok(());
        }
    };

    summarize(&report, output);

    if report.has_failures() && invocation == HookInvocation::PreCommit {
        if config.fail_on_error {
            bail!(
                "Commit blocked: {} conversion(s) failed (fail_on_error is enabled)",
                report.failed.len()
            );
        }
        output.warning("Some conversions failed; the commit continues without them");
    }

    Ok(())
}

fn run_hook(
    invocation: &HookInvocation,
    config_path: Option<&str>,
    env: &EnvSnapshot,
    output: &Output,
) -> Result<(HookConfig, HookReport)> {
    let repo = GitRepo::discover(".")?;
    let config = HookConfig::load(repo.root(), config_path.map(Path::new), env)?;
    let converter = ExternalConverter::locate(&config.converter, repo.root(), env)?;
    if let Some(converter) = &converter {
        output.verbose(&format!("Using converter {}", converter.program().display()));
    }

    let context = HookContext {
        config: &config,
        repo: &repo,
        converter: converter.as_ref().map(|c| c as &dyn Converter),
        output,
    };
    let report = hooks::execute(invocation, &context)?;

    Ok((config, report))
}

fn summarize(report: &HookReport, output: &Output) {
    if report.skipped || (report.converted.is_empty() && report.failed.is_empty()) {
        return;
    }

    let summary = format!(
        "Converted {} specification file(s), staged {} generated file(s)",
        report.converted.len(),
        report.staged.len()
    );
    if report.has_failures() {
        output.warning(&format!("{summary}, {} failure(s)", report.failed.len()));
    } else {
        output.success(&summary);
    }
}
