use anyhow::Result;
use clap::Args;
use std::path::Path;

use crate::cli::Output;
use crate::config::{EnvSnapshot, HookConfig};
use crate::converter::{ExternalConverter, INSTALL_HINT};
use crate::git::{ChangeSource, GitRepo};
use crate::install::{HOOK_NAMES, HookTarget, is_managed};

#[derive(Args, Default)]
pub struct StatusArgs {}

pub async fn execute(_args: StatusArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let repo = GitRepo::discover(".")?;
    let env = EnvSnapshot::capture();
    let config = HookConfig::load(repo.root(), config_path.map(Path::new), &env)?;

    output.header("Configuration");
    output.key_value("Repository", &repo.root().display().to_string(), false);
    output.key_value("Output directory", &config.output_dir.display().to_string(), false);
    output.key_value("Skip hooks", &config.skip_hooks.to_string(), config.skip_hooks);
    output.key_value("Fail on error", &config.fail_on_error.to_string(), false);

    output.header("Converter");
    match ExternalConverter::locate(&config.converter, repo.root(), &env)? {
        Some(converter) => output.key_value(
            &config.converter,
            &converter.program().display().to_string(),
            true,
        ),
        None => {
            output.warning(&format!("{} not found in PATH", config.converter));
            output.indent(&format!("To install: {INSTALL_HINT}"));
        }
    }

    output.header("Hooks");
    let mut targets = Vec::new();
    if let Some(husky) = HookTarget::detect_husky(repo.root()) {
        targets.push(husky);
    }
    targets.push(HookTarget::git(&repo));

    for target in &targets {
        for hook in HOOK_NAMES {
            let path = target.dir().join(hook);
            let state = if !path.is_file() {
                "not installed"
            } else if is_managed(&path)? {
                "installed"
            } else {
                "foreign hook"
            };
            output.key_value(
                &format!("{} {hook}", target.label()),
                state,
                state == "installed",
            );
        }
    }

    Ok(())
}
