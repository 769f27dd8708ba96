use anyhow::Result;
use clap::Args;

use crate::cli::Output;
use crate::git::{ChangeSource, GitRepo};
use crate::install::{HOOK_NAMES, HookTarget, WriteOutcome, manual_instructions, write_hook};

#[derive(Args)]
pub struct InstallArgs {
    /// Overwrite existing hooks that were not written by this tool
    #[arg(short, long)]
    pub force: bool,

    /// Write into git's hooks directory instead of .husky/
    #[arg(long)]
    pub git_hooks: bool,
}

pub async fn execute(args: InstallArgs, output: &Output) -> Result<()> {
    let repo = GitRepo::discover(".")?;
    let root = repo.root();

    let target = if args.git_hooks {
        HookTarget::git(&repo)
    } else {
        match HookTarget::detect_husky(root) {
            Some(target) => target,
            None => {
                output.warning("Husky doesn't appear to be installed or configured in this project.");
                output.info("To install Husky:");
                for (i, step) in manual_instructions(root).iter().enumerate() {
                    output.indent(&format!("{}. {step}", i + 1));
                }
                return Ok(());
            }
        }
    };

    output.header(&format!("Installing Swagger-to-HTTP hooks ({})", target.label()));
    tracing::info!("Hook directory: {}", target.dir().display());

    let mut kept = 0;
    for hook in HOOK_NAMES {
        let content = target.render(hook, crate::PKG_NAME);
        match write_hook(target.dir(), hook, &content, args.force)? {
            WriteOutcome::Created => output.success(&format!("Created {hook} hook")),
            WriteOutcome::Updated => output.success(&format!("Updated {hook} hook")),
            WriteOutcome::KeptExisting => {
                kept += 1;
                output.warning(&format!(
                    "{} already exists and was not written by {}; use --force to replace it",
                    target.dir().join(hook).display(),
                    crate::PKG_NAME
                ));
            }
        }
    }

    if kept == HOOK_NAMES.len() {
        return Ok(());
    }

    output.blank_line();
    output.info("Configure the hooks with these environment variables:");
    output.list_item("SWAGGER_TO_HTTP_SKIP_HOOKS=1          # Skip running the git hooks");
    output.list_item("SWAGGER_TO_HTTP_OUTPUT_DIR=\"./http\"   # Directory for generated HTTP files");
    output.list_item("SWAGGER_TO_HTTP_CONVERTER=<program>   # Converter to run");
    output.list_item("SWAGGER_TO_HTTP_FAIL_ON_ERROR=1       # Block commits when a conversion fails");

    Ok(())
}
