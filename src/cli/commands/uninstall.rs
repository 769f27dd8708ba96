use anyhow::Result;
use clap::Args;

use crate::cli::Output;
use crate::git::{ChangeSource, GitRepo};
use crate::install::{HOOK_NAMES, remove_hook};

#[derive(Args)]
pub struct UninstallArgs {}

pub async fn execute(_args: UninstallArgs, output: &Output) -> Result<()> {
    let repo = GitRepo::discover(".")?;

    let mut dirs = vec![repo.root().join(".husky"), repo.hooks_dir()];
    dirs.dedup();

    let mut removed = 0;
    for dir in dirs.iter().filter(|dir| dir.is_dir()) {
        for hook in HOOK_NAMES {
            if remove_hook(dir, hook)? {
                removed += 1;
                output.success(&format!("Removed {}", dir.join(hook).display()));
            }
        }
    }

    if removed == 0 {
        output.info("No hooks installed by this tool were found");
    }
    Ok(())
}
