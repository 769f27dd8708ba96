//! Post-checkout hook
//!
//! After a branch switch, regenerates `.http` files for the specifications
//! that differ between the previous and the new ref. Regenerated files are
//! left as working tree changes.

use anyhow::Result;

use super::changes::changed_spec_files;
use super::{HookContext, HookReport, convert_all, warn_converter_missing};
use crate::shared::FileMatcher;

/// Execute post-checkout hook
pub fn execute(
    context: &HookContext<'_>,
    previous_ref: &str,
    new_ref: &str,
    branch_checkout: bool,
) -> Result<HookReport> {
    let output = context.output;

    if !branch_checkout {
        tracing::debug!("File checkout, nothing to regenerate");
        return Ok(HookReport::skipped());
    }
    if context.config.skip_hooks {
        output.info("Skipping Swagger-to-HTTP hooks (SKIP_HOOKS is set)");
        return Ok(HookReport::skipped());
    }

    let Some(converter) = context.converter else {
        warn_converter_missing(context);
        return Ok(HookReport::default());
    };

    let matcher = FileMatcher::spec_files()?;
    let changed = context.repo.changed_paths(previous_ref, new_ref)?;
    let root = context.repo.root();

    let files: Vec<_> = changed_spec_files(&changed, &matcher)
        .into_iter()
        .filter(|file| {
            let present = root.join(file).is_file();
            if !present {
                tracing::debug!("{} is not in the working tree, skipping", file.display());
            }
            present
        })
        .collect();

    if files.is_empty() {
        tracing::debug!("No specification files changed between {previous_ref} and {new_ref}");
        return Ok(HookReport::default());
    }

    output.info(&format!(
        "Processing {} specification file(s) changed between branches",
        files.len()
    ));
    Ok(convert_all(context, converter, &files, false))
}
