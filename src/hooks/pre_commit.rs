//! Pre-commit hook
//!
//! Converts every staged specification file and stages the generated `.http`
//! files so they are recorded in the same commit.

use anyhow::Result;

use super::changes::staged_spec_files;
use super::{HookContext, HookReport, convert_all, warn_converter_missing};
use crate::shared::FileMatcher;

/// Execute pre-commit hook
pub fn execute(context: &HookContext<'_>) -> Result<HookReport> {
    let output = context.output;

    if context.config.skip_hooks {
        output.info("Skipping Swagger-to-HTTP hooks (SKIP_HOOKS is set)");
        return Ok(HookReport::skipped());
    }

    let Some(converter) = context.converter else {
        warn_converter_missing(context);
        return Ok(HookReport::default());
    };

    let matcher = FileMatcher::spec_files()?;
    let changes = context.repo.staged_changes()?;
    let files = staged_spec_files(&changes, &matcher);
    tracing::debug!(
        "{} staged change(s), {} specification file(s)",
        changes.len(),
        files.len()
    );

    if files.is_empty() {
        output.info("No staged specification files");
        return Ok(HookReport::default());
    }

    output.info(&format!(
        "Processing {} staged specification file(s)",
        files.len()
    ));
    Ok(convert_all(context, converter, &files, true))
}
