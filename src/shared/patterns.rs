//! File pattern matching
//!
//! Thin wrapper over `globset` used to recognise specification documents and
//! generated request files by name.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Extensions recognised as OpenAPI / Swagger documents
pub const SPEC_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Extension of generated request files
pub const HTTP_EXTENSION: &str = "http";

/// Case-insensitive matcher over a fixed set of glob patterns
#[derive(Debug, Clone)]
pub struct FileMatcher {
    set: GlobSet,
}

impl FileMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("Invalid file pattern: {pattern}"))?;
            builder.add(glob);
        }

        let set = builder.build().context("Failed to compile file patterns")?;
        Ok(Self { set })
    }

    /// Matcher for `*.json`, `*.yaml` and `*.yml` anywhere in the tree
    pub fn spec_files() -> Result<Self> {
        let patterns: Vec<String> = SPEC_EXTENSIONS
            .iter()
            .map(|ext| format!("*.{ext}"))
            .collect();
        Self::new(&patterns)
    }

    /// Matcher for generated `*.http` files
    pub fn http_files() -> Result<Self> {
        Self::new(&[format!("*.{HTTP_EXTENSION}")])
    }

    pub fn is_match<P: AsRef<Path>>(&self, path: P) -> bool {
        self.set.is_match(path.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_files() {
        let matcher = FileMatcher::spec_files().unwrap();

        assert!(matcher.is_match("api/orders.yaml"));
        assert!(matcher.is_match("specs/a.json"));
        assert!(matcher.is_match("petstore.yml"));
        assert!(matcher.is_match("deep/nested/dir/API.YAML"));

        assert!(!matcher.is_match("README.md"));
        assert!(!matcher.is_match("specs/b.txt"));
        assert!(!matcher.is_match("orders.yaml.bak"));
        assert!(!matcher.is_match("json"));
    }

    #[test]
    fn test_http_files() {
        let matcher = FileMatcher::http_files().unwrap();

        assert!(matcher.is_match("http/orders.http"));
        assert!(!matcher.is_match("http/orders.https"));
        assert!(!matcher.is_match("orders.yaml"));
    }
}
