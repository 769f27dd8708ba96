//! Configuration for the hooks
//!
//! A [`HookConfig`] is resolved once per hook invocation, before any file is
//! touched, and is never modified afterwards. Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. `.swagger-to-http.toml` / `.yaml` / `.yml` at the repository root, or
//!    the file passed with `--config`
//! 3. Environment variables, read from an [`EnvSnapshot`]

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Format, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Converter looked up on `PATH` when nothing else is configured
pub const DEFAULT_CONVERTER: &str = "swagger-to-http-file";

/// Repository-level configuration files, merged in this order
pub const CONFIG_FILES: &[&str] = &[
    ".swagger-to-http.toml",
    ".swagger-to-http.yaml",
    ".swagger-to-http.yml",
];

const SKIP_VARS: &[&str] = &["SWAGGER_TO_HTTP_SKIP_HOOKS", "SKIP_HOOKS"];
const OUTPUT_DIR_VARS: &[&str] = &["SWAGGER_TO_HTTP_OUTPUT_DIR", "OUTPUT_DIR"];
const CONVERTER_VAR: &str = "SWAGGER_TO_HTTP_CONVERTER";
const FAIL_ON_ERROR_VAR: &str = "SWAGGER_TO_HTTP_FAIL_ON_ERROR";

/// Resolved hook settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Disable all processing for this invocation
    pub skip_hooks: bool,

    /// Directory the converter writes `.http` files into.
    /// Absolute once loaded through [`HookConfig::load`].
    pub output_dir: PathBuf,

    /// Converter program name or path
    pub converter: String,

    /// Exit non-zero from pre-commit when any conversion or staging failed
    pub fail_on_error: bool,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            skip_hooks: false,
            output_dir: PathBuf::from("."),
            converter: DEFAULT_CONVERTER.to_string(),
            fail_on_error: false,
        }
    }
}

impl HookConfig {
    /// Resolve the configuration for a repository rooted at `repo_root`
    pub fn load(repo_root: &Path, config_file: Option<&Path>, env: &EnvSnapshot) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(HookConfig::default()));

        match config_file {
            Some(path) => {
                let path = if path.is_relative() {
                    repo_root.join(path)
                } else {
                    path.to_path_buf()
                };
                if !path.is_file() {
                    bail!("Configuration file not found: {}", path.display());
                }
                figment = merge_file(figment, &path)?;
            }
            None => {
                for name in CONFIG_FILES {
                    let path = repo_root.join(name);
                    if path.is_file() {
                        tracing::debug!("Loading configuration from {}", path.display());
                        figment = merge_file(figment, &path)?;
                    }
                }
            }
        }

        figment = env.overlay(figment);

        let mut config: HookConfig = figment
            .extract()
            .context("Failed to resolve hook configuration")?;
        config.output_dir = resolve_output_dir(repo_root, &config.output_dir);

        tracing::debug!(?config, "Resolved hook configuration");
        Ok(config)
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("toml") => Ok(figment.merge(Toml::file(path))),
        Some("yaml") | Some("yml") => Ok(figment.merge(Yaml::file(path))),
        _ => bail!(
            "Unsupported configuration format: {} (expected .toml, .yaml or .yml)",
            path.display()
        ),
    }
}

/// Anchor a configured output directory at the repository root
fn resolve_output_dir(repo_root: &Path, output_dir: &Path) -> PathBuf {
    if output_dir.is_absolute() {
        return output_dir.to_path_buf();
    }

    let relative: PathBuf = output_dir
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    repo_root.join(relative)
}

/// Interpret a boolean-ish environment value
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Environment variables captured once at process start
///
/// Hooks never read `std::env` directly; the snapshot is threaded through
/// configuration loading so the resolved settings cannot change mid-run.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are left out.
    pub fn capture() -> Self {
        Self::from_pairs(std::env::vars_os().filter_map(|(key, value)| {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (Ok(key), Err(_)) => {
                    tracing::debug!("Ignoring {key}: value is not valid UTF-8");
                    None
                }
                (Err(key), _) => {
                    tracing::debug!("Ignoring environment variable {key:?}: name is not valid UTF-8");
                    None
                }
            }
        }))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Value of `key` if it is set and non-empty
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// First non-empty value among `keys`
    fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    fn overlay(&self, mut figment: Figment) -> Figment {
        if self.first_of(SKIP_VARS).is_some() {
            figment = figment.merge(("skip_hooks", true));
        }
        if let Some(dir) = self.first_of(OUTPUT_DIR_VARS) {
            figment = figment.merge(("output_dir", dir));
        }
        if let Some(converter) = self.get(CONVERTER_VAR) {
            figment = figment.merge(("converter", converter));
        }
        if let Some(value) = self.get(FAIL_ON_ERROR_VAR) {
            figment = figment.merge(("fail_on_error", parse_flag(value)));
        }
        figment
    }
}

#[cfg(test)]
mod tests;
