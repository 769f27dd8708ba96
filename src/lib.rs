//! # swagger-to-http-hooks
//!
//! Git hooks that keep generated `.http` request files in sync with the
//! OpenAPI / Swagger specifications stored in a repository.
//!
//! Two hooks are provided:
//!
//! - **pre-commit**: converts every staged specification file and stages the
//!   `.http` files the converter wrote, so they land in the same commit.
//! - **post-checkout**: after a branch switch, regenerates `.http` files for
//!   specifications that differ between the two refs. Nothing is staged.
//!
//! The conversion itself is done by an external program
//! (`swagger-to-http-file` by default) invoked as
//! `<converter> -i <spec> -o <output_dir> -w`.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write the hooks into .husky/ (or .git/hooks with --git-hooks)
//! swagger-to-http-hooks install
//!
//! # Run a hook by hand
//! swagger-to-http-hooks run pre-commit
//! swagger-to-http-hooks run post-checkout <previous> <new> 1
//! ```
//!
//! ## Configuration
//!
//! | Variable | Effect |
//! |---|---|
//! | `SWAGGER_TO_HTTP_SKIP_HOOKS` / `SKIP_HOOKS` | any non-empty value disables the hooks |
//! | `SWAGGER_TO_HTTP_OUTPUT_DIR` / `OUTPUT_DIR` | where `.http` files are written (default: repository root) |
//! | `SWAGGER_TO_HTTP_CONVERTER` | converter program (default: `swagger-to-http-file`) |
//! | `SWAGGER_TO_HTTP_FAIL_ON_ERROR` | block the commit when a conversion fails |
//!
//! The same keys can be set in `.swagger-to-http.toml` / `.yaml` / `.yml` at
//! the repository root; environment variables win.

pub mod cli;
pub mod config;
pub mod converter;
pub mod git;
pub mod hooks;
pub mod install;
pub mod shared;

pub use cli::Output;
pub use config::HookConfig;

/// Result type alias used across the crate
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
