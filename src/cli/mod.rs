//! Command-line interface
//!
//! Argument parsing with clap and the console output handler shared by all
//! commands.

pub mod commands;
pub mod output;

pub use commands::Cli;
pub use output::Output;
