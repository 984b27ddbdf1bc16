//! CLI module - argument parsing, command dispatch, and report output

pub mod args;
pub mod commands;
pub mod helpers;
pub mod report;

pub use args::{Cli, Commands, GlobalOpts, MixArgs, OutputFormat};
