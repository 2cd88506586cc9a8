//! CLI module for filmstore
//!
//! Provides the command-line entry point:
//! - serve: boot the service and enter the request loop

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command, serve};
pub use errors::{CliError, CliResult};
