//! CLI argument definitions using clap
//!
//! Commands:
//! - filmstore serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// filmstore - a minimal movie catalog CRUD service over a document store
#[derive(Parser, Debug)]
#[command(name = "filmstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP service
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./filmstore.json")]
        config: PathBuf,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
