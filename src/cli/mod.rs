//! CLI argument parsing for prestart.
//!
//! Uses clap derive macros. The binary takes exactly two positional
//! arguments; `main` maps any parse failure onto the usage contract (a
//! usage line through the logging sink and exit code 1) instead of letting
//! clap terminate the process itself.

use clap::Parser;
use std::path::PathBuf;

/// Prestart: runtime preflight for PHP application containers.
///
/// Compiles the server configuration template, checks the application
/// environment, and normalizes storage permissions before the managed
/// server starts.
#[derive(Parser, Debug)]
#[command(name = "prestart")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the configuration template to expand.
    pub template_file: PathBuf,

    /// Path the expanded configuration is written to.
    pub output_file: PathBuf,
}

impl Cli {
    /// Parse command line arguments without exiting on failure.
    pub fn parse_args() -> Result<Self, clap::Error> {
        Cli::try_parse()
    }
}
