//! Prestart: runtime preflight for PHP application containers.
//!
//! Invoked as `prestart <template-file> <output-file>` immediately before
//! the managed server starts. It compiles the server configuration template,
//! warns about environment variables the application configuration references
//! but does not have, and normalizes permissions on the writable storage
//! tree, then reports the port the server is about to bind.

mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod laravel;
pub mod logger;
pub mod nix;
pub mod preflight;
pub mod template;

#[cfg(test)]
mod test_support;

use clap::error::ErrorKind;
use cli::Cli;
use config::Config;
use env::EnvSnapshot;
use error::PrestartError;
use logger::Logger;
use std::process::ExitCode;

fn main() -> ExitCode {
    let env = EnvSnapshot::capture();
    let logger = Logger::new("prestart");

    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::from(exit_codes::SUCCESS as u8);
        }
        Err(_) => {
            // Anything but exactly two file paths is a usage error; nothing
            // else runs.
            let err =
                PrestartError::Usage("Usage: prestart <template-file> <output-file>".to_string());
            logger.error(&err);
            return ExitCode::from(err.exit_code() as u8);
        }
    };

    let result = Config::resolve(&env).and_then(|config| {
        preflight::run(
            &cli.template_file,
            &cli.output_file,
            &config,
            &env,
            &nix::NixStoreResolver,
        )
    });

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            logger.error(&err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
