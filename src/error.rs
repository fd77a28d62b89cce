//! Error types for the prestart CLI.
//!
//! Uses thiserror for derive macros. Each variant maps to an exit code;
//! only usage/config problems and unrecovered preflight step failures
//! terminate the process non-zero.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for prestart operations.
#[derive(Error, Debug)]
pub enum PrestartError {
    /// The binary was invoked with the wrong arguments.
    #[error("{0}")]
    Usage(String),

    /// The preflight configuration could not be loaded or is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Template compilation failed (read, expansion, or output write).
    #[error("template compilation failed: {0}")]
    Template(String),

    /// An executable path could not be resolved for a `$!{...}` macro.
    #[error("executable path resolution failed: {0}")]
    Resolve(String),

    /// The application configuration sources could not be scanned.
    #[error("environment check failed: {0}")]
    EnvScan(String),

    /// Storage permissions could not be normalized.
    ///
    /// Under the default policy this never reaches the user; it exists so
    /// the step can be switched to fail-fast.
    #[error("permission normalization failed: {0}")]
    Permissions(String),
}

impl PrestartError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PrestartError::Usage(_) => exit_codes::USAGE_ERROR,
            PrestartError::Config(_) => exit_codes::USAGE_ERROR,
            PrestartError::Template(_) => exit_codes::PREFLIGHT_FAILURE,
            PrestartError::Resolve(_) => exit_codes::PREFLIGHT_FAILURE,
            PrestartError::EnvScan(_) => exit_codes::PREFLIGHT_FAILURE,
            PrestartError::Permissions(_) => exit_codes::PREFLIGHT_FAILURE,
        }
    }
}

/// Result type alias for prestart operations.
pub type Result<T> = std::result::Result<T, PrestartError>;
