//! Resolved executable path lookup.
//!
//! `$!{EXE}` macros expand to the canonical installed location of an
//! executable: the Nix store path owning the binary, obtained by chaining
//! `which` and `nix-store -q`. Each macro occurrence costs one resolver
//! invocation, performed synchronously in match order.

use crate::error::{PrestartError, Result};
use std::process::Command;

/// Resolves an executable name to its canonical installed path.
///
/// Template evaluation is written against this trait so tests never shell
/// out.
pub trait CommandResolver: Sync {
    fn resolve(&self, exe: &str) -> Result<String>;
}

/// Production resolver backed by the Nix store.
#[derive(Debug, Default)]
pub struct NixStoreResolver;

impl CommandResolver for NixStoreResolver {
    fn resolve(&self, exe: &str) -> Result<String> {
        let binary = run(Command::new("which").arg(exe))?;
        run(Command::new("nix-store").args(["-q", &binary]))
    }
}

/// Run a command, returning trimmed stdout on exit code 0.
///
/// Spawn failures and non-zero exits both map to `Resolve` errors carrying
/// whatever the command reported; callers surface them unrecovered.
fn run(command: &mut Command) -> Result<String> {
    let program = command.get_program().to_string_lossy().to_string();

    let output = command
        .output()
        .map_err(|e| PrestartError::Resolve(format!("failed to execute {}: {}", program, e)))?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

    if output.status.success() {
        Ok(stdout)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() { stdout } else { stderr };
        let exit_code = output.status.code().unwrap_or(-1);

        Err(PrestartError::Resolve(format!(
            "{} failed (exit code {}): {}",
            program, exit_code, detail
        )))
    }
}
