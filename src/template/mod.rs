//! Configuration template compiler.
//!
//! Expands the startup configuration template into the final artifact the
//! managed server reads. Three macro forms are recognized:
//!
//! - `$if (NAME) (THEN) else (OTHERWISE)` — conditional on whether the
//!   environment variable `NAME` is set and non-empty
//! - `${NAME}` — the variable's value, or the empty string when unset
//! - `$!{EXE}` — the resolved installed path of the executable `EXE`
//!
//! Templates are parsed into a small AST and evaluated against an explicit
//! environment snapshot. Expansion never fails on malformed syntax (it
//! stays in the output verbatim); only path resolution and I/O can fail.

mod ast;
mod eval;
mod parser;

pub use ast::Node;
pub use parser::parse;

use crate::env::EnvSnapshot;
use crate::error::{PrestartError, Result};
use crate::fs::atomic_write_file;
use crate::nix::CommandResolver;
use std::path::Path;

/// Expand template text against an environment snapshot.
///
/// Pure with respect to (template, env, resolver): identical inputs always
/// produce identical output.
pub fn expand(template: &str, env: &EnvSnapshot, resolver: &dyn CommandResolver) -> Result<String> {
    eval::eval(&parser::parse(template), env, resolver)
}

/// Read a template file, expand it, and write the result.
///
/// The output is written atomically, so a consumer never observes a
/// partially expanded file.
pub fn compile_template(
    infile: &Path,
    outfile: &Path,
    env: &EnvSnapshot,
    resolver: &dyn CommandResolver,
) -> Result<()> {
    let template = std::fs::read_to_string(infile).map_err(|e| {
        PrestartError::Template(format!(
            "failed to read template '{}': {}",
            infile.display(),
            e
        ))
    })?;

    let expanded = expand(&template, env, resolver)?;
    atomic_write_file(outfile, &expanded)
}
