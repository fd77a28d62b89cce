//! Laravel environment preflight.
//!
//! Scans the application's `config/*.php` sources for `env(...)` lookups
//! and warns about referenced variables missing from the live environment.
//! Advisory only: warnings never fail the preflight. An unreadable config
//! directory does fail it, and the orchestrator decides what that means.

use crate::env::EnvSnapshot;
use crate::error::{PrestartError, Result};
use crate::logger::Logger;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Environment flag marking the application as a Laravel app.
///
/// Presence is enough; the value is not inspected.
pub const LARAVEL_FLAG: &str = "IS_LARAVEL";

/// Checked separately from the generic scan with its own message.
const APP_KEY: &str = "APP_KEY";

/// Extra guidance appended to the generic missing-variable warning.
const VARIABLE_HINTS: &[(&str, &str)] = &[("APP_ENV", "You should probably set this to `production`.")];

/// Whether the application is recognized as Laravel.
pub fn is_laravel(env: &EnvSnapshot) -> bool {
    env.contains(LARAVEL_FLAG)
}

/// Warn about configuration-referenced environment variables that are not
/// set, and about a missing application key.
pub fn check_env(src_dir: &Path, env: &EnvSnapshot, logger: &Logger) -> Result<()> {
    for warning in collect_warnings(src_dir, env)? {
        logger.warn(&warning);
    }
    Ok(())
}

/// The warnings `check_env` would emit, in deterministic order.
fn collect_warnings(src_dir: &Path, env: &EnvSnapshot) -> Result<Vec<String>> {
    let config = read_config_sources(&src_dir.join("config"))?;
    let mut warnings = Vec::new();

    for name in referenced_variables(&config)? {
        if name != APP_KEY && !env.is_set(&name) {
            warnings.push(missing_variable_warning(&name));
        }
    }

    if !env.is_set(APP_KEY) {
        warnings.push(
            "Your app key is not set! Please set a random 32-character string in your \
             APP_KEY environment variable. This can be easily generated with \
             `openssl rand -hex 16`."
                .to_string(),
        );
    }

    Ok(warnings)
}

/// Concatenated contents of `config/*.php`, in file name order.
fn read_config_sources(config_dir: &Path) -> Result<String> {
    let entries = fs::read_dir(config_dir).map_err(|e| {
        PrestartError::EnvScan(format!(
            "failed to read config directory '{}': {}",
            config_dir.display(),
            e
        ))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            PrestartError::EnvScan(format!(
                "failed to read config directory '{}': {}",
                config_dir.display(),
                e
            ))
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "php") {
            files.push(path);
        }
    }
    files.sort();

    let mut combined = String::new();
    for path in files {
        let content = fs::read_to_string(&path).map_err(|e| {
            PrestartError::EnvScan(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        combined.push_str(&content);
    }
    Ok(combined)
}

/// Unique environment variable names referenced via `env("NAME")` lookups.
///
/// Duplicates across files collapse to one entry, so each missing name is
/// warned about once.
fn referenced_variables(config: &str) -> Result<BTreeSet<String>> {
    let pattern = Regex::new(r#"env\(["']([^,]*)["']\)"#)
        .map_err(|e| PrestartError::EnvScan(format!("invalid env reference pattern: {}", e)))?;

    Ok(pattern
        .captures_iter(config)
        .map(|captures| captures[1].to_string())
        .collect())
}

fn missing_variable_warning(name: &str) -> String {
    let mut message = format!(
        "Your app configuration references the {} environment variable, but it is not set.",
        name
    );

    if let Some((_, hint)) = VARIABLE_HINTS.iter().find(|(hinted, _)| *hinted == name) {
        message.push(' ');
        message.push_str(hint);
    }

    message
}
