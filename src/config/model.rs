//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Failure policy for one preflight step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepPolicy {
    /// When true, a failure of this step fails the whole preflight. When
    /// false, the failure is swallowed and the remaining steps still
    /// decide the outcome.
    pub fail_fast: bool,
}

impl StepPolicy {
    /// A failure aborts the preflight.
    pub const fn fatal() -> Self {
        Self { fail_fast: true }
    }

    /// A failure is swallowed.
    pub const fn best_effort() -> Self {
        Self { fail_fast: false }
    }
}

impl Default for StepPolicy {
    fn default() -> Self {
        Self::fatal()
    }
}

/// Configuration for the prestart preflight.
///
/// Read from the YAML file named by the `PRESTART_CONFIG` environment
/// variable when that is set; defaults otherwise. Unknown fields in the
/// YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application source root scanned by the environment check.
    #[serde(default = "default_app_root")]
    pub app_root: PathBuf,

    /// Writable state directory normalized before start.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Policy for storage permission normalization. Best-effort by
    /// default: a missing storage directory is the common case, not a
    /// failure.
    #[serde(default = "default_permissions_policy")]
    pub permissions: StepPolicy,

    /// Policy for the environment reference check.
    #[serde(default)]
    pub env_check: StepPolicy,

    /// Policy for template compilation.
    #[serde(default)]
    pub template: StepPolicy,
}

fn default_app_root() -> PathBuf {
    PathBuf::from("/app")
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("/app/storage")
}

fn default_permissions_policy() -> StepPolicy {
    StepPolicy::best_effort()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_root: default_app_root(),
            storage_dir: default_storage_dir(),
            permissions: default_permissions_policy(),
            env_check: StepPolicy::default(),
            template: StepPolicy::default(),
        }
    }
}
