//! Config loading and validation.

use super::model::Config;
use crate::env::EnvSnapshot;
use crate::error::{PrestartError, Result};
use std::path::Path;

/// Environment variable naming an optional config override file.
pub const CONFIG_VAR: &str = "PRESTART_CONFIG";

impl Config {
    /// Resolve the active configuration from the environment.
    ///
    /// Reads the file named by `PRESTART_CONFIG` when the variable is set
    /// and non-empty; falls back to the defaults otherwise.
    pub fn resolve(env: &EnvSnapshot) -> Result<Self> {
        match env.get(CONFIG_VAR) {
            Some(path) if !path.is_empty() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PrestartError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| PrestartError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return an error on invalid ones.
    pub fn validate(&self) -> Result<()> {
        if self.app_root.as_os_str().is_empty() {
            return Err(PrestartError::Config(
                "app_root must not be empty".to_string(),
            ));
        }

        if self.storage_dir.as_os_str().is_empty() {
            return Err(PrestartError::Config(
                "storage_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
