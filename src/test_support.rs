//! Shared helpers for unit tests.

use crate::env::EnvSnapshot;
use crate::error::{PrestartError, Result};
use crate::nix::CommandResolver;
use std::collections::HashMap;

/// Resolver backed by a fixed name → path table, so no test shells out.
pub(crate) struct MapResolver(HashMap<String, String>);

impl MapResolver {
    pub(crate) fn with(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(exe, path)| (exe.to_string(), path.to_string()))
                .collect(),
        )
    }

    pub(crate) fn empty() -> Self {
        Self::with(&[])
    }
}

impl CommandResolver for MapResolver {
    fn resolve(&self, exe: &str) -> Result<String> {
        self.0
            .get(exe)
            .cloned()
            .ok_or_else(|| PrestartError::Resolve(format!("unknown executable '{}'", exe)))
    }
}

/// Snapshot built from literal pairs.
pub(crate) fn env(pairs: &[(&str, &str)]) -> EnvSnapshot {
    pairs.iter().copied().collect()
}
