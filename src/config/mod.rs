//! # Loader Configuration
//!
//! Resolves the base directory that holds secret files. Resolution has three
//! tiers, checked in order:
//! 1. an explicit override supplied by the host application
//! 2. the `SECRET_PATH` environment variable
//! 3. the built-in default, `/secret/`
//!
//! Empty values count as unset at every tier.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::secrets::Environment;

/// Environment variable consulted when no override is configured.
pub const SECRET_PATH_ENV: &str = "SECRET_PATH";

/// Base directory used when neither an override nor the environment
/// provides one.
pub const DEFAULT_BASE_PATH: &str = "/secret/";

/// Resolve the secret base directory.
///
/// Checks sources in the following priority order:
/// 1. `override_path`, when present and non-empty
/// 2. [`SECRET_PATH_ENV`] from `env`, when set and non-empty
/// 3. [`DEFAULT_BASE_PATH`]
pub fn resolve_base_path(override_path: Option<&str>, env: &dyn Environment) -> PathBuf {
    resolve_with(override_path, env, SECRET_PATH_ENV, DEFAULT_BASE_PATH)
}

fn resolve_with(
    override_path: Option<&str>,
    env: &dyn Environment,
    env_var: &str,
    default_path: &str,
) -> PathBuf {
    if let Some(path) = override_path.filter(|p| !p.is_empty()) {
        debug!(base_path = %path, "Using explicit secret base path");
        return PathBuf::from(path);
    }

    if let Some(path) = env.var(env_var).filter(|p| !p.is_empty()) {
        debug!(base_path = %path, env_var = %env_var, "Using secret base path from environment");
        return PathBuf::from(path);
    }

    debug!(base_path = %default_path, "Using default secret base path");
    PathBuf::from(default_path)
}

/// Settings for a [`SecretLoader`](crate::secrets::SecretLoader).
///
/// Can be embedded in an application's own config file:
///
/// ```toml
/// [secrets]
/// base_path = "/run/secrets"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Explicit base directory; overrides the environment when non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    /// Environment variable read when `base_path` is unset.
    pub env_var: String,

    /// Fallback base directory.
    pub default_base_path: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            env_var: SECRET_PATH_ENV.to_string(),
            default_base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Set the explicit base path override.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Set the environment variable consulted at the second tier.
    pub fn with_env_var(mut self, env_var: impl Into<String>) -> Self {
        self.env_var = env_var.into();
        self
    }

    /// Resolve the base directory against `env` using this config's tiers.
    pub fn resolve_base_path(&self, env: &dyn Environment) -> PathBuf {
        resolve_with(self.base_path.as_deref(), env, &self.env_var, &self.default_base_path)
    }
}
