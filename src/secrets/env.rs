//! Environment variable access for base path resolution.
//!
//! The loader never calls `std::env` directly. It reads through an
//! [`Environment`] so tests and embedding applications can supply their own
//! variables without touching process state.
//!
//! # Example
//!
//! ```rust
//! use secret_loader::secrets::{Environment, MapEnvironment};
//!
//! let env = MapEnvironment::new().with_var("SECRET_PATH", "/run/secrets");
//! assert_eq!(env.var("SECRET_PATH").as_deref(), Some("/run/secrets"));
//! ```

use std::collections::HashMap;
use std::env;
use std::sync::Arc;

/// Source of environment variables.
pub trait Environment: Send + Sync {
    /// Returns the value of `key`, or `None` when it is unset or not valid
    /// unicode.
    fn var(&self, key: &str) -> Option<String>;
}

impl<T: Environment + ?Sized> Environment for Arc<T> {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Reads from the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnvironment;

impl OsEnvironment {
    /// Creates a new process environment reader.
    pub fn new() -> Self {
        Self
    }
}

impl Environment for OsEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// In-memory environment for tests.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MapEnvironment::set_var`].
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_var(key, value);
        self
    }

    /// Sets a variable.
    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Removes a variable.
    pub fn remove_var(&mut self, key: &str) {
        self.vars.remove(key);
    }
}

impl Environment for MapEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
