//! Recording test double for [`LoadSecret`].
//!
//! ```rust
//! use secret_loader::schemas::Cache;
//! use secret_loader::secrets::{LoadSecret, MockSecretLoader};
//! use serde_json::json;
//!
//! let loader = MockSecretLoader::new().with_responder(|_, _| {
//!     Ok(Some(json!({"master": {"host": "localhost", "port": 6379}})))
//! });
//!
//! let mut cache = Cache::default();
//! loader.load("cache", "test", &mut cache).unwrap();
//! assert_eq!(cache.master.port, 6379);
//! assert_eq!(loader.calls().len(), 1);
//! ```

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::Value;

use super::error::{Result, SecretsError};
use super::identity::Secret;
use super::loader::{compose_secret_path, LoadSecret};

/// Parameters of one recorded [`LoadSecret::load`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadCall {
    pub secret_type: String,
    pub name: String,
}

type Responder = Box<dyn Fn(&str, &str) -> Result<Option<Value>> + Send + Sync>;

/// [`LoadSecret`] implementation that records calls instead of reading files.
///
/// The responder decides each outcome: `Ok(Some(json))` decodes `json` into
/// the target and stamps it under `mock://`, `Ok(None)` leaves the target
/// untouched, `Err(e)` is returned as is. Without a responder every call
/// succeeds without touching the target.
#[derive(Default)]
pub struct MockSecretLoader {
    calls: Mutex<Vec<LoadCall>>,
    responder: Option<Responder>,
}

impl fmt::Debug for MockSecretLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockSecretLoader")
            .field("calls", &self.calls())
            .field("has_responder", &self.responder.is_some())
            .finish()
    }
}

impl MockSecretLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the function that decides the outcome of each call.
    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(&str, &str) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        self.responder = Some(Box::new(responder));
        self
    }

    /// All calls recorded so far, oldest first.
    pub fn calls(&self) -> Vec<LoadCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn mock_path(secret_type: &str, name: &str) -> PathBuf {
        compose_secret_path(&PathBuf::from("mock://"), secret_type, name)
    }
}

impl LoadSecret for MockSecretLoader {
    fn load<S: Secret>(&self, secret_type: &str, name: &str, target: &mut S) -> Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(LoadCall { secret_type: secret_type.to_string(), name: name.to_string() });

        let Some(responder) = &self.responder else {
            return Ok(());
        };

        let Some(json) = responder(secret_type, name)? else {
            return Ok(());
        };

        let path = Self::mock_path(secret_type, name);
        *target = serde_json::from_value(json)
            .map_err(|e| SecretsError::deserialization(path.clone(), e))?;
        if let Some(identity) = target.identity_mut() {
            identity.stamp(name, &path);
        }
        Ok(())
    }
}
