//! Loads secret files into typed records.
//!
//! Secrets live at `<base>/<type>-<name>/secret.json`, one JSON object per
//! file. [`SecretLoader`] resolves the base directory on every call, reads
//! the file, decodes it into the caller's record and stamps the record's
//! [`Identity`](super::Identity) with the instance name and the path read.
//!
//! # Example
//!
//! ```rust,no_run
//! use secret_loader::schemas::Cache;
//! use secret_loader::secrets::{LoadSecret, Secret, SecretLoader};
//!
//! let loader = SecretLoader::new().with_base_path("/run/secrets");
//! let mut cache = Cache::default();
//! loader.load("cache", "prod", &mut cache)?;
//!
//! assert_eq!(cache.name(), "prod");
//! println!("master at {}:{}", cache.master.host, cache.master.port);
//! # Ok::<(), secret_loader::secrets::SecretsError>(())
//! ```

use std::any::type_name;
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::de::Error as _;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use super::env::{Environment, OsEnvironment};
use super::error::{Result, SecretsError};
use super::fs::{OsFileSystem, SecretFileSystem};
use super::identity::{locate_identity, stamp_value, Secret, IDENTITY_KEY};
use crate::config::LoaderConfig;

/// File name of every secret inside its `<type>-<name>` directory.
pub const SECRET_FILE_NAME: &str = "secret.json";

/// Compose `<base>/<type>-<name>/secret.json`.
///
/// The result always lies under `base`: root, prefix, `.` and `..`
/// components inside `secret_type` or `name` are dropped.
pub fn compose_secret_path(base: &Path, secret_type: &str, name: &str) -> PathBuf {
    let segment = format!("{}-{}", secret_type, name);
    let mut path = base.to_path_buf();
    path.extend(
        Path::new(&segment)
            .components()
            .filter(|component| matches!(component, Component::Normal(_))),
    );
    path.join(SECRET_FILE_NAME)
}

/// Loads secrets into records that implement [`Secret`].
///
/// Application code should depend on this trait rather than on
/// [`SecretLoader`] so tests can substitute a double.
pub trait LoadSecret {
    /// Load secret `secret_type`/`name` into `target`.
    ///
    /// On success `target` is replaced by the decoded record: fields the
    /// file omits take their `Default` value, not the value `target` held
    /// before the call. On failure `target` is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::MissingIdentityField`] if `S` has no identity
    /// - [`SecretsError::NotFound`] if the secret file does not exist
    /// - [`SecretsError::Io`] if the file cannot be read
    /// - [`SecretsError::Deserialization`] if the JSON does not fit `S`
    fn load<S: Secret>(&self, secret_type: &str, name: &str, target: &mut S) -> Result<()>;
}

/// Filesystem-backed secret loader.
///
/// Holds no cache: every call resolves the base path and re-reads the file.
/// Concurrent loads are safe as long as each targets its own record.
pub struct SecretLoader {
    config: LoaderConfig,
    fs: Box<dyn SecretFileSystem>,
    env: Box<dyn Environment>,
}

impl fmt::Debug for SecretLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretLoader").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Default for SecretLoader {
    fn default() -> Self {
        Self::with_config(LoaderConfig::default())
    }
}

impl SecretLoader {
    /// Creates a loader over the real filesystem and process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader from explicit settings.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config, fs: Box::new(OsFileSystem::new()), env: Box::new(OsEnvironment::new()) }
    }

    /// Set the explicit base path override.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.config.base_path = Some(base_path.into());
        self
    }

    /// Replace the filesystem secrets are read from.
    pub fn with_file_system(mut self, fs: impl SecretFileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    /// Replace the environment the base path is resolved against.
    pub fn with_environment(mut self, env: impl Environment + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Settings this loader resolves paths with.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// The base directory as resolved right now.
    pub fn base_path(&self) -> PathBuf {
        self.config.resolve_base_path(self.env.as_ref())
    }

    /// Path the loader would read for `secret_type`/`name`.
    pub fn secret_path(&self, secret_type: &str, name: &str) -> PathBuf {
        compose_secret_path(&self.base_path(), secret_type, name)
    }

    /// Load into an untyped JSON record.
    ///
    /// `target` must be a JSON object containing an `_identity` object
    /// somewhere in its tree; the first one in document order is stamped
    /// with `name` and `path`. Members of the secret file are merged into
    /// `target`: nested objects merge recursively, everything else replaces
    /// the existing member. An `_identity` member in the file is ignored.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::InvalidTarget`] if `target` is not a JSON object
    /// - [`SecretsError::MissingIdentityField`] if no `_identity` object exists
    /// - [`SecretsError::NotFound`], [`SecretsError::Io`] as for [`LoadSecret::load`]
    /// - [`SecretsError::Deserialization`] if the file is not a JSON object or
    ///   replaces an object member with a non-object
    #[instrument(skip_all, fields(secret_type = %secret_type, name = %name))]
    pub fn load_value(&self, secret_type: &str, name: &str, target: &mut Value) -> Result<()> {
        if !target.is_object() {
            warn!(found = json_kind(target), "Secret target is not a JSON object");
            return Err(SecretsError::invalid_target(format!(
                "expected a JSON object, found {}",
                json_kind(target)
            )));
        }

        let Some(pointer) = locate_identity(target) else {
            warn!("Secret target has no `{}` member", IDENTITY_KEY);
            return Err(SecretsError::missing_identity(type_name::<Value>()));
        };

        let path = self.secret_path(secret_type, name);
        let bytes = self.read_secret(&path)?;

        let incoming: Value = serde_json::from_slice(&bytes)
            .map_err(|e| decode_failed(&path, e))?;
        let Value::Object(incoming) = incoming else {
            let err = serde_json::Error::custom("expected a JSON object at the top level");
            return Err(decode_failed(&path, err));
        };

        let mut merged = target.clone();
        if let Some(members) = merged.as_object_mut() {
            merge_members(members, incoming).map_err(|e| decode_failed(&path, e))?;
        }

        match merged.pointer_mut(&pointer).and_then(Value::as_object_mut) {
            Some(identity) => stamp_value(identity, name, &path),
            None => return Err(SecretsError::missing_identity(type_name::<Value>())),
        }

        *target = merged;
        info!(path = %path.display(), "Loaded secret");
        Ok(())
    }

    fn read_secret(&self, path: &Path) -> Result<Vec<u8>> {
        match self.fs.metadata(path) {
            Ok(info) => debug!(path = %path.display(), len = info.len, "Found secret file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Secret file not found");
                return Err(SecretsError::not_found(path, e));
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Could not stat secret file, trying read")
            }
        }

        self.fs.read(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to read secret file");
            SecretsError::io(path, e)
        })
    }
}

impl LoadSecret for SecretLoader {
    #[instrument(skip_all, fields(secret_type = %secret_type, name = %name))]
    fn load<S: Secret>(&self, secret_type: &str, name: &str, target: &mut S) -> Result<()> {
        if target.identity_mut().is_none() {
            warn!(record = type_name::<S>(), "Secret record has no identity field");
            return Err(SecretsError::missing_identity(type_name::<S>()));
        }

        let path = self.secret_path(secret_type, name);
        let bytes = self.read_secret(&path)?;

        *target = serde_json::from_slice(&bytes).map_err(|e| decode_failed(&path, e))?;

        match target.identity_mut() {
            Some(identity) => identity.stamp(name, &path),
            None => return Err(SecretsError::missing_identity(type_name::<S>())),
        }

        info!(path = %path.display(), "Loaded secret");
        Ok(())
    }
}

fn decode_failed(path: &Path, source: serde_json::Error) -> SecretsError {
    warn!(path = %path.display(), error = %source, "Failed to decode secret file");
    SecretsError::deserialization(path, source)
}

fn merge_members(
    target: &mut Map<String, Value>,
    incoming: Map<String, Value>,
) -> std::result::Result<(), serde_json::Error> {
    for (key, value) in incoming {
        if key == IDENTITY_KEY {
            continue;
        }

        if let Some(Value::Object(existing)) = target.get_mut(&key) {
            match value {
                Value::Object(members) => merge_members(existing, members)?,
                other => {
                    return Err(serde_json::Error::custom(format!(
                        "invalid type for `{}`: expected a JSON object, found {}",
                        key,
                        json_kind(&other)
                    )));
                }
            }
            continue;
        }

        target.insert(key, value);
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
