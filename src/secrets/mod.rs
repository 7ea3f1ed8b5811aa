//! Loading typed connection secrets from the filesystem.
//!
//! Secrets are JSON files laid out as `<base>/<type>-<name>/secret.json`.
//! The base directory comes from [`crate::config`]; the record shape comes
//! from the caller.
//!
//! # Architecture
//!
//! - [`Secret`] is the capability a record implements to be loadable. It
//!   points the loader at the record's embedded [`Identity`].
//! - [`LoadSecret`] is the loader interface. [`SecretLoader`] reads real
//!   files; [`MockSecretLoader`] records calls for tests.
//! - [`SecretFileSystem`] and [`Environment`] are the loader's only contact
//!   with the outside world, so both can be replaced.
//!
//! # Example
//!
//! ```rust
//! use secret_loader::schemas::Cache;
//! use secret_loader::secrets::{LoadSecret, MapEnvironment, MemoryFileSystem, Secret, SecretLoader};
//! use std::sync::Arc;
//!
//! let fs = Arc::new(MemoryFileSystem::new());
//! fs.add_file(
//!     "/secret/cache-test/secret.json",
//!     r#"{"master": {"host": "localhost", "port": 6379}}"#,
//! );
//!
//! let loader = SecretLoader::new()
//!     .with_file_system(fs)
//!     .with_environment(MapEnvironment::new());
//!
//! let mut cache = Cache::default();
//! loader.load("cache", "test", &mut cache)?;
//! assert_eq!(cache.master.port, 6379);
//! assert_eq!(cache.name(), "test");
//! # Ok::<(), secret_loader::secrets::SecretsError>(())
//! ```
//!
//! # Security Considerations
//!
//! - Secret values are never logged; only paths, names and types are
//! - Schema `Debug` output redacts passwords
//! - Nothing is cached: every load re-reads the file

pub mod env;
pub mod error;
pub mod fs;
pub mod identity;
pub mod loader;
pub mod mock;

pub use env::{Environment, MapEnvironment, OsEnvironment};
pub use error::{Result, SecretsError};
pub use fs::{FileInfo, MemoryFileSystem, OsFileSystem, SecretFileSystem};
pub use identity::{locate_identity, locate_identity_mut, Identity, Secret, IDENTITY_KEY};
pub use loader::{compose_secret_path, LoadSecret, SecretLoader, SECRET_FILE_NAME};
pub use mock::{LoadCall, MockSecretLoader};
