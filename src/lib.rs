//! # secret-loader
//!
//! Loads structured connection credentials from JSON files so applications
//! never embed them in source or pass them through individual environment
//! variables.
//!
//! ## Layout
//!
//! ```text
//! <base>/<type>-<name>/secret.json
//! ```
//!
//! `<base>` is resolved on every load: an explicit override, else the
//! `SECRET_PATH` environment variable, else `/secret/`.
//!
//! ## Core Components
//!
//! - **Path resolution** ([`config`]): three-tier base directory lookup
//! - **Loader** ([`secrets`]): reads, decodes and stamps records
//! - **Schemas** ([`schemas`]): database, cache and wide-column store records
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use secret_loader::schemas::Database;
//! use secret_loader::{LoadSecret, Secret, SecretLoader};
//!
//! fn main() -> secret_loader::Result<()> {
//!     let loader = SecretLoader::new();
//!     let mut db = Database::default();
//!     loader.load(Database::SECRET_TYPE, "prod", &mut db)?;
//!     tracing::info!(path = %db.path().display(), host = %db.writer.params.host, "database secret ready");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod schemas;
pub mod secrets;

// Re-export commonly used types and traits
pub use config::{resolve_base_path, LoaderConfig, DEFAULT_BASE_PATH, SECRET_PATH_ENV};
pub use secrets::{Identity, LoadSecret, Result, Secret, SecretLoader, SecretsError};
