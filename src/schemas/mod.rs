//! Connection secret schemas.
//!
//! Each schema embeds one [`Identity`](crate::secrets::Identity) and one or
//! more endpoint groups. Field names are part of the on-disk contract.

pub mod cache;
pub mod database;
pub mod wide_column;

pub use cache::{Cache, CacheNode};
pub use database::{Database, DatabaseMeta, DatabaseParams};
pub use wide_column::{WideColumnMeta, WideColumnStore};

/// Placeholder written instead of credentials in `Debug` output.
pub(crate) const REDACTED: &str = "[REDACTED]";
