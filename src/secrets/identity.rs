//! Secret identity and the capability every loadable record implements.
//!
//! A record opts into loading by implementing [`Secret`], which tells the
//! loader where its single embedded [`Identity`] lives. Most records use the
//! [`impl_secret!`](crate::impl_secret) macro:
//!
//! ```rust
//! use secret_loader::impl_secret;
//! use secret_loader::secrets::{Identity, Secret};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default)]
//! struct Queue {
//!     #[serde(skip)]
//!     identity: Identity,
//!     url: String,
//! }
//!
//! impl_secret!(Queue, identity);
//!
//! let queue = Queue::default();
//! assert_eq!(queue.name(), "");
//! ```

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Object key that marks the identity member of an untyped JSON record.
pub const IDENTITY_KEY: &str = "_identity";

/// Logical name and resolved file path of a loaded secret.
///
/// Both fields are empty until a load succeeds. They are never read from the
/// secret file; only the loader sets them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    name: String,
    path: PathBuf,
}

impl Identity {
    /// Creates an identity as a successful load would leave it. Useful for
    /// building pre-loaded records in tests.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), path: path.into() }
    }

    /// Instance name passed to the last successful load.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File the last successful load read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true once a load has stamped this identity.
    pub fn is_loaded(&self) -> bool {
        !self.name.is_empty()
    }

    pub(crate) fn stamp(&mut self, name: &str, path: &Path) {
        self.name = name.to_string();
        self.path = path.to_path_buf();
    }
}

/// A record that can be loaded from a secret file.
///
/// `identity_mut` must return a reference into `self`, never a copy. Returning
/// `None` marks a record with no identity; loading into it fails with
/// [`SecretsError::MissingIdentityField`](super::SecretsError::MissingIdentityField).
pub trait Secret: DeserializeOwned {
    /// The embedded identity, if the record has one.
    fn identity(&self) -> Option<&Identity>;

    /// Mutable handle to the embedded identity.
    fn identity_mut(&mut self) -> Option<&mut Identity>;

    /// Instance name, or `""` before the first load.
    fn name(&self) -> &str {
        self.identity().map_or("", Identity::name)
    }

    /// Resolved file path, or an empty path before the first load.
    fn path(&self) -> &Path {
        self.identity().map_or(Path::new(""), Identity::path)
    }
}

/// Implements [`Secret`](crate::secrets::Secret) for a record type.
///
/// Name the field path of the embedded identity; it may be nested at any
/// depth. With no field path the record has no identity and every load into
/// it is rejected.
///
/// ```rust,ignore
/// impl_secret!(Database, identity);
/// impl_secret!(Wrapped, meta.inner.identity);
/// impl_secret!(Plain);
/// ```
#[macro_export]
macro_rules! impl_secret {
    ($ty:ty) => {
        impl $crate::secrets::Secret for $ty {
            fn identity(&self) -> Option<&$crate::secrets::Identity> {
                None
            }

            fn identity_mut(&mut self) -> Option<&mut $crate::secrets::Identity> {
                None
            }
        }
    };
    ($ty:ty, $($field:ident).+) => {
        impl $crate::secrets::Secret for $ty {
            fn identity(&self) -> Option<&$crate::secrets::Identity> {
                Some(&self.$($field).+)
            }

            fn identity_mut(&mut self) -> Option<&mut $crate::secrets::Identity> {
                Some(&mut self.$($field).+)
            }
        }
    };
}

/// Finds the identity member of an untyped record.
///
/// Members are visited in document order. A member named [`IDENTITY_KEY`]
/// holding an object matches; any other object member is searched
/// recursively before moving on to its next sibling. Returns the JSON pointer
/// of the first match.
pub fn locate_identity(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    for (key, child) in map {
        if key == IDENTITY_KEY && child.is_object() {
            return Some(format!("/{}", escape_pointer_token(key)));
        }
        if key != IDENTITY_KEY {
            if let Some(rest) = locate_identity(child) {
                return Some(format!("/{}{}", escape_pointer_token(key), rest));
            }
        }
    }
    None
}

/// Mutable counterpart of [`locate_identity`]: returns a handle into
/// `value` itself.
pub fn locate_identity_mut(value: &mut Value) -> Option<&mut Map<String, Value>> {
    let map = value.as_object_mut()?;
    for (key, child) in map.iter_mut() {
        if key == IDENTITY_KEY {
            if let Some(identity) = child.as_object_mut() {
                return Some(identity);
            }
        } else if let Some(identity) = locate_identity_mut(child) {
            return Some(identity);
        }
    }
    None
}

/// Writes `name` and `path` into an untyped identity member.
pub(crate) fn stamp_value(identity: &mut Map<String, Value>, name: &str, path: &Path) {
    identity.insert("name".to_string(), Value::String(name.to_string()));
    identity.insert("path".to_string(), Value::String(path.to_string_lossy().into_owned()));
}

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
