//! Wide-column store (Cassandra-style) credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::REDACTED;
use crate::impl_secret;
use crate::secrets::Identity;

/// Wide-column store secret with writer and reader clusters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WideColumnStore {
    #[serde(skip)]
    identity: Identity,

    pub writer: WideColumnMeta,
    pub reader: WideColumnMeta,
}

impl_secret!(WideColumnStore, identity);

impl WideColumnStore {
    /// Secret type used in the `<type>-<name>` directory name.
    pub const SECRET_TYPE: &'static str = "cassandra";

    /// Set the identity, as if the record had already been loaded.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_writer(mut self, writer: WideColumnMeta) -> Self {
        self.writer = writer;
        self
    }

    pub fn with_reader(mut self, reader: WideColumnMeta) -> Self {
        self.reader = reader;
        self
    }
}

/// Connection settings for one cluster.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WideColumnMeta {
    /// Contact points as `host:port`, in preference order. Older files name
    /// this list `hosts`.
    #[serde(alias = "hosts")]
    pub endpoints: Vec<String>,
    pub keyspace: String,
    pub username: String,
    pub password: String,
    /// CA bundle used to verify the cluster's TLS certificates.
    pub ca_path: String,
}

impl WideColumnMeta {
    pub fn new<I, S>(endpoints: I, keyspace: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endpoints: endpoints.into_iter().map(Into::into).collect(),
            keyspace: keyspace.into(),
            ..Default::default()
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    pub fn with_ca_path(mut self, ca_path: impl Into<String>) -> Self {
        self.ca_path = ca_path.into();
        self
    }
}

impl fmt::Debug for WideColumnMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WideColumnMeta")
            .field("endpoints", &self.endpoints)
            .field("keyspace", &self.keyspace)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("ca_path", &self.ca_path)
            .finish()
    }
}
