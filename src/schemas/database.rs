//! Relational database credentials with writer and reader endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::REDACTED;
use crate::impl_secret;
use crate::secrets::Identity;

/// Database secret.
///
/// ```json
/// {
///   "writer": {"adapter": "mysql", "params": {"charset": "utf8mb4", "host": "db", "port": 3306,
///              "dbname": "app", "username": "app", "password": "..."}},
///   "reader": {"adapter": "mysql", "params": {...}}
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    #[serde(skip)]
    identity: Identity,

    pub writer: DatabaseMeta,
    pub reader: DatabaseMeta,
}

impl_secret!(Database, identity);

impl Database {
    /// Secret type used in the `<type>-<name>` directory name.
    pub const SECRET_TYPE: &'static str = "database";

    /// Set the identity, as if the record had already been loaded.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_writer(mut self, writer: DatabaseMeta) -> Self {
        self.writer = writer;
        self
    }

    pub fn with_reader(mut self, reader: DatabaseMeta) -> Self {
        self.reader = reader;
        self
    }
}

/// One database endpoint: driver name plus connection parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseMeta {
    /// Driver name, e.g. `mysql` or `postgres`.
    #[serde(alias = "Adapter")]
    pub adapter: String,
    pub params: DatabaseParams,
}

impl DatabaseMeta {
    pub fn new(adapter: impl Into<String>, params: DatabaseParams) -> Self {
        Self { adapter: adapter.into(), params }
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseParams {
    pub charset: String,
    pub host: String,
    pub port: u32,
    pub dbname: String,
    pub username: String,
    pub password: String,
}

impl DatabaseParams {
    pub fn new(host: impl Into<String>, port: u32, dbname: impl Into<String>) -> Self {
        Self { host: host.into(), port, dbname: dbname.into(), ..Default::default() }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }
}

impl fmt::Debug for DatabaseParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseParams")
            .field("charset", &self.charset)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}
