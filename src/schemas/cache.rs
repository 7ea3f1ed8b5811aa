//! Cache credentials with a master and a replica endpoint.
//!
//! ```json
//! {"master": {"host": "localhost", "port": 6379}, "slave": {"host": "slave.localhost", "port": 6380}}
//! ```

use serde::{Deserialize, Serialize};

use crate::impl_secret;
use crate::secrets::Identity;

/// Cache secret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cache {
    #[serde(skip)]
    identity: Identity,

    /// Primary node, accepts writes.
    pub master: CacheNode,

    /// Replica node.
    pub slave: CacheNode,
}

impl_secret!(Cache, identity);

impl Cache {
    /// Secret type used in the `<type>-<name>` directory name.
    pub const SECRET_TYPE: &'static str = "cache";

    /// Set the identity, as if the record had already been loaded.
    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    /// Set the master endpoint.
    pub fn with_master(mut self, host: impl Into<String>, port: u32) -> Self {
        self.master = CacheNode::new(host, port);
        self
    }

    /// Set the replica endpoint.
    pub fn with_slave(mut self, host: impl Into<String>, port: u32) -> Self {
        self.slave = CacheNode::new(host, port);
        self
    }
}

/// One cache endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheNode {
    pub host: String,
    pub port: u32,
}

impl CacheNode {
    pub fn new(host: impl Into<String>, port: u32) -> Self {
        Self { host: host.into(), port }
    }

    /// `host:port` form for client connection strings.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::Secret;

    #[test]
    fn test_cache_deserialization() {
        let json = r#"{
            "master": {"host": "localhost", "port": 6379},
            "slave": {"host": "slave.localhost", "port": 6380}
        }"#;

        let cache: Cache = serde_json::from_str(json).unwrap();
        assert_eq!(cache.master, CacheNode::new("localhost", 6379));
        assert_eq!(cache.slave.address(), "slave.localhost:6380");
        assert_eq!(cache.name(), "");
    }

    #[test]
    fn test_cache_missing_fields_default() {
        let cache: Cache = serde_json::from_str(r#"{"master": {"host": "m"}}"#).unwrap();
        assert_eq!(cache.master.port, 0);
        assert_eq!(cache.slave, CacheNode::default());
    }

    #[test]
    fn test_cache_port_type_mismatch() {
        let result: Result<Cache, _> =
            serde_json::from_str(r#"{"master": {"host": "localhost", "port": "not_a_number"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_cache_port_range_not_checked() {
        let cache: Cache = serde_json::from_str(r#"{"master": {"host": "h", "port": 70000}}"#).unwrap();
        assert_eq!(cache.master.port, 70000);
        assert_eq!(cache.master.address(), "h:70000");
    }

    #[test]
    fn test_cache_with_identity() {
        let cache = Cache::default()
            .with_identity(Identity::new("test", "/secret/cache-test/secret.json"))
            .with_master("localhost", 6379);

        assert_eq!(cache.name(), "test");
        assert_eq!(cache.path(), std::path::Path::new("/secret/cache-test/secret.json"));
        assert_eq!(serde_json::to_value(&cache).unwrap()["master"]["port"], 6379);
    }

    #[test]
    fn test_cache_serialization_skips_identity() {
        let cache = Cache::default().with_master("localhost", 6379).with_slave("slave.localhost", 6380);
        let value = serde_json::to_value(&cache).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "master": {"host": "localhost", "port": 6379},
                "slave": {"host": "slave.localhost", "port": 6380}
            })
        );
    }
}
