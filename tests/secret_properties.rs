//! Property tests for the loader, run against an in-memory filesystem.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use proptest::prelude::*;
use secret_loader::impl_secret;
use secret_loader::schemas::{Cache, Database, DatabaseMeta, DatabaseParams, WideColumnMeta, WideColumnStore};
use secret_loader::secrets::{
    compose_secret_path, LoadSecret, MapEnvironment, MemoryFileSystem, Secret, SecretsError,
};
use secret_loader::SecretLoader;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const BASE: &str = "/secrets";

fn loader(fs: &Arc<MemoryFileSystem>) -> SecretLoader {
    SecretLoader::new()
        .with_base_path(BASE)
        .with_file_system(Arc::clone(fs))
        .with_environment(MapEnvironment::new())
}

/// Load `content` as `<type>-<name>` into a fresh `S`.
fn load_from<S: Secret + Default, T: Serialize>(
    secret_type: &str,
    name: &str,
    content: &T,
) -> Result<S, SecretsError> {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_secret(BASE, secret_type, name, content).expect("serialize fixture");
    let mut secret = S::default();
    loader(&fs).load(secret_type, name, &mut secret)?;
    Ok(secret)
}

fn host() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9.-]{0,20}"
}

fn text() -> impl Strategy<Value = String> {
    "[ -~]{0,24}"
}

fn instance_name() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,16}"
}

fn database_params() -> impl Strategy<Value = DatabaseParams> {
    (text(), host(), any::<u32>(), text(), text(), text()).prop_map(
        |(charset, host, port, dbname, username, password)| {
            DatabaseParams::new(host, port, dbname)
                .with_credentials(username, password)
                .with_charset(charset)
        },
    )
}

fn database() -> impl Strategy<Value = Database> {
    (text(), database_params(), text(), database_params()).prop_map(|(wa, wp, ra, rp)| {
        Database::default()
            .with_writer(DatabaseMeta::new(wa, wp))
            .with_reader(DatabaseMeta::new(ra, rp))
    })
}

fn wide_column_meta() -> impl Strategy<Value = WideColumnMeta> {
    (prop::collection::vec("[a-z]{1,8}:[0-9]{2,5}", 0..5), text(), text(), text(), text()).prop_map(
        |(endpoints, keyspace, username, password, ca_path)| {
            WideColumnMeta::new(endpoints, keyspace)
                .with_credentials(username, password)
                .with_ca_path(ca_path)
        },
    )
}

fn cache() -> impl Strategy<Value = Cache> {
    (host(), any::<u32>(), host(), any::<u32>()).prop_map(|(mh, mp, sh, sp)| {
        Cache::default().with_master(mh, mp).with_slave(sh, sp)
    })
}

#[derive(Debug, Default, Deserialize)]
struct NoIdentity {
    #[allow(dead_code)]
    #[serde(default)]
    value: Option<Value>,
}

impl_secret!(NoIdentity);

proptest! {
    #[test]
    fn cache_round_trips(original in cache(), name in instance_name()) {
        let loaded: Cache = load_from("cache", &name, &original).unwrap();
        prop_assert_eq!(serde_json::to_value(&loaded).unwrap(), serde_json::to_value(&original).unwrap());
        prop_assert_eq!(loaded.master, original.master);
    }

    #[test]
    fn database_round_trips(original in database(), name in instance_name()) {
        let loaded: Database = load_from("database", &name, &original).unwrap();
        prop_assert_eq!(serde_json::to_value(&loaded).unwrap(), serde_json::to_value(&original).unwrap());
    }

    #[test]
    fn wide_column_round_trips(writer in wide_column_meta(), reader in wide_column_meta()) {
        let original = WideColumnStore::default().with_writer(writer).with_reader(reader);
        let loaded: WideColumnStore = load_from("cassandra", "events", &original).unwrap();
        prop_assert_eq!(&loaded.writer.endpoints, &original.writer.endpoints);
        prop_assert_eq!(serde_json::to_value(&loaded).unwrap(), serde_json::to_value(&original).unwrap());
    }

    #[test]
    fn identity_matches_call_arguments(secret_type in "[a-z]{1,10}", name in instance_name()) {
        let loaded: Cache = load_from(&secret_type, &name, &json!({})).unwrap();
        prop_assert_eq!(loaded.name(), name.as_str());
        prop_assert_eq!(
            loaded.path().to_path_buf(),
            PathBuf::from(format!("{}/{}-{}/secret.json", BASE, secret_type, name))
        );
    }

    #[test]
    fn composed_path_stays_under_base(secret_type in "[a-z./]{0,12}", name in "[a-z./]{0,12}") {
        let path = compose_secret_path(Path::new(BASE), &secret_type, &name);
        prop_assert!(path.starts_with(BASE));
        prop_assert!(path.ends_with("secret.json"));
        let has_parent_step = path.components().any(|c| c == std::path::Component::ParentDir);
        prop_assert!(!has_parent_step);
    }

    #[test]
    fn missing_identity_fails_for_any_content(content in prop::collection::hash_map("[a-z]{1,6}", any::<i64>(), 0..4)) {
        let result: Result<NoIdentity, _> = load_from("plain", "x", &content);
        let is_missing_identity = matches!(result, Err(SecretsError::MissingIdentityField { .. }));
        prop_assert!(is_missing_identity);
    }

    #[test]
    fn missing_file_is_not_found(secret_type in "[a-z]{1,10}", name in instance_name()) {
        let fs = Arc::new(MemoryFileSystem::new());
        let mut cache = Cache::default();
        let mut db = Database::default();
        prop_assert!(loader(&fs).load(&secret_type, &name, &mut cache).unwrap_err().is_not_found());
        prop_assert!(loader(&fs).load(&secret_type, &name, &mut db).unwrap_err().is_not_found());
    }

    #[test]
    fn unknown_keys_do_not_change_result(
        original in cache(),
        extra in prop::collection::hash_map("x_[a-z]{1,8}", any::<i64>(), 1..5),
    ) {
        let mut with_extra = serde_json::to_value(&original).unwrap();
        if let Some(members) = with_extra.as_object_mut() {
            for (key, value) in extra {
                members.insert(key, json!(value));
            }
        }

        let plain: Cache = load_from("cache", "a", &original).unwrap();
        let extended: Cache = load_from("cache", "a", &with_extra).unwrap();
        prop_assert_eq!(plain, extended);
    }
}
