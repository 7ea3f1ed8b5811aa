//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use secret_loader::secrets::MapEnvironment;
use secret_loader::SecretLoader;
use serde::Serialize;
use tempfile::TempDir;

/// Temporary secret base directory, removed on drop.
pub struct SecretDir {
    temp_dir: TempDir,
}

impl SecretDir {
    pub fn new() -> Self {
        Self { temp_dir: tempfile::tempdir().expect("create temp dir") }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn base(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }

    /// Write raw `content` to `<base>/<type>-<name>/secret.json`.
    pub fn write_raw(&self, secret_type: &str, name: &str, content: &str) -> PathBuf {
        let dir = self.path().join(format!("{}-{}", secret_type, name));
        std::fs::create_dir_all(&dir).expect("create secret dir");
        let path = dir.join("secret.json");
        std::fs::write(&path, content).expect("write secret file");
        path
    }

    pub fn write_json<T: Serialize>(&self, secret_type: &str, name: &str, content: &T) -> PathBuf {
        let json = serde_json::to_string_pretty(content).expect("serialize secret");
        self.write_raw(secret_type, name, &json)
    }

    /// Loader pinned to this directory, isolated from the process environment.
    pub fn loader(&self) -> SecretLoader {
        SecretLoader::new().with_base_path(self.base()).with_environment(MapEnvironment::new())
    }
}
