//! Filesystem access for secret files.
//!
//! `OsFileSystem` reads from disk; `MemoryFileSystem` serves content from a
//! map so tests can exercise the loader without touching the real
//! filesystem.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::Serialize;

/// Minimal metadata the loader needs about a secret file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    /// Size in bytes.
    pub len: u64,
    /// Whether the path is a directory.
    pub is_dir: bool,
}

/// Read-only view of the filesystem holding secret files.
pub trait SecretFileSystem: Send + Sync {
    /// Returns metadata for `path`. A missing file must surface as
    /// [`io::ErrorKind::NotFound`].
    fn metadata(&self, path: &Path) -> io::Result<FileInfo>;

    /// Reads the whole file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<T: SecretFileSystem + ?Sized> SecretFileSystem for Arc<T> {
    fn metadata(&self, path: &Path) -> io::Result<FileInfo> {
        (**self).metadata(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    /// Creates a new filesystem handle.
    pub fn new() -> Self {
        Self
    }
}

impl SecretFileSystem for OsFileSystem {
    fn metadata(&self, path: &Path) -> io::Result<FileInfo> {
        let meta = fs::metadata(path)?;
        Ok(FileInfo { len: meta.len(), is_dir: meta.is_dir() })
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    files: HashMap<PathBuf, Vec<u8>>,
    errors: HashMap<PathBuf, io::ErrorKind>,
}

/// In-memory filesystem for tests.
///
/// Paths are matched exactly as given; no normalization is applied.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: RwLock<MemoryState>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file.
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.files.insert(path.into(), content.into());
    }

    /// Makes every access to `path` fail with `kind`.
    pub fn add_error(&self, path: impl Into<PathBuf>, kind: io::ErrorKind) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.errors.insert(path.into(), kind);
    }

    /// Serializes `content` as JSON and stores it at
    /// `<base>/<type>-<name>/secret.json`, returning that path.
    pub fn add_secret<T: Serialize>(
        &self,
        base: impl AsRef<Path>,
        secret_type: &str,
        name: &str,
        content: &T,
    ) -> serde_json::Result<PathBuf> {
        let json = serde_json::to_vec(content)?;
        let path = super::loader::compose_secret_path(base.as_ref(), secret_type, name);
        self.add_file(path.clone(), json);
        Ok(path)
    }

    fn forced_error(state: &MemoryState, path: &Path) -> Option<io::Error> {
        state.errors.get(path).map(|kind| io::Error::from(*kind))
    }
}

impl SecretFileSystem for MemoryFileSystem {
    fn metadata(&self, path: &Path) -> io::Result<FileInfo> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        if let Some(err) = Self::forced_error(&state, path) {
            return Err(err);
        }

        state
            .files
            .get(path)
            .map(|content| FileInfo { len: content.len() as u64, is_dir: false })
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        if let Some(err) = Self::forced_error(&state, path) {
            return Err(err);
        }

        state.files.get(path).cloned().ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}
