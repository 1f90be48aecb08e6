//! Artifact store: injected key-value persistence for generated outputs
//! and pipeline progress.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{Result, SmelterError};

/// Key-value persistence capability with synchronous read-your-writes
/// semantics for a single logical writer. The core never assumes a storage
/// technology; callers inject whichever implementation fits.
pub trait ArtifactStore {
    /// Read a value by key.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any existing one.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key if present.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Whether a key exists.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All stored keys, in insertion/name order.
    fn keys(&self) -> Vec<String>;
}

/// In-memory store for tests and single-session runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: IndexMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.shift_remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Filesystem store: one file per key under a root directory.
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.exists() {
            fs::create_dir_all(&root).map_err(|e| {
                SmelterError::Store(format!("failed to create '{}': {e}", root.display()))
            })?;
        }
        Ok(Self { root })
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl ArtifactStore for DirStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value)
            .map_err(|e| SmelterError::Store(format!("failed to write '{}': {e}", path.display())))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                SmelterError::Store(format!("failed to remove '{}': {e}", path.display()))
            })?;
        }
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    fn keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };
        let mut keys: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        keys.sort();
        keys
    }
}
