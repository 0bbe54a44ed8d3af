//! Storage capability used by page assembly and module loading.
//!
//! Generation only ever needs a handful of filesystem primitives, so they sit
//! behind a trait. `FsStorage` talks to the real filesystem; `MemoryStorage`
//! keeps everything in memory for tests and dry runs.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

pub trait Storage: Send + Sync + Debug {
    /// Create a directory and all missing parents
    fn ensure_dir(&self, path: &Path) -> Result<()>;

    /// Write UTF-8 content, replacing any existing file
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Remove a directory tree. Removing a missing directory is not an error.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content)?;
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}

#[derive(Debug, Default)]
struct MemoryTree {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
}

/// In-memory storage.
///
/// Writing into a directory that was never ensured fails the same way the
/// filesystem would, so callers that forget to create directories are caught.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tree: RwLock<MemoryTree>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.tree
            .read()
            .ok()
            .and_then(|tree| tree.files.get(path.as_ref()).cloned())
    }

    /// All stored file paths, sorted
    pub fn files(&self) -> Vec<PathBuf> {
        self.tree
            .read()
            .map(|tree| tree.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn dir_exists(&self, path: impl AsRef<Path>) -> bool {
        self.tree
            .read()
            .map(|tree| tree.dirs.contains(path.as_ref()))
            .unwrap_or(false)
    }

    fn poisoned() -> Error {
        Error::Io(io::Error::other("memory storage lock poisoned"))
    }
}

impl Storage for MemoryStorage {
    fn ensure_dir(&self, path: &Path) -> Result<()> {
        let mut tree = self.tree.write().map_err(|_| Self::poisoned())?;
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            tree.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        let mut tree = self.tree.write().map_err(|_| Self::poisoned())?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !tree.dirs.contains(parent)
        {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory does not exist: {}", parent.display()),
            )));
        }
        tree.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let tree = self.tree.read().map_err(|_| Self::poisoned())?;
        tree.files.get(path).cloned().ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            ))
        })
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let mut tree = self.tree.write().map_err(|_| Self::poisoned())?;
        tree.dirs.retain(|dir| !dir.starts_with(path));
        tree.files.retain(|file, _| !file.starts_with(path));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
