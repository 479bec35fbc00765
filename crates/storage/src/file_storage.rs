use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{errors::StorageError, Storage};

/// Filesystem-backed byte store rooted at a base directory.
///
/// Every key is a path relative to the root. Nothing is cached in memory, so
/// each call goes to the filesystem and sees writes made by other processes.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `root_path`. The directory is not touched until
    /// the first write, which creates it if needed.
    pub fn new<P: Into<PathBuf>>(root_path: P) -> Self {
        Self { root_path: root_path.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Join a caller key onto the root. Absolute keys and `..` segments are
    /// rejected so that no key resolves outside the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        check_relative(path)?;
        Ok(self.root_path.join(path))
    }

    fn write_file(full_path: &Path, content: &[u8]) -> io::Result<()> {
        fs::write(full_path, content)
    }

    fn create_parent(full_path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        Ok(())
    }

    fn exists_matching(&self, pattern: &str) -> Result<bool, StorageError> {
        check_relative(pattern)?;
        let root = glob::Pattern::escape(&self.root_path.to_string_lossy());
        let full_pattern = format!("{}/{}", root.trim_end_matches('/'), pattern);
        let mut matches = glob::glob(&full_pattern).map_err(|source| StorageError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        // Unreadable entries are not counted as matches.
        Ok(matches.any(|entry| entry.is_ok()))
    }
}

impl Storage for FileStorage {
    fn save(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(path)?;
        match Self::write_file(&full_path, content) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %full_path.display(), "parent directory missing; creating it and retrying write");
                Self::create_parent(&full_path)?;
                Self::write_file(&full_path, content).map_err(|e| StorageError::io(&full_path, e))?;
            }
            Err(e) => return Err(StorageError::io(&full_path, e)),
        }
        debug!(path = %full_path.display(), bytes = content.len(), "file saved");
        Ok(())
    }

    fn load(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let full_path = self.resolve(path)?;
        match fs::read(&full_path) {
            Ok(bytes) => {
                debug!(path = %full_path.display(), bytes = bytes.len(), "file loaded");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %full_path.display(), "file not found");
                Ok(None)
            }
            Err(e) => Err(StorageError::io(&full_path, e)),
        }
    }

    fn exists(&self, path: &str, wildcard: bool) -> Result<bool, StorageError> {
        if wildcard {
            return self.exists_matching(path);
        }
        let full_path = self.resolve(path)?;
        full_path.try_exists().map_err(|e| StorageError::io(&full_path, e))
    }
}

fn check_relative(path: &str) -> Result<(), StorageError> {
    if path.is_empty() {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    let escapes = Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(())
}
