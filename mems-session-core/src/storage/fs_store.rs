use std::fs;
use std::path::{Path, PathBuf};

use crate::models::error::SessionError;
use crate::traits::durable_store::DurableStore;

/// `DurableStore` over a document directory on the local filesystem.
///
/// Each write replaces the target file. Parent directories are created on
/// demand.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SessionError::StorageWriteFailure(format!("failed to create directory: {}", e)))?;
        }
        fs::write(path, content)
            .map_err(|e| SessionError::StorageWriteFailure(format!("failed to write {}: {}", path.display(), e)))
    }
}

impl DurableStore for FsStore {
    fn location(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<(), SessionError> {
        self.write(path, content.as_bytes())
    }

    fn write_binary(&self, path: &Path, content: &[u8]) -> Result<(), SessionError> {
        self.write(path, content)
    }

    fn read_binary(&self, path: &Path) -> Result<Vec<u8>, SessionError> {
        fs::read(path)
            .map_err(|e| SessionError::StorageWriteFailure(format!("failed to read {}: {}", path.display(), e)))
    }
}
