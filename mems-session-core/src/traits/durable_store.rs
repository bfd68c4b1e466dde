use std::path::{Path, PathBuf};

use crate::models::error::SessionError;

/// Interface for the file write primitive used by the export bundler.
///
/// Writes are independent. There is no atomicity across calls.
pub trait DurableStore: Send + Sync {
    /// Path at which an artifact named `name` is stored.
    fn location(&self, name: &str) -> PathBuf;

    fn write_text(&self, path: &Path, content: &str) -> Result<(), SessionError>;

    fn write_binary(&self, path: &Path, content: &[u8]) -> Result<(), SessionError>;

    fn read_binary(&self, path: &Path) -> Result<Vec<u8>, SessionError>;
}
