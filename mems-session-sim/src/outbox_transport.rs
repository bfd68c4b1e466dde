use std::fs;
use std::path::{Path, PathBuf};

use mems_session_core::{ArchiveTransport, SessionError};

/// Shares an archive by copying it into an outbox directory.
///
/// Copies are named `session_<uuid>.zip` so successive sessions do not
/// overwrite each other.
#[derive(Debug, Clone)]
pub struct OutboxTransport {
    outbox: PathBuf,
}

impl OutboxTransport {
    pub fn new(outbox: impl Into<PathBuf>) -> Self {
        Self { outbox: outbox.into() }
    }

    pub fn outbox(&self) -> &Path {
        &self.outbox
    }
}

impl ArchiveTransport for OutboxTransport {
    fn share(&self, path: &Path) -> Result<(), SessionError> {
        fs::create_dir_all(&self.outbox)
            .map_err(|e| SessionError::TransportFailure(format!("failed to create outbox: {}", e)))?;
        let target = self
            .outbox
            .join(format!("session_{}.zip", uuid::Uuid::new_v4()));
        fs::copy(path, &target)
            .map_err(|e| SessionError::TransportFailure(format!("failed to share {}: {}", path.display(), e)))?;
        log::info!("Shared {} to {}", path.display(), target.display());
        Ok(())
    }
}
